use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use commerce_service::config::Config;
use commerce_service::domain::cart::service::CartService;
use commerce_service::domain::item::service::ItemService;
use commerce_service::domain::order::service::OrderService;
use commerce_service::domain::user::service::UserService;
use commerce_service::inbound::http::router::create_router;
use commerce_service::outbound::credentials::UserCredentialStore;
use commerce_service::outbound::repositories::PostgresCartRepository;
use commerce_service::outbound::repositories::PostgresItemRepository;
use commerce_service::outbound::repositories::PostgresOrderRepository;
use commerce_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "commerce_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "commerce-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_ttl_days = config.auth.token_ttl_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let item_repository = Arc::new(PostgresItemRepository::new(pg_pool.clone()));
    let cart_repository = Arc::new(PostgresCartRepository::new(pg_pool.clone()));
    let order_repository = Arc::new(PostgresOrderRepository::new(pg_pool));

    let token_codec = TokenCodec::new(config.auth.secret.as_bytes(), config.auth.token_ttl());
    let credential_store = Arc::new(UserCredentialStore::new(Arc::clone(&user_repository)));
    let authenticator = Arc::new(Authenticator::new(credential_store, token_codec));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let item_service = Arc::new(ItemService::new(Arc::clone(&item_repository)));
    let cart_service = Arc::new(CartService::new(
        Arc::clone(&user_repository),
        Arc::clone(&item_repository),
        Arc::clone(&cart_repository),
    ));
    let order_service = Arc::new(OrderService::new(
        user_repository,
        cart_repository,
        order_repository,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        item_service,
        cart_service,
        order_service,
        authenticator,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
