use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenCodec;
use chrono::Duration;
use commerce_service::cart::errors::CartError;
use commerce_service::cart::models::Cart;
use commerce_service::cart::ports::CartRepository;
use commerce_service::domain::cart::service::CartService;
use commerce_service::domain::item::service::ItemService;
use commerce_service::domain::order::service::OrderService;
use commerce_service::domain::user::service::UserService;
use commerce_service::inbound::http::router::create_router;
use commerce_service::item::errors::ItemError;
use commerce_service::item::models::Item;
use commerce_service::item::models::ItemId;
use commerce_service::item::ports::ItemRepository;
use commerce_service::order::errors::OrderError;
use commerce_service::order::models::Order;
use commerce_service::order::ports::OrderRepository;
use commerce_service::outbound::credentials::UserCredentialStore;
use commerce_service::user::errors::UserError;
use commerce_service::user::models::User;
use commerce_service::user::models::UserId;
use commerce_service::user::models::Username;
use commerce_service::user::ports::UserRepository;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing!";

/// In-memory user store keyed by username.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let username = user.username.as_str().to_string();

        if users.contains_key(&username) {
            return Err(UserError::UsernameAlreadyExists(username));
        }

        users.insert(username, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(username.as_str()).cloned())
    }
}

/// Fixed in-memory catalog mirroring the seed migration.
pub struct InMemoryItemRepository {
    items: Vec<Item>,
}

impl InMemoryItemRepository {
    pub fn with_catalog() -> Self {
        Self {
            items: vec![
                Item {
                    id: ItemId(1),
                    name: "Round Widget".to_string(),
                    description: "A widget that is round".to_string(),
                    price_cents: 299,
                },
                Item {
                    id: ItemId(2),
                    name: "Square Widget".to_string(),
                    description: "A widget that is square".to_string(),
                    price_cents: 199,
                },
            ],
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>, ItemError> {
        Ok(self.items.clone())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemError> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, ItemError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.name == name)
            .cloned()
            .collect())
    }
}

/// In-memory cart store keyed by user.
#[derive(Default)]
pub struct InMemoryCartRepository {
    carts: Mutex<HashMap<UserId, Cart>>,
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, CartError> {
        Ok(self.carts.lock().unwrap().get(user_id).cloned())
    }

    async fn save(&self, cart: Cart) -> Result<Cart, CartError> {
        self.carts
            .lock()
            .unwrap()
            .insert(cart.user_id, cart.clone());
        Ok(cart)
    }
}

/// In-memory order log, append-only.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|order| order.user_id == *user_id)
            .cloned()
            .collect())
    }
}

/// Test application that spawns the real router on a random port, wired to
/// in-memory stores through the production constructors.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(Duration::days(10)).await
    }

    /// Spawn with an explicit token TTL (short TTLs drive expiry scenarios).
    pub async fn spawn_with_ttl(token_ttl: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let item_repository = Arc::new(InMemoryItemRepository::with_catalog());
        let cart_repository = Arc::new(InMemoryCartRepository::default());
        let order_repository = Arc::new(InMemoryOrderRepository::default());

        let token_codec = TokenCodec::new(TEST_SECRET, token_ttl);
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

        let router = create_router(
            user_service,
            item_service,
            cart_service,
            order_service,
            authenticator,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user through the public endpoint.
    pub async fn create_user(&self, username: &str, password: &str) {
        let response = self
            .post("/api/users")
            .json(&json!({
                "username": username,
                "password": password,
                "confirm_password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the raw response.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the bearer token from the response header.
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        response
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .expect("Missing bearer token in login response")
            .to_string()
    }
}
