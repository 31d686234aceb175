use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::cart::add_to_cart;
use super::handlers::cart::remove_from_cart;
use super::handlers::create_user::create_user;
use super::handlers::get_user::get_user;
use super::handlers::items::get_item_by_id;
use super::handlers::items::get_items;
use super::handlers::items::get_items_by_name;
use super::handlers::login::login;
use super::handlers::orders::order_history;
use super::handlers::orders::submit_order;
use super::middleware::authenticate as auth_middleware;
use crate::cart::ports::CartServicePort;
use crate::item::ports::ItemServicePort;
use crate::order::ports::OrderServicePort;
use crate::user::ports::UserServicePort;

/// Shared handler state.
///
/// Services are held behind their ports so tests wire in fakes through the
/// same constructor the binary uses.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub item_service: Arc<dyn ItemServicePort>,
    pub cart_service: Arc<dyn CartServicePort>,
    pub order_service: Arc<dyn OrderServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    item_service: Arc<dyn ItemServicePort>,
    cart_service: Arc<dyn CartServicePort>,
    order_service: Arc<dyn OrderServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        item_service,
        cart_service,
        order_service,
        authenticator,
    };

    // Every route sits behind the gate; login and user creation simply never
    // demand an identity
    let routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/users", post(create_user))
        .route("/api/users/:username", get(get_user))
        .route("/api/items", get(get_items))
        .route("/api/items/:item_id", get(get_item_by_id))
        .route("/api/items/name/:name", get(get_items_by_name))
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/remove", post(remove_from_cart))
        .route("/api/orders/submit/:username", post(submit_order))
        .route("/api/orders/history/:username", get(order_history));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
