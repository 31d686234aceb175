use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::cart::CartLineData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::order::models::Order;
use crate::user::models::Username;

pub async fn submit_order(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let username = parse_username(username)?;

    state
        .order_service
        .submit_order(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::OK, order.into()))
}

pub async fn order_history(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    let username = parse_username(username)?;

    state
        .order_service
        .order_history(&username)
        .await
        .map_err(ApiError::from)
        .map(|orders| {
            ApiSuccess::new(StatusCode::OK, orders.iter().map(OrderData::from).collect())
        })
}

fn parse_username(username: String) -> Result<Username, ApiError> {
    Username::new(username)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid username: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderData {
    pub id: String,
    pub lines: Vec<CartLineData>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderData {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            lines: order.lines.iter().map(CartLineData::from).collect(),
            total_cents: order.total_cents,
            created_at: order.created_at,
        }
    }
}
