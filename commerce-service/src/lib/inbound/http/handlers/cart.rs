use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::items::ItemData;
use super::ApiError;
use super::ApiSuccess;
use crate::cart::models::Cart;
use crate::cart::models::CartLine;
use crate::cart::models::ModifyCartCommand;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::item::models::ItemId;
use crate::user::models::Username;

pub async fn add_to_cart(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<ModifyCartRequest>,
) -> Result<ApiSuccess<CartData>, ApiError> {
    state
        .cart_service
        .add_to_cart(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref cart| ApiSuccess::new(StatusCode::OK, cart.into()))
}

pub async fn remove_from_cart(
    _user: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<ModifyCartRequest>,
) -> Result<ApiSuccess<CartData>, ApiError> {
    state
        .cart_service
        .remove_from_cart(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref cart| ApiSuccess::new(StatusCode::OK, cart.into()))
}

/// HTTP request body for cart modifications (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModifyCartRequest {
    username: String,
    item_id: i64,
    quantity: u32,
}

impl ModifyCartRequest {
    fn try_into_command(self) -> Result<ModifyCartCommand, ApiError> {
        let username = Username::new(self.username)
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid username: {}", e)))?;

        Ok(ModifyCartCommand {
            username,
            item_id: ItemId(self.item_id),
            quantity: self.quantity,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartData {
    pub id: String,
    pub lines: Vec<CartLineData>,
    pub total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineData {
    pub item: ItemData,
    pub quantity: u32,
}

impl From<&CartLine> for CartLineData {
    fn from(line: &CartLine) -> Self {
        Self {
            item: ItemData::from(&line.item),
            quantity: line.quantity,
        }
    }
}

impl From<&Cart> for CartData {
    fn from(cart: &Cart) -> Self {
        Self {
            id: cart.id.to_string(),
            lines: cart.lines.iter().map(CartLineData::from).collect(),
            total_cents: cart.total_cents(),
        }
    }
}
