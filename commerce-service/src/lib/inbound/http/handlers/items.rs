use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::item::models::Item;
use crate::item::models::ItemId;

pub async fn get_items(
    _user: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ItemData>>, ApiError> {
    state
        .item_service
        .get_items()
        .await
        .map_err(ApiError::from)
        .map(|items| ApiSuccess::new(StatusCode::OK, items.iter().map(ItemData::from).collect()))
}

pub async fn get_item_by_id(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<ApiSuccess<ItemData>, ApiError> {
    state
        .item_service
        .get_item(ItemId(item_id))
        .await
        .map_err(ApiError::from)
        .map(|ref item| ApiSuccess::new(StatusCode::OK, item.into()))
}

pub async fn get_items_by_name(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<Vec<ItemData>>, ApiError> {
    state
        .item_service
        .get_items_by_name(&name)
        .await
        .map_err(ApiError::from)
        .map(|items| ApiSuccess::new(StatusCode::OK, items.iter().map(ItemData::from).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemData {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

impl From<&Item> for ItemData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.0,
            name: item.name.clone(),
            description: item.description.clone(),
            price_cents: item.price_cents,
        }
    }
}
