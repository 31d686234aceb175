use std::sync::Arc;

use async_trait::async_trait;

use crate::item::errors::ItemError;
use crate::item::models::Item;
use crate::item::models::ItemId;
use crate::item::ports::ItemRepository;
use crate::item::ports::ItemServicePort;

/// Domain service implementation for the item catalog.
pub struct ItemService<IR>
where
    IR: ItemRepository,
{
    repository: Arc<IR>,
}

impl<IR> ItemService<IR>
where
    IR: ItemRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> ItemServicePort for ItemService<IR>
where
    IR: ItemRepository,
{
    async fn get_items(&self) -> Result<Vec<Item>, ItemError> {
        self.repository.list_all().await
    }

    async fn get_item(&self, id: ItemId) -> Result<Item, ItemError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id.0))
    }

    async fn get_items_by_name(&self, name: &str) -> Result<Vec<Item>, ItemError> {
        let items = self.repository.find_by_name(name).await?;

        // An empty match is a lookup failure, not an empty page
        if items.is_empty() {
            return Err(ItemError::NotFoundByName(name.to_string()));
        }

        Ok(items)
    }
}
