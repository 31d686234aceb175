use async_trait::async_trait;

use crate::item::errors::ItemError;
use crate::item::models::Item;
use crate::item::models::ItemId;

/// Port for item catalog service operations.
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// All catalog items.
    async fn get_items(&self) -> Result<Vec<Item>, ItemError>;

    /// Retrieve one item by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Item does not exist
    async fn get_item(&self, id: ItemId) -> Result<Item, ItemError>;

    /// Retrieve items matching a name.
    ///
    /// # Errors
    /// * `NotFoundByName` - No items carry this name
    async fn get_items_by_name(&self, name: &str) -> Result<Vec<Item>, ItemError>;
}

/// Persistence operations for the item catalog.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<Item>, ItemError>;

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemError>;

    async fn find_by_name(&self, name: &str) -> Result<Vec<Item>, ItemError>;
}
