use async_trait::async_trait;

use crate::cart::errors::CartError;
use crate::cart::models::Cart;
use crate::cart::models::ModifyCartCommand;
use crate::user::models::UserId;

/// Port for cart service operations.
#[async_trait]
pub trait CartServicePort: Send + Sync + 'static {
    /// Add item positions to the user's cart, creating the cart on first use.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    /// * `ItemNotFound` - Item does not exist
    async fn add_to_cart(&self, command: ModifyCartCommand) -> Result<Cart, CartError>;

    /// Remove item positions from the user's cart.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    /// * `ItemNotFound` - Item does not exist
    async fn remove_from_cart(&self, command: ModifyCartCommand) -> Result<Cart, CartError>;
}

/// Persistence operations for carts.
#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    /// The user's cart; `None` when the user never added anything.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, CartError>;

    /// Persist the cart's current lines, replacing what was stored.
    async fn save(&self, cart: Cart) -> Result<Cart, CartError>;
}
