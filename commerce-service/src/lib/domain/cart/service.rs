use std::sync::Arc;

use async_trait::async_trait;

use crate::cart::errors::CartError;
use crate::cart::models::Cart;
use crate::cart::models::ModifyCartCommand;
use crate::cart::ports::CartRepository;
use crate::cart::ports::CartServicePort;
use crate::item::models::Item;
use crate::item::ports::ItemRepository;
use crate::user::models::User;
use crate::user::ports::UserRepository;

/// Domain service implementation for cart operations.
///
/// Resolves the user and item before touching the cart so that unknown
/// usernames and unknown items fail the same way regardless of cart state.
pub struct CartService<UR, IR, CR>
where
    UR: UserRepository,
    IR: ItemRepository,
    CR: CartRepository,
{
    user_repository: Arc<UR>,
    item_repository: Arc<IR>,
    cart_repository: Arc<CR>,
}

impl<UR, IR, CR> CartService<UR, IR, CR>
where
    UR: UserRepository,
    IR: ItemRepository,
    CR: CartRepository,
{
    pub fn new(
        user_repository: Arc<UR>,
        item_repository: Arc<IR>,
        cart_repository: Arc<CR>,
    ) -> Self {
        Self {
            user_repository,
            item_repository,
            cart_repository,
        }
    }

    async fn resolve_user(&self, command: &ModifyCartCommand) -> Result<User, CartError> {
        self.user_repository
            .find_by_username(&command.username)
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?
            .ok_or(CartError::UserNotFound(command.username.to_string()))
    }

    async fn resolve_item(&self, command: &ModifyCartCommand) -> Result<Item, CartError> {
        self.item_repository
            .find_by_id(command.item_id)
            .await
            .map_err(|e| CartError::DatabaseError(e.to_string()))?
            .ok_or(CartError::ItemNotFound(command.item_id.0))
    }
}

#[async_trait]
impl<UR, IR, CR> CartServicePort for CartService<UR, IR, CR>
where
    UR: UserRepository,
    IR: ItemRepository,
    CR: CartRepository,
{
    async fn add_to_cart(&self, command: ModifyCartCommand) -> Result<Cart, CartError> {
        let user = self.resolve_user(&command).await?;
        let item = self.resolve_item(&command).await?;

        let mut cart = self
            .cart_repository
            .find_by_user(&user.id)
            .await?
            .unwrap_or_else(|| Cart::new(user.id));

        cart.add_item(item, command.quantity);
        self.cart_repository.save(cart).await
    }

    async fn remove_from_cart(&self, command: ModifyCartCommand) -> Result<Cart, CartError> {
        let user = self.resolve_user(&command).await?;
        let item = self.resolve_item(&command).await?;

        let mut cart = self
            .cart_repository
            .find_by_user(&user.id)
            .await?
            .unwrap_or_else(|| Cart::new(user.id));

        cart.remove_item(item.id, command.quantity);
        self.cart_repository.save(cart).await
    }
}
