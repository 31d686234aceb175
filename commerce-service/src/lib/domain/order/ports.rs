use async_trait::async_trait;

use crate::order::errors::OrderError;
use crate::order::models::Order;
use crate::user::models::UserId;
use crate::user::models::Username;

/// Port for order service operations.
#[async_trait]
pub trait OrderServicePort: Send + Sync + 'static {
    /// Submit the user's current cart as a new order.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    async fn submit_order(&self, username: &Username) -> Result<Order, OrderError>;

    /// The user's past orders, newest first.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this username
    async fn order_history(&self, username: &Username) -> Result<Vec<Order>, OrderError>;
}

/// Persistence operations for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: Order) -> Result<Order, OrderError>;

    /// All of a user's orders, newest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError>;
}
