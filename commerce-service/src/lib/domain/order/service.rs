use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::cart::models::Cart;
use crate::cart::ports::CartRepository;
use crate::order::errors::OrderError;
use crate::order::models::Order;
use crate::order::ports::OrderRepository;
use crate::order::ports::OrderServicePort;
use crate::user::models::User;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service implementation for order operations.
pub struct OrderService<UR, CR, OR>
where
    UR: UserRepository,
    CR: CartRepository,
    OR: OrderRepository,
{
    user_repository: Arc<UR>,
    cart_repository: Arc<CR>,
    order_repository: Arc<OR>,
}

impl<UR, CR, OR> OrderService<UR, CR, OR>
where
    UR: UserRepository,
    CR: CartRepository,
    OR: OrderRepository,
{
    pub fn new(
        user_repository: Arc<UR>,
        cart_repository: Arc<CR>,
        order_repository: Arc<OR>,
    ) -> Self {
        Self {
            user_repository,
            cart_repository,
            order_repository,
        }
    }

    async fn resolve_user(&self, username: &Username) -> Result<User, OrderError> {
        self.user_repository
            .find_by_username(username)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .ok_or(OrderError::UserNotFound(username.to_string()))
    }
}

#[async_trait]
impl<UR, CR, OR> OrderServicePort for OrderService<UR, CR, OR>
where
    UR: UserRepository,
    CR: CartRepository,
    OR: OrderRepository,
{
    async fn submit_order(&self, username: &Username) -> Result<Order, OrderError> {
        let user = self.resolve_user(username).await?;

        // A user who never touched their cart submits an empty order
        let cart = self
            .cart_repository
            .find_by_user(&user.id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .unwrap_or_else(|| Cart::new(user.id));

        let order = Order::from_cart(&cart, Utc::now());
        self.order_repository.create(order).await
    }

    async fn order_history(&self, username: &Username) -> Result<Vec<Order>, OrderError> {
        let user = self.resolve_user(username).await?;
        self.order_repository.find_by_user(&user.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::cart::errors::CartError;
    use crate::item::models::Item;
    use crate::item::models::ItemId;
    use crate::user::errors::UserError;
    use crate::user::models::UserId;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    mock! {
        pub TestCartRepository {}

        #[async_trait]
        impl CartRepository for TestCartRepository {
            async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, CartError>;
            async fn save(&self, cart: Cart) -> Result<Cart, CartError>;
        }
    }

    mock! {
        pub TestOrderRepository {}

        #[async_trait]
        impl OrderRepository for TestOrderRepository {
            async fn create(&self, order: Order) -> Result<Order, OrderError>;
            async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError>;
        }
    }

    fn test_user() -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn widget() -> Item {
        Item {
            id: ItemId(1),
            name: "Round Widget".to_string(),
            description: "A widget that is round".to_string(),
            price_cents: 299,
        }
    }

    #[tokio::test]
    async fn test_submit_order_snapshots_cart() {
        let user = test_user();
        let user_id = user.id;

        let mut user_repository = MockTestUserRepository::new();
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut cart_repository = MockTestCartRepository::new();
        cart_repository
            .expect_find_by_user()
            .times(1)
            .returning(move |_| {
                let mut cart = Cart::new(user_id);
                cart.add_item(widget(), 2);
                Ok(Some(cart))
            });

        let mut order_repository = MockTestOrderRepository::new();
        order_repository
            .expect_create()
            .times(1)
            .returning(|order| Ok(order));

        let service = OrderService::new(
            Arc::new(user_repository),
            Arc::new(cart_repository),
            Arc::new(order_repository),
        );

        let username = Username::new("alice".to_string()).unwrap();
        let order = service.submit_order(&username).await.expect("Submit failed");

        assert_eq!(order.user_id, user_id);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.total_cents, 598);
    }

    #[tokio::test]
    async fn test_submit_order_without_cart_is_empty() {
        let mut user_repository = MockTestUserRepository::new();
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(test_user())));

        let mut cart_repository = MockTestCartRepository::new();
        cart_repository
            .expect_find_by_user()
            .times(1)
            .returning(|_| Ok(None));

        let mut order_repository = MockTestOrderRepository::new();
        order_repository
            .expect_create()
            .times(1)
            .returning(|order| Ok(order));

        let service = OrderService::new(
            Arc::new(user_repository),
            Arc::new(cart_repository),
            Arc::new(order_repository),
        );

        let username = Username::new("alice".to_string()).unwrap();
        let order = service.submit_order(&username).await.expect("Submit failed");

        assert!(order.lines.is_empty());
        assert_eq!(order.total_cents, 0);
    }

    #[tokio::test]
    async fn test_order_history_unknown_user() {
        let mut user_repository = MockTestUserRepository::new();
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = OrderService::new(
            Arc::new(user_repository),
            Arc::new(MockTestCartRepository::new()),
            Arc::new(MockTestOrderRepository::new()),
        );

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service.order_history(&username).await;
        assert!(matches!(result, Err(OrderError::UserNotFound(_))));
    }
}
