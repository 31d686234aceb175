pub mod cart;
pub mod item;
pub mod order;
pub mod user;

pub use cart::PostgresCartRepository;
pub use item::PostgresItemRepository;
pub use order::PostgresOrderRepository;
pub use user::PostgresUserRepository;
