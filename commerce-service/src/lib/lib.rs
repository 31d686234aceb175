pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::cart;
pub use domain::item;
pub use domain::order;
pub use domain::user;
pub use outbound::repositories;
