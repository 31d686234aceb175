use thiserror::Error;

/// Error for cart operations
#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("User not found with username: {0}")]
    UserNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
