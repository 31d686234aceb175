use thiserror::Error;

/// Error for item catalog operations
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("No items found with name: {0}")]
    NotFoundByName(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
