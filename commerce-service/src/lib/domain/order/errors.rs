use thiserror::Error;

/// Error for order operations
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("User not found with username: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
