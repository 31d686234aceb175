use thiserror::Error;

/// Error type for password operations.
///
/// A mismatched password is not an error; these cover hashing failures and
/// stored hashes that cannot be parsed.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
