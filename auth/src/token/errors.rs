use thiserror::Error;

/// Error type for token operations.
///
/// The three verification variants are distinguished for diagnostics only;
/// callers map all of them to the same unauthorized outcome. `Signing` is
/// the fatal class: issuance failed inside the signing subsystem.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),
}
