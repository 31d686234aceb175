//! Stateless authentication core
//!
//! Credential verification and signed bearer tokens for services that keep
//! no session state:
//! - Password hashing and verification (Argon2id)
//! - Token issuance and verification (HMAC-SHA512, subject + expiry)
//! - Login coordination against an injected credential store
//!
//! The signing secret and token lifetime are injected at construction, never
//! read from the environment or hard-coded here. The credential store is a
//! port, so tests substitute fakes through the same constructor production
//! wiring uses.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::days(10));
//! let now = Utc::now();
//! let token = codec.issue("alice", now).unwrap();
//! let subject = codec.verify(&token, now).unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod authenticator;
pub mod identity;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthError;
pub use authenticator::Authenticator;
pub use authenticator::Credential;
pub use authenticator::CredentialStore;
pub use authenticator::CredentialStoreError;
pub use authenticator::StoredCredential;
pub use identity::Identity;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
