use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Login credentials as submitted by a client.
///
/// Transient: exists only for the duration of one login request and is
/// never persisted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Stored credentials as owned by the external credential store.
///
/// The authenticator only ever reads these.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub username: String,
    pub password_hash: String,
}

/// Error type for credential store lookups.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Port to the external store mapping usernames to password hashes.
///
/// Injected into [`Authenticator`] at construction so tests can substitute
/// fakes directly.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look up stored credentials by username; `None` when unknown.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, CredentialStoreError>;
}

/// Authentication operation errors.
///
/// `InvalidCredentials` covers both unknown username and wrong password;
/// the distinction is never surfaced. The remaining variants are
/// fatal-class infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Credential store error: {0}")]
    Store(#[from] CredentialStoreError),
}

/// Login coordinator: credential store lookup, password verification, token
/// issuance.
///
/// Stateless by design; a successful login leaves no session record, only
/// the returned token.
pub struct Authenticator {
    credential_store: Arc<dyn CredentialStore>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl Authenticator {
    /// Create an authenticator over an injected credential store and token
    /// codec (which carries the signing secret and TTL).
    pub fn new(credential_store: Arc<dyn CredentialStore>, token_codec: TokenCodec) -> Self {
        Self {
            credential_store,
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Verify credentials and issue a signed bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown username or wrong password, folded
    ///   into one indistinguishable variant
    /// * `Store` - the credential store lookup failed
    /// * `Password` - the stored hash could not be parsed
    /// * `Token` - token signing failed
    pub async fn login(&self, credential: &Credential) -> Result<String, AuthError> {
        let stored = self
            .credential_store
            .find_by_username(&credential.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify(&credential.password, &stored.password_hash)?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(&stored.username, Utc::now())?)
    }

    /// Verify a bearer token at instant `now` and return its subject.
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.token_codec.verify(token, now)
    }

    /// Hash a password for storage (the credential store's write path).
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }
}
