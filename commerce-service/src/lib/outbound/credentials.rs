use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::StoredCredential;

use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Adapts the user repository to the authentication core's credential
/// store port.
pub struct UserCredentialStore<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserCredentialStore<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> CredentialStore for UserCredentialStore<UR>
where
    UR: UserRepository,
{
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, CredentialStoreError> {
        // A syntactically invalid username cannot exist in the store; fold
        // it into "not found" so login failures stay uniform
        let username = match Username::new(username.to_string()) {
            Ok(username) => username,
            Err(_) => return Ok(None),
        };

        let user = self
            .repository
            .find_by_username(&username)
            .await
            .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        Ok(user.map(|user| StoredCredential {
            username: user.username.to_string(),
            password_hash: user.password_hash,
        }))
    }
}
