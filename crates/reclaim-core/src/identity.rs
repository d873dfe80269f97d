//! Anonymous identity provider

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use reclaim_domain::UserId;

use crate::error::StoreError;

/// The external identity collaborator.
///
/// Identities are anonymous: created on first use, stable for the lifetime
/// of the installation, no credentials involved.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The signed-in identity, if any.
    fn current_identity(&self) -> Option<UserId>;

    /// Sign in anonymously, creating an identity if none exists.
    async fn sign_in_anonymously(&self) -> Result<UserId, StoreError>;
}

/// Return the current identity, signing in anonymously on first use.
pub async fn ensure_identity(provider: &dyn IdentityProvider) -> Result<UserId, StoreError> {
    if let Some(id) = provider.current_identity() {
        return Ok(id);
    }
    provider.sign_in_anonymously().await
}

/// In-process identity provider issuing one stable anonymous id.
///
/// Stands in for the hosted identity service in tests and demos.
pub struct DeviceIdentity {
    user: Mutex<Option<UserId>>,
}

impl DeviceIdentity {
    /// Provider with no identity yet; the first sign-in mints one.
    pub fn new() -> Self {
        Self {
            user: Mutex::new(None),
        }
    }

    /// Provider already signed in as the given user.
    pub fn signed_in(user: impl Into<UserId>) -> Self {
        Self {
            user: Mutex::new(Some(user.into())),
        }
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for DeviceIdentity {
    fn current_identity(&self) -> Option<UserId> {
        self.user.lock().ok().and_then(|u| u.clone())
    }

    async fn sign_in_anonymously(&self) -> Result<UserId, StoreError> {
        let mut user = self
            .user
            .lock()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let id = user
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_is_stable_across_calls() {
        let provider = DeviceIdentity::new();
        assert!(provider.current_identity().is_none());

        let first = provider.sign_in_anonymously().await.unwrap();
        let second = provider.sign_in_anonymously().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.current_identity(), Some(first));
    }

    #[tokio::test]
    async fn ensure_identity_reuses_existing() {
        let provider = DeviceIdentity::signed_in("user-7");
        let id = ensure_identity(&provider).await.unwrap();
        assert_eq!(id, "user-7");
    }

    #[tokio::test]
    async fn ensure_identity_signs_in_when_absent() {
        let provider = DeviceIdentity::new();
        let id = ensure_identity(&provider).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(provider.current_identity(), Some(id));
    }
}
