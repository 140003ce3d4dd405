//! Principal lookup.
//!
//! The gateway reads principals through [`PrincipalStore`]; registration is the
//! only writer. [`PrincipalResolver`] turns a missing principal into the same
//! authentication failure as a bad token.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use avisgate_core::{AppError, AuthFailure, Principal};
use tracing::debug;

pub use memory::InMemoryPrincipalStore;
pub use postgres::PgPrincipalStore;

#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_by_identifier(&self, identifier: &str) -> anyhow::Result<Option<Principal>>;

    /// Returns `false` when a principal with the same identifier already exists.
    async fn insert(&self, principal: Principal) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PrincipalResolver {
    store: Arc<dyn PrincipalStore>,
}

impl PrincipalResolver {
    pub fn new(store: Arc<dyn PrincipalStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, identifier: &str) -> Result<Principal, AppError> {
        match self.store.find_by_identifier(identifier).await? {
            Some(principal) => Ok(principal),
            None => {
                debug!(subject = %identifier, "Token subject has no principal");
                Err(AuthFailure::PrincipalNotFound.into())
            }
        }
    }
}

impl std::fmt::Debug for PrincipalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_known_principal() {
        let store = InMemoryPrincipalStore::with_principals([Principal::new("a@b.com", "hash")]);
        let resolver = PrincipalResolver::new(Arc::new(store));

        let principal = resolver.resolve("a@b.com").await.unwrap();
        assert_eq!(principal.identifier, "a@b.com");
    }

    #[tokio::test]
    async fn test_unknown_principal_is_an_auth_failure() {
        let resolver = PrincipalResolver::new(Arc::new(InMemoryPrincipalStore::new()));

        let err = resolver.resolve("ghost@b.com").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Authentication(AuthFailure::PrincipalNotFound)
        ));
    }
}
