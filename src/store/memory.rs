use std::collections::HashMap;

use async_trait::async_trait;
use avisgate_core::Principal;
use tokio::sync::RwLock;

use super::PrincipalStore;

/// Principal store used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryPrincipalStore {
    principals: RwLock<HashMap<String, Principal>>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_principals(principals: impl IntoIterator<Item = Principal>) -> Self {
        let principals = principals
            .into_iter()
            .map(|p| (p.identifier.clone(), p))
            .collect();

        Self {
            principals: RwLock::new(principals),
        }
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> anyhow::Result<Option<Principal>> {
        Ok(self.principals.read().await.get(identifier).cloned())
    }

    async fn insert(&self, principal: Principal) -> anyhow::Result<bool> {
        let mut principals = self.principals.write().await;
        if principals.contains_key(&principal.identifier) {
            return Ok(false);
        }
        principals.insert(principal.identifier.clone(), principal);
        Ok(true)
    }
}
