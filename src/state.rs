use std::fmt;
use std::sync::Arc;

use avisgate_auth::TokenService;
use avisgate_config::{CorsConfig, JwtConfig};
use avisgate_core::{AppError, CredentialHasher};

use crate::middleware::access::{AccessPolicy, default_policy};
use crate::modules::reviews::controller::SharedRecords;
use crate::modules::reviews::store::InMemoryRecordStore;
use crate::store::{PrincipalResolver, PrincipalStore};

/// Everything a request may touch. Immutable after startup; stores handle their
/// own synchronization.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub principals: Arc<dyn PrincipalStore>,
    pub resolver: PrincipalResolver,
    pub hasher: Arc<dyn CredentialHasher>,
    /// Verified against when a login names an unknown email.
    pub decoy_hash: Arc<str>,
    pub access_policy: Arc<AccessPolicy>,
    pub feedback: SharedRecords,
    pub avis: SharedRecords,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        jwt_config: &JwtConfig,
        cors_config: CorsConfig,
        principals: Arc<dyn PrincipalStore>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Result<Self, AppError> {
        let decoy_hash = hasher.hash("decoy-credential")?;

        Ok(Self {
            tokens: Arc::new(TokenService::new(jwt_config)),
            resolver: PrincipalResolver::new(principals.clone()),
            principals,
            hasher,
            decoy_hash: decoy_hash.into(),
            access_policy: Arc::new(default_policy()),
            feedback: Arc::new(InMemoryRecordStore::new()),
            avis: Arc::new(InMemoryRecordStore::new()),
            cors_config,
        })
    }

    pub fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = Arc::new(policy);
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("access_policy", &self.access_policy)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
