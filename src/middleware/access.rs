//! Route-level access control.
//!
//! An [`AccessPolicy`] is an ordered list of `(pattern, requirement)` rules fixed at
//! startup. The first rule whose pattern matches the request path decides; a path no
//! rule matches requires authentication.

use std::fmt;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use avisgate_core::{AppError, AuthFailure};
use tracing::debug;

use crate::middleware::auth::RequestIdentity;
use crate::state::AppState;

/// Routes reachable without a token, in evaluation order.
pub const PUBLIC_ROUTES: &[&str] = &[
    "/api/users/register",
    "/api/users/login",
    "/api/users/forgot-password",
    "/api/feedback",
    "/api/feedback/**",
    "/",
    "/connexion.html",
    "/inscription.html",
    "/mot-de-passe-oublie.html",
    "/Admin/**",
    "/client/**",
    "/css/**",
    "/js/**",
    "/images/**",
    "/favicon.ico",
];

static DEFAULT_REQUIREMENT: AccessRequirement = AccessRequirement::Authenticated;

/// `"/exact"` or `"/prefix/**"`. A subtree pattern also matches the prefix itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Subtree(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => Self::Subtree(prefix.to_string()),
            None => Self::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Subtree(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => f.write_str(exact),
            Self::Subtree(prefix) => write!(f, "{}/**", prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessRequirement {
    Public,
    Authenticated,
    /// Authenticated and holding the named authority.
    Authority(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub requirement: AccessRequirement,
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, pattern: &str, requirement: AccessRequirement) -> Self {
        self.rules.push(AccessRule {
            pattern: PathPattern::parse(pattern),
            requirement,
        });
        self
    }

    pub fn requirement_for(&self, path: &str) -> &AccessRequirement {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map(|rule| &rule.requirement)
            .unwrap_or(&DEFAULT_REQUIREMENT)
    }

    pub fn check(&self, path: &str, identity: &RequestIdentity) -> Result<(), AppError> {
        match self.requirement_for(path) {
            AccessRequirement::Public => Ok(()),
            AccessRequirement::Authenticated => match identity {
                RequestIdentity::Authenticated(_) => Ok(()),
                RequestIdentity::Anonymous => Err(AuthFailure::MissingCredential.into()),
            },
            AccessRequirement::Authority(authority) => match identity.principal() {
                None => Err(AuthFailure::MissingCredential.into()),
                Some(principal) if principal.has_authority(authority) => Ok(()),
                Some(principal) => Err(AppError::access_denied(format!(
                    "{} lacks authority {} for {}",
                    principal.identifier, authority, path
                ))),
            },
        }
    }
}

/// Public allowlist; everything else requires authentication.
pub fn default_policy() -> AccessPolicy {
    PUBLIC_ROUTES
        .iter()
        .fold(AccessPolicy::new(), |policy, pattern| {
            policy.rule(pattern, AccessRequirement::Public)
        })
}

/// Runs after [`crate::middleware::auth::authenticate`], before the handler.
pub async fn enforce_access_policy(
    State(state): State<AppState>,
    identity: RequestIdentity,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();
    if let Err(err) = state.access_policy.check(path, &identity) {
        debug!(path = %path, "Access policy rejected request");
        return Err(err);
    }

    Ok(next.run(req).await)
}
