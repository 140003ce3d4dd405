//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};

/// Payload of a bearer token.
///
/// - `sub`: principal identifier (email)
/// - `iat`: issued-at, Unix seconds
/// - `exp`: expiry, Unix seconds; the token is valid while `now < exp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}
