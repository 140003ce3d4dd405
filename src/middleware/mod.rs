//! Request authentication and route-level access control.
//!
//! - [`auth`]: the authentication middleware and the identity extractors
//! - [`access`]: the ordered access policy and its enforcing middleware
//!
//! # Flow
//!
//! 1. [`auth::authenticate`] reads `Authorization: Bearer <token>`, validates the
//!    token and stores a [`auth::RequestIdentity`] in the request extensions
//! 2. [`access::enforce_access_policy`] looks the path up in the [`access::AccessPolicy`]
//!    and rejects the request when the identity does not satisfy the rule
//! 3. Handlers read the identity with the [`auth::AuthUser`] or
//!    [`auth::RequestIdentity`] extractors
//!
//! ```ignore
//! async fn me(AuthUser(principal): AuthUser) -> Json<MeResponse> {
//!     // only reached with a validated token
//! }
//! ```

pub mod access;
pub mod auth;
