//! # avisgate Core
//!
//! Foundational types shared by every avisgate crate:
//!
//! - [`principal`]: the authenticated entity as seen by the gateway
//! - [`errors`]: the closed set of failures a request can end in
//! - [`translator`]: the single place where failures become HTTP error bodies
//! - [`password`]: credential hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use avisgate_core::{AppError, AuthFailure};
//!
//! fn check(token_ok: bool) -> Result<(), AppError> {
//!     if !token_ok {
//!         return Err(AuthFailure::TokenInvalid.into());
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod password;
pub mod principal;
pub mod translator;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthFailure, FieldViolation};
pub use password::{BcryptHasher, CredentialHasher};
pub use principal::Principal;
pub use translator::{ApiFailure, ErrorBody, translate_errors};
