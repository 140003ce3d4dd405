//! # avisgate Auth
//!
//! Stateless bearer tokens for the avisgate API.
//!
//! - [`claims`]: the JWT payload (`sub`, `iat`, `exp`)
//! - [`token`]: [`TokenService`], which issues tokens and checks them against a principal
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`avisgate_config::JwtConfig`]. Nothing is stored server-side, so a token stays
//! valid until it expires.
//!
//! # Example
//!
//! ```ignore
//! use avisgate_auth::TokenService;
//!
//! let tokens = TokenService::new(&jwt_config);
//! let token = tokens.issue(&principal)?;
//!
//! let subject = tokens.extract_subject(&token)?;
//! tokens.is_valid(&token, &principal)?;
//! ```

pub mod claims;
pub mod token;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use token::{TokenError, TokenService};
