//! avisgate Observability
//!
//! - [`init_tracing`]: console, error-file and JSON-file subscribers
//! - [`logging_middleware`]: one structured log line per request, tagged with a request id
//!
//! ```no_run
//! use avisgate_observability::init_tracing;
//!
//! init_tracing();
//! tracing::info!("ready");
//! ```

pub mod logging;

pub use logging::{RequestId, init_tracing, logging_middleware};
