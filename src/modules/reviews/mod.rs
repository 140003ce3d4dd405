//! Review collections: `/api/feedback` (public) and `/api/avis` (authenticated).
//!
//! Records are opaque JSON objects. The store adds a numeric `id` and imposes no
//! other schema.

pub mod controller;
pub mod router;
pub mod store;
