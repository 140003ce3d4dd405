//! Dashboard notifications under `/api/alerts`.

pub mod controller;
pub mod model;
pub mod router;
