//! Weekly rating trends under `/api/trends`.

pub mod controller;
pub mod model;
pub mod router;
