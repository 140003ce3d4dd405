//! Account endpoints under `/api/users`: registration, login and the current principal.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
