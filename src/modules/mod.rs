pub mod alerts;
pub mod home;
pub mod reviews;
pub mod trends;
pub mod users;
