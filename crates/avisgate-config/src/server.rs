use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Optional PostgreSQL URL for the principal store. In-memory when absent.
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
        }
    }
}
