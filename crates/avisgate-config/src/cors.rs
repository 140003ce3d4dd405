use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_value(env::var("ALLOWED_ORIGINS").ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let allowed_origins = value
            .unwrap_or("http://localhost:8080")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
