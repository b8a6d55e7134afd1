use std::str::FromStr;

/// Server configuration read from the environment (with `.env` support).
///
/// `page_size` and `autocomplete_count` are operator settings; clients
/// cannot influence them.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub port: u16,
    pub page_size: i64,
    pub autocomplete_count: i64,
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:farm.db".to_string()),
            port: env_or("PORT", 3000),
            page_size: env_or("PAGE_SIZE", 10),
            autocomplete_count: env_or("AUTOCOMPLETE_COUNT", 10),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
