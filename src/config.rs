use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Days added to the order date to estimate delivery.
    pub delivery_window_days: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_or("APP_PORT", 3000);
        let max_connections = parse_or("DB_MAX_CONNECTIONS", 10);
        let delivery_window_days = parse_or("DELIVERY_WINDOW_DAYS", 5);
        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            delivery_window_days,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
