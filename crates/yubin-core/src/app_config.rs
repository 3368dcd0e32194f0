use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Attempts made to reach the database at startup before giving up.
    pub db_connect_retries: u32,
    pub db_connect_retry_delay_secs: u64,
    pub geoapi_base_url: String,
    pub geoapi_timeout_secs: u64,
    pub geoapi_max_retries: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("db_connect_retries", &self.db_connect_retries)
            .field(
                "db_connect_retry_delay_secs",
                &self.db_connect_retry_delay_secs,
            )
            .field("geoapi_base_url", &self.geoapi_base_url)
            .field("geoapi_timeout_secs", &self.geoapi_timeout_secs)
            .field("geoapi_max_retries", &self.geoapi_max_retries)
            .finish()
    }
}
