pub mod address;
pub mod app_config;
pub mod config;
pub mod postal_code;

use thiserror::Error;

pub use address::{AccessLogCount, AccessLogSummary, AddressInfo, LocationCandidate, LookupResult};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use postal_code::PostalCode;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("postal_code is invalid")]
    InvalidPostalCode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
