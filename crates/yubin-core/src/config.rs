use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_GEOAPI_BASE_URL: &str = "https://geoapi.heartrails.com/api/json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("YUBIN_ENV", "development"))?;
    let bind_addr = parse_addr("YUBIN_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("YUBIN_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("YUBIN_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("YUBIN_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(invalid(
            "YUBIN_DB_MIN_CONNECTIONS",
            format!("must not exceed YUBIN_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }
    let db_acquire_timeout_secs = parse_u64("YUBIN_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let db_connect_retries = parse_u32("YUBIN_DB_CONNECT_RETRIES", "10")?;
    let db_connect_retry_delay_secs = parse_u64("YUBIN_DB_CONNECT_RETRY_DELAY_SECS", "2")?;

    let geoapi_base_url = or_default("YUBIN_GEOAPI_BASE_URL", DEFAULT_GEOAPI_BASE_URL);
    if !(geoapi_base_url.starts_with("http://") || geoapi_base_url.starts_with("https://")) {
        return Err(invalid(
            "YUBIN_GEOAPI_BASE_URL",
            "must be an http(s) URL".to_string(),
        ));
    }
    let geoapi_timeout_secs = parse_u64("YUBIN_GEOAPI_TIMEOUT_SECS", "10")?;
    let geoapi_max_retries = parse_u32("YUBIN_GEOAPI_MAX_RETRIES", "2")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        db_connect_retries,
        db_connect_retry_delay_secs,
        geoapi_base_url,
        geoapi_timeout_secs,
        geoapi_max_retries,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "YUBIN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
