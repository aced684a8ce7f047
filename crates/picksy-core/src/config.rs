use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, Currency};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_currency = |var: &str, default: &str| -> Result<Currency, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<Currency>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PICKSY_ENV", "development"));
    let log_level = or_default("PICKSY_LOG_LEVEL", "info");
    let sites_path = lookup("PICKSY_SITES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let store_path = PathBuf::from(or_default("PICKSY_STORE_PATH", "./picksy-store.json"));

    let history_limit = parse_usize("PICKSY_HISTORY_LIMIT", "50")?;
    if history_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PICKSY_HISTORY_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let default_currency = parse_currency("PICKSY_DEFAULT_CURRENCY", "INR")?;

    Ok(AppConfig {
        env,
        log_level,
        sites_path,
        store_path,
        history_limit,
        default_currency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
