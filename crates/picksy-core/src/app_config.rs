use std::path::PathBuf;

use crate::Currency;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Replaces the built-in site table when set.
    pub sites_path: Option<PathBuf>,
    pub store_path: PathBuf,
    /// Maximum price-history points kept per URL.
    pub history_limit: usize,
    /// Preference seeded into a freshly created store.
    pub default_currency: Currency,
}
