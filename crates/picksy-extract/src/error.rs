use picksy_core::ConfigError;
use thiserror::Error;

/// Failures while preparing an [`crate::Extractor`]. A running extraction
/// pass never produces one of these.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector \"{selector}\" for {site}: {reason}")]
    InvalidSelector {
        site: String,
        selector: String,
        reason: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
