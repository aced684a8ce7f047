//! Data-driven storefront knowledge: hostname → currency and per-site
//! selector lists. New sites are added to YAML, not to code.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Currency};

const BUILTIN_SITES_YAML: &str = include_str!("sites.yaml");

/// Maps a storefront domain to its currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    /// Registrable domain such as `"amazon.co.uk"`. Matches the host itself
    /// and any subdomain, never a longer suffix (`amazon.com` does not match
    /// `amazon.com.au`).
    pub pattern: String,
    pub currency: Currency,
}

impl RegionRule {
    #[must_use]
    pub fn matches(&self, hostname: &str) -> bool {
        let host = hostname.trim_end_matches('.').to_ascii_lowercase();
        let pattern = self.pattern.trim().to_ascii_lowercase();
        host == pattern
            || host
                .strip_suffix(pattern.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
    }
}

/// Site-agnostic selectors shared by every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRules {
    /// Elements considered during scored price search on any site.
    #[serde(default)]
    pub candidates: Vec<String>,
    /// Purchase-related regions scanned for availability phrases, in
    /// priority order. The whole document is always scanned last.
    #[serde(default)]
    pub action_zones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRules {
    /// Blocks whose text states availability explicitly.
    #[serde(default)]
    pub text: Vec<String>,
    /// Buy / add-to-cart controls; enabled means in stock.
    #[serde(default)]
    pub buy_buttons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRule {
    pub name: String,
    /// Hostname substrings identifying the site, e.g. `"amazon."`.
    pub domains: Vec<String>,
    /// Ordered title selectors.
    #[serde(default)]
    pub title: Vec<String>,
    /// Ordered fast-path price selectors.
    #[serde(default)]
    pub price: Vec<String>,
    /// Extra candidates fed into scored search alongside the generic ones.
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default)]
    pub availability: AvailabilityRules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitesFile {
    #[serde(default)]
    pub regions: Vec<RegionRule>,
    #[serde(default)]
    pub generic: GenericRules,
    #[serde(default)]
    pub sites: Vec<SiteRule>,
}

impl SitesFile {
    /// Currency of the first region whose domain `hostname` belongs to.
    #[must_use]
    pub fn currency_for(&self, hostname: &str) -> Option<Currency> {
        self.regions
            .iter()
            .find(|r| r.matches(hostname))
            .map(|r| r.currency)
    }
}

/// The site table compiled into the binary.
///
/// # Errors
///
/// Returns `ConfigError` if the embedded YAML fails to parse or validate.
pub fn builtin_sites() -> Result<SitesFile, ConfigError> {
    parse_sites(BUILTIN_SITES_YAML)
}

/// Load and validate a site table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sites(&content)
}

/// Parse and validate a site table from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text fails to parse or validate.
pub fn parse_sites(yaml: &str) -> Result<SitesFile, ConfigError> {
    let sites_file: SitesFile = serde_yaml::from_str(yaml)?;
    validate_sites(&sites_file)?;
    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for region in &sites_file.regions {
        if region.pattern.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "region for {} has an empty pattern",
                region.currency
            )));
        }
    }

    for site in &sites_file.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(site.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site name: '{}'",
                site.name
            )));
        }

        if site.domains.iter().all(|d| d.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "site '{}' has no domain patterns",
                site.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
