//! Selector strings from a [`SitesFile`] compiled once into
//! [`scraper::Selector`]s.

use std::path::Path;

use picksy_core::{builtin_sites, load_sites, Currency, SiteRule, SitesFile};
use scraper::Selector;

use crate::error::ExtractError;

/// Selectors for one storefront, in priority order.
#[derive(Debug)]
pub struct CompiledSite {
    pub name: String,
    domains: Vec<String>,
    pub title: Vec<Selector>,
    pub price: Vec<Selector>,
    pub candidates: Vec<Selector>,
    pub availability_text: Vec<Selector>,
    pub buy_buttons: Vec<Selector>,
}

impl CompiledSite {
    fn compile(rule: &SiteRule) -> Result<Self, ExtractError> {
        let name = rule.name.as_str();
        Ok(Self {
            name: rule.name.clone(),
            domains: rule.domains.clone(),
            title: compile_all(name, &rule.title)?,
            price: compile_all(name, &rule.price)?,
            candidates: compile_all(name, &rule.candidates)?,
            availability_text: compile_all(name, &rule.availability.text)?,
            buy_buttons: compile_all(name, &rule.availability.buy_buttons)?,
        })
    }

    fn matches(&self, hostname: &str) -> bool {
        self.domains
            .iter()
            .any(|d| !d.is_empty() && hostname.contains(&d.to_ascii_lowercase()))
    }
}

#[derive(Debug)]
pub struct SiteTable {
    rules: SitesFile,
    sites: Vec<CompiledSite>,
    generic_candidates: Vec<Selector>,
    action_zones: Vec<(String, Selector)>,
}

impl SiteTable {
    /// Compile every selector in `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidSelector`] for the first selector that
    /// does not parse.
    pub fn compile(rules: SitesFile) -> Result<Self, ExtractError> {
        let sites = rules
            .sites
            .iter()
            .map(CompiledSite::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let generic_candidates = compile_all("generic", &rules.generic.candidates)?;
        let action_zones = rules
            .generic
            .action_zones
            .iter()
            .map(|css| compile_one("generic", css).map(|sel| (css.clone(), sel)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            sites = sites.len(),
            regions = rules.regions.len(),
            "compiled site table"
        );

        Ok(Self {
            rules,
            sites,
            generic_candidates,
            action_zones,
        })
    }

    /// The table embedded in `picksy-core`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the embedded table is malformed.
    pub fn builtin() -> Result<Self, ExtractError> {
        Self::compile(builtin_sites()?)
    }

    /// Load from `path` when given, otherwise use the built-in table.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the file cannot be loaded or compiled.
    pub fn load(path: Option<&Path>) -> Result<Self, ExtractError> {
        match path {
            Some(path) => Self::compile(load_sites(path)?),
            None => Self::builtin(),
        }
    }

    #[must_use]
    pub fn site_for(&self, hostname: &str) -> Option<&CompiledSite> {
        let host = hostname.to_ascii_lowercase();
        self.sites.iter().find(|s| s.matches(&host))
    }

    #[must_use]
    pub fn currency_for(&self, hostname: &str) -> Option<Currency> {
        self.rules.currency_for(hostname)
    }

    #[must_use]
    pub fn generic_candidates(&self) -> &[Selector] {
        &self.generic_candidates
    }

    /// Availability zones as `(label, selector)` pairs, highest priority first.
    #[must_use]
    pub fn action_zones(&self) -> &[(String, Selector)] {
        &self.action_zones
    }
}

fn compile_all(site: &str, selectors: &[String]) -> Result<Vec<Selector>, ExtractError> {
    selectors.iter().map(|css| compile_one(site, css)).collect()
}

fn compile_one(site: &str, css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        site: site.to_string(),
        selector: css.to_string(),
        reason: format!("{e:?}"),
    })
}
