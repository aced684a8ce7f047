use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use chrono::{DateTime, Utc};
use picksy_core::{Currency, ProductSnapshot};

use crate::availability::detect_availability;
use crate::currency::detect_currency;
use crate::document::{hostname_of, Page};
use crate::error::ExtractError;
use crate::price::extract_price;
use crate::rules::SiteTable;
use crate::title::resolve_title;

/// Runs extraction passes against a compiled [`SiteTable`].
#[derive(Debug)]
pub struct Extractor {
    table: SiteTable,
}

impl Extractor {
    #[must_use]
    pub fn new(table: SiteTable) -> Self {
        Self { table }
    }

    /// Extractor over the site table at `sites_path`, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the table cannot be loaded or compiled.
    pub fn from_sites_path(sites_path: Option<&Path>) -> Result<Self, ExtractError> {
        SiteTable::load(sites_path).map(Self::new)
    }

    #[must_use]
    pub fn table(&self) -> &SiteTable {
        &self.table
    }

    /// One extraction pass over `html` loaded at `url`.
    ///
    /// Always returns a well-formed snapshot. `preferred` is reported
    /// as-is and does not influence parsing.
    #[must_use]
    pub fn extract(
        &self,
        html: &str,
        url: &str,
        preferred: Option<Currency>,
        scraped_at: DateTime<Utc>,
    ) -> ProductSnapshot {
        guarded_pass(url, preferred, scraped_at, || {
            let page = Page::parse(html, url);
            self.extract_page(&page, preferred, scraped_at)
        })
    }

    /// Extraction over an already parsed page.
    #[must_use]
    pub fn extract_page(
        &self,
        page: &Page,
        preferred: Option<Currency>,
        scraped_at: DateTime<Utc>,
    ) -> ProductSnapshot {
        let site = self.table.site_for(page.hostname());
        let currency = detect_currency(page, &self.table);
        let title = resolve_title(page, site);
        let price = extract_price(page, &self.table, site, currency);
        let availability = detect_availability(page, &self.table, site);

        tracing::info!(
            source = page.hostname(),
            site = ?site.map(|s| s.name.as_str()),
            %currency,
            price = ?price.value,
            price_tier = %price.source_tag,
            status = %availability.status,
            "scraped product page"
        );

        ProductSnapshot {
            source: page.hostname().to_string(),
            url: page.canonical_url(),
            title,
            price: price.into_price(),
            currency,
            preferred_currency: preferred,
            availability,
            scraped_at,
        }
    }
}

/// Run `pass`, replacing a panic with the empty snapshot for `url`.
fn guarded_pass<F>(
    url: &str,
    preferred: Option<Currency>,
    scraped_at: DateTime<Utc>,
    pass: F,
) -> ProductSnapshot
where
    F: FnOnce() -> ProductSnapshot,
{
    catch_unwind(AssertUnwindSafe(pass)).unwrap_or_else(|_| {
        tracing::error!(url, "extraction pass faulted, returning empty snapshot");
        let mut snapshot = ProductSnapshot::empty(&hostname_of(url), url, scraped_at);
        snapshot.preferred_currency = preferred;
        snapshot
    })
}
