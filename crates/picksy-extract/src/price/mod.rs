//! Price extraction: parsing, formatting, scoring and the tiered search.

mod format;
mod parse;
mod score;
mod strategies;

pub use format::format_price;
pub use parse::parse_price_to_number;
pub use score::{pick_best, repetition_bonus, score_candidate, Candidate};

use picksy_core::{Currency, Price};

use crate::document::Page;
use crate::rules::{CompiledSite, SiteTable};
use strategies::{PriceContext, STRATEGIES};

/// Tag reported when every tier came up empty.
pub const NO_PRICE_SOURCE: &str = "none";

/// Result of the price search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceReading {
    pub value: Option<i64>,
    pub display: String,
    /// Which tier produced `value`: `site`, `scored`, `document` or `none`.
    pub source_tag: String,
}

impl PriceReading {
    #[must_use]
    pub fn into_price(self) -> Price {
        Price {
            value: self.value,
            display: self.display,
        }
    }
}

/// Run the tiers in order and format the first amount found.
#[must_use]
pub fn extract_price(
    page: &Page,
    table: &SiteTable,
    site: Option<&CompiledSite>,
    currency: Currency,
) -> PriceReading {
    let ctx = PriceContext {
        page,
        table,
        site,
        currency,
    };

    for (tag, strategy) in STRATEGIES {
        if let Some(value) = strategy(&ctx) {
            tracing::debug!(tier = tag, value, %currency, "price found");
            return PriceReading {
                value: Some(value),
                display: format_price(value, currency),
                source_tag: tag.to_string(),
            };
        }
        tracing::trace!(tier = tag, "price tier missed");
    }

    PriceReading {
        value: None,
        display: String::new(),
        source_tag: NO_PRICE_SOURCE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(html: &str, url: &str, currency: Currency) -> PriceReading {
        let table = SiteTable::builtin().unwrap();
        let page = Page::parse(html, url);
        let site = table.site_for(page.hostname());
        extract_price(&page, &table, site, currency)
    }

    #[test]
    fn tiers_run_in_order() {
        let site_hit = read(
            r#"<html><body><div class="Nx9bqj CxhGGd">₹54,999</div></body></html>"#,
            "https://www.flipkart.com/p",
            Currency::Inr,
        );
        assert_eq!(site_hit.source_tag, "site");
        assert_eq!(site_hit.value, Some(54_999));

        let scored_hit = read(
            r#"<html><body><span class="price">$1,050</span></body></html>"#,
            "https://shop.example",
            Currency::Usd,
        );
        assert_eq!(scored_hit.source_tag, "scored");

        let document_hit = read(
            "<html><body><p>Only $75 today</p></body></html>",
            "https://shop.example",
            Currency::Usd,
        );
        assert_eq!(document_hit.source_tag, "document");
        assert_eq!(document_hit.display, "$75");
    }

    #[test]
    fn no_price_anywhere() {
        let reading = read(
            "<html><body><p>Coming soon</p></body></html>",
            "https://shop.example",
            Currency::Usd,
        );
        assert_eq!(reading.value, None);
        assert_eq!(reading.display, "");
        assert_eq!(reading.source_tag, NO_PRICE_SOURCE);
    }

    #[test]
    fn display_present_iff_value_present() {
        let reading = read(
            r#"<html><body><span class="price">£12</span></body></html>"#,
            "https://shop.example",
            Currency::Gbp,
        );
        assert_eq!(reading.value.is_some(), !reading.display.is_empty());
        let price = reading.into_price();
        assert_eq!(price.display, "£12");
    }
}
