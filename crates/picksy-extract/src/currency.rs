//! Storefront currency detection.

use picksy_core::Currency;

use crate::document::Page;
use crate::rules::SiteTable;

/// Metadata keys that may carry an ISO currency code.
const CURRENCY_META_KEYS: [&str; 3] = ["currency", "product:price:currency", "priceCurrency"];

/// Detect the page's currency: region table, then visible symbols, then
/// metadata, else USD.
///
/// Pure function of the page; repeated calls on the same page agree.
#[must_use]
pub fn detect_currency(page: &Page, table: &SiteTable) -> Currency {
    if let Some(currency) = table.currency_for(page.hostname()) {
        return currency;
    }

    if let Some(currency) = currency_from_symbols(&page.visible_text()) {
        return currency;
    }

    CURRENCY_META_KEYS
        .iter()
        .filter_map(|key| page.meta_content(key))
        .find_map(|code| code.parse::<Currency>().ok())
        .unwrap_or(Currency::Usd)
}

/// Symbol scan. `₹` suppresses `$` so unrelated dollar mentions on rupee
/// pages do not flip the result.
fn currency_from_symbols(text: &str) -> Option<Currency> {
    if text.contains('₹') {
        return Some(Currency::Inr);
    }
    if text.contains('£') {
        return Some(Currency::Gbp);
    }
    if text.contains('€') {
        return Some(Currency::Eur);
    }
    if text.contains("C$") || text.contains("CA$") {
        return Some(Currency::Cad);
    }
    if text.contains('$') {
        return Some(Currency::Usd);
    }
    None
}
