//! Stock status detection.
//!
//! Site signals (explicit availability blocks, then buy-button state) are
//! consulted first. Otherwise each action zone is scanned for phrases,
//! out-of-stock before in-stock, ending with the whole document.

use picksy_core::{Availability, StockStatus};
use scraper::ElementRef;

use crate::document::{element_text, Page};
use crate::rules::{CompiledSite, SiteTable};

/// Checked before [`IN_STOCK_PHRASES`]. Every entry must describe the
/// product itself, never a delivery option or a price alert.
const OUT_OF_STOCK_PHRASES: [&str; 7] = [
    "out of stock",
    "currently unavailable",
    "currently not available",
    "sold out",
    "temporarily unavailable",
    "no longer available",
    "notify me when available",
];

const IN_STOCK_PHRASES: [&str; 8] = [
    "in stock",
    "add to cart",
    "add to bag",
    "add to basket",
    "buy now",
    "only a few left",
    "left in stock",
    "available now",
];

#[must_use]
pub fn detect_availability(
    page: &Page,
    table: &SiteTable,
    site: Option<&CompiledSite>,
) -> Availability {
    if let Some(found) = site.and_then(|s| site_signal(page, s)) {
        return found;
    }

    for (label, selector) in table.action_zones() {
        let zone_text = page
            .select(selector)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(found) = match_phrases(&zone_text, label) {
            return found;
        }
    }

    match_phrases(&page.visible_text(), "document").unwrap_or_else(Availability::unknown)
}

fn site_signal(page: &Page, site: &CompiledSite) -> Option<Availability> {
    for selector in &site.availability_text {
        for element in page.select(selector) {
            let label = format!("{} availability text", site.name);
            if let Some(found) = match_phrases(&element_text(element), &label) {
                return Some(found);
            }
        }
    }

    let buttons: Vec<ElementRef<'_>> = site
        .buy_buttons
        .iter()
        .flat_map(|sel| page.select(sel))
        .collect();
    if buttons.is_empty() {
        return None;
    }

    if buttons.iter().any(|b| !is_disabled(*b)) {
        Some(Availability::new(
            StockStatus::InStock,
            format!("{} purchase control enabled", site.name),
        ))
    } else {
        Some(Availability::new(
            StockStatus::OutOfStock,
            format!("{} purchase control disabled", site.name),
        ))
    }
}

/// Out-of-stock phrases are checked before in-stock ones.
fn match_phrases(text: &str, zone: &str) -> Option<Availability> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    if let Some(phrase) = OUT_OF_STOCK_PHRASES.iter().find(|p| lower.contains(*p)) {
        return Some(Availability::new(
            StockStatus::OutOfStock,
            format!("\"{phrase}\" in {zone}"),
        ));
    }
    if let Some(phrase) = IN_STOCK_PHRASES.iter().find(|p| lower.contains(*p)) {
        return Some(Availability::new(
            StockStatus::InStock,
            format!("\"{phrase}\" in {zone}"),
        ));
    }
    None
}

fn is_disabled(element: ElementRef<'_>) -> bool {
    let value = element.value();
    value.attr("disabled").is_some()
        || value
            .attr("aria-disabled")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        || value
            .attr("class")
            .is_some_and(|c| c.to_ascii_lowercase().contains("disabled"))
}

#[cfg(test)]
mod tests {
    use picksy_core::snapshot::NO_RELIABLE_SIGNAL;

    use super::*;

    fn detect(html: &str, url: &str) -> Availability {
        let table = SiteTable::builtin().unwrap();
        let page = Page::parse(html, url);
        let site = table.site_for(page.hostname());
        detect_availability(&page, &table, site)
    }

    #[test]
    fn site_text_block_decides_first() {
        let html = r#"<html><body>
            <div id="availability"><span>Currently unavailable.</span></div>
            <input id="add-to-cart-button" type="submit">
        </body></html>"#;
        let found = detect(html, "https://www.amazon.in/dp/B0");
        assert_eq!(found.status, StockStatus::OutOfStock);
        assert!(found.reason.contains("currently unavailable"));
    }

    #[test]
    fn enabled_buy_button_means_in_stock() {
        let html = r#"<html><body><button class="pdp-add-to-bag">ADD</button></body></html>"#;
        let found = detect(html, "https://www.myntra.com/p/1");
        assert_eq!(found.status, StockStatus::InStock);
        assert_eq!(found.reason, "myntra purchase control enabled");
    }

    #[test]
    fn disabled_buy_buttons_mean_out_of_stock() {
        let html = r#"<html><body>
            <input id="add-to-cart-button" disabled>
            <input id="buy-now-button" aria-disabled="true">
        </body></html>"#;
        let found = detect(html, "https://www.amazon.com/dp/B0");
        assert_eq!(found.status, StockStatus::OutOfStock);
    }

    #[test]
    fn out_of_stock_phrase_beats_in_stock_in_same_zone() {
        let html = r#"<html><body>
            <div id="buybox">Add to cart - Sold out in your size</div>
        </body></html>"#;
        let found = detect(html, "https://shop.example");
        assert_eq!(found.status, StockStatus::OutOfStock);
        assert_eq!(found.reason, "\"sold out\" in #buybox");
    }

    #[test]
    fn delivery_and_alert_lines_do_not_mean_out_of_stock() {
        let html = r#"<html><body>
            <div id="buybox"><span>In stock</span> <button>Add to Cart</button>
                <p>Cash on Delivery not available</p></div>
        </body></html>"#;
        let found = detect(html, "https://shop.example");
        assert_eq!(found.status, StockStatus::InStock);
        assert_eq!(found.reason, "\"in stock\" in #buybox");

        let html = r#"<html><body>
            <div class="buy-box">In Stock. <a>Notify me when the price drops</a></div>
        </body></html>"#;
        assert_eq!(detect(html, "https://shop.example").status, StockStatus::InStock);
    }

    #[test]
    fn restock_alert_means_out_of_stock() {
        let html = r#"<html><body>
            <div id="buybox"><button>Notify me when available</button></div>
        </body></html>"#;
        let found = detect(html, "https://shop.example");
        assert_eq!(found.status, StockStatus::OutOfStock);
        assert_eq!(found.reason, "\"notify me when available\" in #buybox");
    }

    #[test]
    fn earlier_zone_wins_over_document() {
        let html = r#"<html><body>
            <div id="rightCol">In Stock</div>
            <div class="recommendations">Out of stock: Similar item</div>
        </body></html>"#;
        let found = detect(html, "https://shop.example");
        assert_eq!(found.status, StockStatus::InStock);
        assert!(found.reason.ends_with("#rightCol"));
    }

    #[test]
    fn document_scan_is_last_resort() {
        let html = "<html><body><p>Hurry, only a few left!</p></body></html>";
        let found = detect(html, "https://shop.example");
        assert_eq!(found.status, StockStatus::InStock);
        assert!(found.reason.ends_with("document"));
    }

    #[test]
    fn no_signal_is_unknown_with_reason() {
        let found = detect("<html><body><p>Specs</p></body></html>", "https://shop.example");
        assert_eq!(found.status, StockStatus::Unknown);
        assert_eq!(found.reason, NO_RELIABLE_SIGNAL);
        assert!(!found.reason.is_empty());
    }
}
