use std::sync::LazyLock;

use scraper::Selector;

use crate::document::Page;
use crate::normalize::sanitize_title;
use crate::rules::CompiledSite;

static FIRST_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));

/// Best available product title: site selectors, `og:title`,
/// `twitter:title`, first `<h1>`, `<title>`, else empty.
#[must_use]
pub fn resolve_title(page: &Page, site: Option<&CompiledSite>) -> String {
    let raw = site
        .and_then(|s| s.title.iter().find_map(|sel| page.first_text(sel)))
        .or_else(|| page.meta_content("og:title"))
        .or_else(|| page.meta_content("twitter:title"))
        .or_else(|| page.first_text(&FIRST_HEADING))
        .or_else(|| page.document_title())
        .unwrap_or_default();
    sanitize_title(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SiteTable;

    fn title_of(html: &str, url: &str) -> String {
        let table = SiteTable::builtin().unwrap();
        let page = Page::parse(html, url);
        resolve_title(&page, table.site_for(page.hostname()))
    }

    #[test]
    fn site_selector_wins_over_meta() {
        let html = r#"<html><head><meta property="og:title" content="OG"></head>
            <body><span id="productTitle">  Echo Dot (5th Gen)  </span></body></html>"#;
        assert_eq!(title_of(html, "https://www.amazon.in/dp/B0"), "Echo Dot (5th Gen)");
    }

    #[test]
    fn og_title_used_when_site_selector_missing() {
        let html = r#"<html><head><meta property="og:title" content="OG Title">
            <meta name="twitter:title" content="TW"></head><body><h1>H1</h1></body></html>"#;
        assert_eq!(title_of(html, "https://www.amazon.in/dp/B0"), "OG Title");
    }

    #[test]
    fn twitter_then_heading_then_title_tag() {
        let tw = r#"<html><head><meta name="twitter:title" content="TW Title"></head><body><h1>H1</h1></body></html>"#;
        assert_eq!(title_of(tw, "https://shop.example"), "TW Title");

        let h1 = "<html><head><title>Tab</title></head><body><h1>Heading</h1></body></html>";
        assert_eq!(title_of(h1, "https://shop.example"), "Heading");

        let tab = "<html><head><title>Tab Title</title></head><body></body></html>";
        assert_eq!(title_of(tab, "https://shop.example"), "Tab Title");
    }

    #[test]
    fn empty_document_yields_empty_title() {
        assert_eq!(title_of("", "https://shop.example"), "");
    }

    #[test]
    fn flipkart_second_selector_is_tried() {
        let html = r#"<html><body><h1 class="_35KyD6">Redmi Note 13</h1></body></html>"#;
        assert_eq!(title_of(html, "https://www.flipkart.com/p"), "Redmi Note 13");
    }
}
