//! A parsed product page plus the text helpers every extractor shares.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static TITLE_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static META_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("valid meta selector"));
static CANONICAL_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("link[rel='canonical']").expect("valid canonical selector"));
static BODY_TAG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Elements whose text never renders.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

pub struct Page {
    html: Html,
    url: String,
    hostname: String,
}

impl Page {
    /// Parse `html` as the document loaded at `url`.
    #[must_use]
    pub fn parse(html: &str, url: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            url: url.to_string(),
            hostname: hostname_of(url),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lower-cased host, empty when the URL does not parse.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> {
        self.html.select(selector)
    }

    /// Text of the first element matching `selector` that has any.
    #[must_use]
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.select(selector)
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    /// `content` of the first `<meta>` whose `name`, `property` or
    /// `itemprop` equals `key` (case-insensitive).
    #[must_use]
    pub fn meta_content(&self, key: &str) -> Option<String> {
        self.select(&META_TAG)
            .filter(|meta| {
                ["name", "property", "itemprop"].iter().any(|attr| {
                    meta.value()
                        .attr(attr)
                        .is_some_and(|v| v.trim().eq_ignore_ascii_case(key))
                })
            })
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    }

    #[must_use]
    pub fn document_title(&self) -> Option<String> {
        self.first_text(&TITLE_TAG)
    }

    /// `<link rel="canonical">` target, otherwise the page URL.
    #[must_use]
    pub fn canonical_url(&self) -> String {
        self.select(&CANONICAL_LINK)
            .filter_map(|link| link.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map_or_else(|| self.url.clone(), str::to_string)
    }

    /// Whitespace-collapsed rendered text of the body.
    #[must_use]
    pub fn visible_text(&self) -> String {
        let root = self
            .html
            .select(&BODY_TAG)
            .next()
            .unwrap_or_else(|| self.html.root_element());
        element_text(root)
    }
}

/// Lower-cased hostname of `url`, or an empty string.
#[must_use]
pub fn hostname_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_default()
}

/// Rendered text of `element`, skipping script-like children and collapsing
/// whitespace runs to single spaces.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_visible_text(element, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !HIDDEN_TAGS.contains(&child_element.value().name()) {
                push_visible_text(child_element, out);
            }
        }
    }
}

/// Lower-cased `id` and `class` of `element`, space separated.
#[must_use]
pub fn marker_of(element: ElementRef<'_>) -> String {
    let value = element.value();
    [value.attr("id"), value.attr("class")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `element` renders struck through.
///
/// Static markup carries no computed style, so this looks for the markers a
/// browser would have resolved: `<s>`/`<del>`/`<strike>`, an inline
/// `text-decoration: line-through`, or Amazon's `data-a-strike`, on the
/// element or any ancestor.
#[must_use]
pub fn is_struck_through(element: ElementRef<'_>) -> bool {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .any(|e| {
            let value = e.value();
            matches!(value.name(), "s" | "del" | "strike")
                || value
                    .attr("data-a-strike")
                    .is_some_and(|v| !v.eq_ignore_ascii_case("false"))
                || value.attr("style").is_some_and(style_has_line_through)
        })
}

fn style_has_line_through(style: &str) -> bool {
    style.split(';').any(|decl| {
        decl.split_once(':').is_some_and(|(prop, val)| {
            prop.trim().to_ascii_lowercase().starts_with("text-decoration")
                && val.to_ascii_lowercase().contains("line-through")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(page: &'a Page, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).unwrap();
        page.html.select(&selector).next().unwrap()
    }

    #[test]
    fn hostname_is_lower_cased() {
        assert_eq!(hostname_of("https://WWW.Amazon.IN/dp/B0"), "www.amazon.in");
        assert_eq!(hostname_of("not a url"), "");
    }

    #[test]
    fn visible_text_skips_scripts_and_collapses_whitespace() {
        let page = Page::parse(
            "<html><body><p>Hello\n   world</p><script>var p = '$99';</script><style>.x{}</style></body></html>",
            "https://example.com",
        );
        assert_eq!(page.visible_text(), "Hello world");
    }

    #[test]
    fn meta_content_matches_name_property_and_itemprop() {
        let page = Page::parse(
            r#"<html><head>
                <meta property="og:title" content=" OG Title ">
                <meta name="twitter:title" content="TW Title">
                <meta itemprop="priceCurrency" content="GBP">
            </head><body></body></html>"#,
            "https://example.com",
        );
        assert_eq!(page.meta_content("og:title").as_deref(), Some("OG Title"));
        assert_eq!(page.meta_content("twitter:title").as_deref(), Some("TW Title"));
        assert_eq!(page.meta_content("pricecurrency").as_deref(), Some("GBP"));
        assert!(page.meta_content("description").is_none());
    }

    #[test]
    fn canonical_url_falls_back_to_page_url() {
        let with = Page::parse(
            r#"<html><head><link rel="canonical" href="https://shop.example/p/1"></head></html>"#,
            "https://shop.example/p/1?ref=abc",
        );
        assert_eq!(with.canonical_url(), "https://shop.example/p/1");

        let without = Page::parse("<html></html>", "https://shop.example/p/2?ref=abc");
        assert_eq!(without.canonical_url(), "https://shop.example/p/2?ref=abc");
    }

    #[test]
    fn strike_detected_from_tag_style_and_ancestor_attr() {
        let page = Page::parse(
            r#"<html><body>
                <del><span id="a">$10</span></del>
                <span id="b" style="color: red; text-decoration: line-through">$20</span>
                <span class="a-price" data-a-strike="true"><span id="c">$30</span></span>
                <span id="d" style="text-decoration: underline">$40</span>
            </body></html>"#,
            "https://example.com",
        );
        assert!(is_struck_through(first(&page, "#a")));
        assert!(is_struck_through(first(&page, "#b")));
        assert!(is_struck_through(first(&page, "#c")));
        assert!(!is_struck_through(first(&page, "#d")));
    }

    #[test]
    fn marker_joins_id_and_class() {
        let page = Page::parse(
            r#"<html><body><span id="priceblock_DealPrice" class="a-color-price Big">x</span></body></html>"#,
            "https://example.com",
        );
        assert_eq!(
            marker_of(first(&page, "span")),
            "priceblock_dealprice a-color-price big"
        );
    }
}
