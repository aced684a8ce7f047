use std::sync::LazyLock;

use regex::Regex;

static PROMO_FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)add to your order|bank offer|buy now").expect("valid promo regex")
});

/// Strips promotional fragments that storefronts splice into titles and
/// collapses whitespace.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    PROMO_FRAGMENT_RE
        .replace_all(title, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
