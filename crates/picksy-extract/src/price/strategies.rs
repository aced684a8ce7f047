//! The price fallback chain: site fast path, scored search, whole document.
//! Each strategy is a pure function of the page; the first `Some` wins.

use std::collections::HashSet;

use picksy_core::Currency;

use super::parse::{all_amounts, first_amount, parse_price_to_number};
use super::score::{pick_best, Candidate};
use crate::document::{element_text, is_struck_through, marker_of, Page};
use crate::rules::{CompiledSite, SiteTable};

/// Everything a strategy may look at.
pub(crate) struct PriceContext<'a> {
    pub page: &'a Page,
    pub table: &'a SiteTable,
    pub site: Option<&'a CompiledSite>,
    pub currency: Currency,
}

pub(crate) type Strategy = fn(&PriceContext<'_>) -> Option<i64>;

/// Tiers in evaluation order, tagged for logging and `source_tag`.
pub(crate) const STRATEGIES: [(&str, Strategy); 3] = [
    ("site", site_fast_path),
    ("scored", scored_search),
    ("document", document_fallback),
];

/// First site price selector whose text parses to a nonzero amount.
/// Struck-through matches (list prices, M.R.P.) are skipped.
pub(crate) fn site_fast_path(ctx: &PriceContext<'_>) -> Option<i64> {
    let site = ctx.site?;
    site.price
        .iter()
        .flat_map(|sel| ctx.page.select(sel))
        .filter(|el| !is_struck_through(*el))
        .filter_map(|el| parse_price_to_number(&element_text(el), ctx.currency))
        .find(|value| *value != 0)
}

/// Score every generic and site candidate and return the winner's value.
pub(crate) fn scored_search(ctx: &PriceContext<'_>) -> Option<i64> {
    let candidates = collect_candidates(ctx);
    tracing::trace!(count = candidates.len(), "scored price candidates");
    pick_best(&candidates).map(|c| c.value)
}

/// Largest currency-shaped amount anywhere in the visible text.
pub(crate) fn document_fallback(ctx: &PriceContext<'_>) -> Option<i64> {
    let text = ctx.page.visible_text();
    all_amounts(&text)
        .filter_map(|amount| parse_price_to_number(amount, ctx.currency))
        .max()
}

fn collect_candidates(ctx: &PriceContext<'_>) -> Vec<Candidate> {
    let site_selectors = ctx.site.map_or(&[][..], |s| s.candidates.as_slice());
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for selector in ctx.table.generic_candidates().iter().chain(site_selectors) {
        for element in ctx.page.select(selector) {
            if !seen.insert(element.id()) {
                continue;
            }
            let text = element_text(element);
            let value = match first_amount(&text, ctx.currency) {
                Some(amount) => parse_price_to_number(amount, ctx.currency),
                // `<meta itemprop="price" content="1299">` and friends.
                None if text.is_empty() => element
                    .value()
                    .attr("content")
                    .and_then(|raw| parse_price_to_number(raw, ctx.currency)),
                None => None,
            };
            let Some(value) = value.filter(|v| *v != 0) else {
                continue;
            };
            candidates.push(Candidate {
                marker: marker_of(element),
                struck: is_struck_through(element),
                value,
            });
        }
    }

    candidates
}
