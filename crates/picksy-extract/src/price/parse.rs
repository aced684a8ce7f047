//! Currency-shaped text matching and amount parsing.

use std::str::FromStr;
use std::sync::LazyLock;

use picksy_core::Currency;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// A digit run with `,`/`.` separators, starting and ending on a digit.
const NUM: &str = r"\d(?:[\d,.]*\d)?";

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NUM).expect("valid number regex"));

static CRORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcrores?\b").expect("valid crore regex"));
static LAKH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:lakhs?|lacs?)\b").expect("valid lakh regex"));

static USD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:US\$|\$)\s?{NUM}|{NUM}\s?USD\b")).expect("valid usd regex")
});
static CAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:CA\$|C\$)\s?{NUM}|{NUM}\s?CAD\b")).expect("valid cad regex")
});
static EUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:€|EUR)\s?{NUM}|{NUM}\s?(?:€|EUR\b)")).expect("valid eur regex")
});
static GBP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:£|GBP)\s?{NUM}|{NUM}\s?GBP\b")).expect("valid gbp regex")
});
static INR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:₹|Rs\.?|INR)\s?{NUM}(?:\s?(?:crores?|lakhs?|lacs?)\b)?|{NUM}\s?(?:INR\b|crores?\b|lakhs?\b|lacs?\b)"
    ))
    .expect("valid inr regex")
});

/// Currency-shaped pattern for `currency`.
pub(crate) fn amount_regex(currency: Currency) -> &'static Regex {
    match currency {
        Currency::Usd => &USD_RE,
        Currency::Cad => &CAD_RE,
        Currency::Eur => &EUR_RE,
        Currency::Gbp => &GBP_RE,
        Currency::Inr => &INR_RE,
    }
}

/// First currency-shaped substring of `text`, preferring the detected
/// currency's own pattern, then any other supported currency's.
pub(crate) fn first_amount(text: &str, currency: Currency) -> Option<&str> {
    if let Some(m) = amount_regex(currency).find(text) {
        return Some(m.as_str());
    }
    Currency::ALL
        .into_iter()
        .filter(|c| *c != currency)
        .filter_map(|c| amount_regex(c).find(text))
        .min_by_key(regex::Match::start)
        .map(|m| m.as_str())
}

/// Every currency-shaped substring of `text` across all currencies.
pub(crate) fn all_amounts(text: &str) -> impl Iterator<Item = &str> {
    Currency::ALL
        .into_iter()
        .flat_map(move |c| amount_regex(c).find_iter(text).map(|m| m.as_str()))
}

/// Parse the first amount in `text` into whole currency units.
///
/// For INR, `lakh`/`lac` multiply by 100,000 and `crore` by 10,000,000;
/// the multiplier is read before separators are stripped. Returns `None`
/// when `text` holds no digits, so callers can tell "no value" from a real
/// zero.
#[must_use]
pub fn parse_price_to_number(text: &str, currency: Currency) -> Option<i64> {
    let token = NUMBER_RE.find(text)?.as_str();
    let amount = Decimal::from_str(&normalize_separators(token, currency)).ok()?;

    let multiplier = if currency == Currency::Inr {
        indian_multiplier(text)
    } else {
        Decimal::ONE
    };

    amount
        .checked_mul(multiplier)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

fn indian_multiplier(text: &str) -> Decimal {
    if CRORE_RE.is_match(text) {
        Decimal::from(10_000_000)
    } else if LAKH_RE.is_match(text) {
        Decimal::from(100_000)
    } else {
        Decimal::ONE
    }
}

/// Reduce a separator-laden digit run to `digits[.digits]`.
///
/// A trailing `,dd` is a decimal comma (`1.234,56`); otherwise commas are
/// grouping. With several dots, or a single dot followed by exactly three
/// digits on a EUR page (`€1.234`), dots are grouping too.
fn normalize_separators(token: &str, currency: Currency) -> String {
    let last_sep = token.rfind([',', '.']);
    let decimal_comma = last_sep.is_some_and(|i| {
        token[i..].starts_with(',') && (2..=3).contains(&(token.len() - i))
    });
    if decimal_comma {
        return token.replace('.', "").replace(',', ".");
    }

    let no_commas = token.replace(',', "");
    let dots = no_commas.matches('.').count();
    let euro_grouping = currency == Currency::Eur
        && dots == 1
        && no_commas.rsplit('.').next().is_some_and(|tail| tail.len() == 3);
    if dots > 1 || euro_grouping {
        return no_commas.replace('.', "");
    }
    no_commas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_amounts_for_every_symbol() {
        assert_eq!(parse_price_to_number("$45.00", Currency::Usd), Some(45));
        assert_eq!(parse_price_to_number("£1,299.49", Currency::Gbp), Some(1299));
        assert_eq!(parse_price_to_number("€19.50", Currency::Eur), Some(20));
        assert_eq!(parse_price_to_number("₹1,23,456", Currency::Inr), Some(123_456));
        assert_eq!(parse_price_to_number("C$ 35.75", Currency::Cad), Some(36));
        assert_eq!(parse_price_to_number("Rs. 999", Currency::Inr), Some(999));
    }

    #[test]
    fn no_digits_is_none_not_zero() {
        assert_eq!(parse_price_to_number("Price unavailable", Currency::Usd), None);
        assert_eq!(parse_price_to_number("", Currency::Inr), None);
        assert_eq!(parse_price_to_number("$0.00", Currency::Usd), Some(0));
    }

    #[test]
    fn indian_multipliers() {
        assert_eq!(parse_price_to_number("1.5 lakh", Currency::Inr), Some(150_000));
        assert_eq!(parse_price_to_number("2 crore", Currency::Inr), Some(20_000_000));
        assert_eq!(parse_price_to_number("₹3 Lacs", Currency::Inr), Some(300_000));
        assert_eq!(parse_price_to_number("₹1.25 Crores", Currency::Inr), Some(12_500_000));
    }

    #[test]
    fn multipliers_only_apply_to_inr() {
        assert_eq!(parse_price_to_number("1.5 lakh", Currency::Usd), Some(2));
    }

    #[test]
    fn lakh_must_be_a_whole_word() {
        assert_eq!(parse_price_to_number("Black ₹1,299", Currency::Inr), Some(1299));
    }

    #[test]
    fn european_separators() {
        assert_eq!(parse_price_to_number("1.234,56 €", Currency::Eur), Some(1235));
        assert_eq!(parse_price_to_number("€1.234", Currency::Eur), Some(1234));
        assert_eq!(parse_price_to_number("19,99 €", Currency::Eur), Some(20));
        assert_eq!(parse_price_to_number("$1.234", Currency::Usd), Some(1));
    }

    #[test]
    fn trailing_dot_from_whole_part_is_ignored() {
        assert_eq!(parse_price_to_number("1,234.", Currency::Inr), Some(1234));
    }

    #[test]
    fn first_amount_prefers_detected_currency() {
        let text = "Save $5 today, now ₹1,499 only";
        assert_eq!(first_amount(text, Currency::Inr), Some("₹1,499"));
        assert_eq!(first_amount(text, Currency::Usd), Some("$5"));
    }

    #[test]
    fn first_amount_falls_back_to_earliest_other_currency() {
        assert_eq!(first_amount("was £20 now €15", Currency::Inr), Some("£20"));
        assert_eq!(first_amount("no prices here", Currency::Usd), None);
    }

    #[test]
    fn inr_amount_keeps_multiplier_word() {
        assert_eq!(
            first_amount("Ex-showroom ₹1.5 lakh onwards", Currency::Inr),
            Some("₹1.5 lakh")
        );
    }

    #[test]
    fn all_amounts_spans_currencies() {
        let found: Vec<_> = all_amounts("₹500 or $20 or 30 EUR").collect();
        assert!(found.contains(&"₹500"));
        assert!(found.contains(&"$20"));
        assert!(found.contains(&"30 EUR"));
    }
}
