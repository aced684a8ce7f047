//! Per-currency display formatting.

use picksy_core::Currency;

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;
const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Format `value` (whole units) for display in `currency`.
///
/// Large magnitudes are compacted: `K`/`M` for USD, EUR, GBP and CAD;
/// `L` (lakh) and `Cr` (crore) for INR. Smaller amounts get the symbol
/// prefix and locale digit grouping.
#[must_use]
pub fn format_price(value: i64, currency: Currency) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    let body = match currency {
        Currency::Inr => format_inr(magnitude),
        Currency::Usd | Currency::Eur | Currency::Gbp | Currency::Cad => format_western(magnitude),
    };
    format!("{sign}{}{body}", currency.symbol())
}

fn format_inr(value: u64) -> String {
    if value >= CRORE {
        compact(value, CRORE, "Cr")
    } else if value >= LAKH {
        let lakhs = compact(value, LAKH, "L");
        // 99,99,999 rounds to 100L; show it as crore instead.
        if lakhs.starts_with("100L") {
            compact(value, CRORE, "Cr")
        } else {
            lakhs
        }
    } else {
        group_indian(value)
    }
}

fn format_western(value: u64) -> String {
    if value >= MILLION {
        compact(value, MILLION, "M")
    } else if value >= THOUSAND {
        let thousands = compact(value, THOUSAND, "K");
        if thousands.starts_with("1000K") {
            compact(value, MILLION, "M")
        } else {
            thousands
        }
    } else {
        group_thousands(value)
    }
}

/// `value / unit` to two decimals, trailing zeros trimmed, plus `suffix`.
fn compact(value: u64, unit: u64, suffix: &str) -> String {
    // Prices are far below 2^52, so the float division is exact enough.
    #[allow(clippy::cast_precision_loss)]
    let scaled = value as f64 / unit as f64;
    format!("{}{suffix}", trim_fraction(&format!("{scaled:.2}")))
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Indian grouping: last three digits, then pairs (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_lakh_and_crore_suffixes() {
        assert_eq!(format_price(1_500_000, Currency::Inr), "₹15L");
        assert_eq!(format_price(150_000, Currency::Inr), "₹1.5L");
        assert_eq!(format_price(12_000_000, Currency::Inr), "₹1.2Cr");
        assert_eq!(format_price(9_999_999, Currency::Inr), "₹1Cr");
    }

    #[test]
    fn inr_below_lakh_uses_indian_grouping() {
        assert_eq!(format_price(1234, Currency::Inr), "₹1,234");
        assert_eq!(format_price(99_999, Currency::Inr), "₹99,999");
        assert_eq!(format_price(999, Currency::Inr), "₹999");
    }

    #[test]
    fn western_thousand_and_million_suffixes() {
        assert_eq!(format_price(1500, Currency::Usd), "$1.5K");
        assert_eq!(format_price(2000, Currency::Gbp), "£2K");
        assert_eq!(format_price(1234, Currency::Eur), "€1.23K");
        assert_eq!(format_price(2_500_000, Currency::Cad), "C$2.5M");
        assert_eq!(format_price(999_999, Currency::Usd), "$1M");
    }

    #[test]
    fn small_amounts_keep_symbol_prefix() {
        assert_eq!(format_price(45, Currency::Usd), "$45");
        assert_eq!(format_price(0, Currency::Eur), "€0");
    }

    #[test]
    fn trims_trailing_zero_fraction() {
        assert_eq!(trim_fraction("2.00"), "2");
        assert_eq!(trim_fraction("2.50"), "2.5");
        assert_eq!(trim_fraction("100"), "100");
    }

    #[test]
    fn grouping_helpers() {
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(12_345), "12,345");
    }
}
