//! Supported storefront currencies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five currencies Picksy can detect and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Inr,
    Cad,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported currency code: \"{0}\"")]
pub struct CurrencyParseError(pub String);

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Cad,
    ];

    /// ISO 4217 code, e.g. `"INR"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Cad => "CAD",
        }
    }

    /// Display prefix used when formatting amounts.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Cad => "C$",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CurrencyParseError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("inr".parse::<Currency>(), Ok(Currency::Inr));
        assert_eq!(" Gbp ".parse::<Currency>(), Ok(Currency::Gbp));
    }

    #[test]
    fn rejects_codes_outside_allow_list() {
        let err = "JPY".parse::<Currency>().unwrap_err();
        assert_eq!(err, CurrencyParseError("JPY".to_string()));
    }

    #[test]
    fn serializes_as_upper_case_code() {
        let json = serde_json::to_string(&Currency::Cad).unwrap();
        assert_eq!(json, "\"CAD\"");
        let back: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(back, Currency::Eur);
    }

    #[test]
    fn display_matches_code() {
        for currency in Currency::ALL {
            assert_eq!(currency.to_string(), currency.code());
        }
    }
}
