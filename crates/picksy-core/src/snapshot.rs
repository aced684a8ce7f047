use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Currency;

/// Reason reported when no availability phrase or control matched.
pub const NO_RELIABLE_SIGNAL: &str = "no reliable signal";

/// One structured extraction result for a single page view.
///
/// Created fresh on every scrape and never mutated afterwards; persisting it
/// is the store's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Originating hostname, e.g. `"www.amazon.in"`.
    pub source: String,
    /// Canonical URL when the page declares one, otherwise the page URL.
    pub url: String,
    pub title: String,
    pub price: Price,
    /// Currency detected from the page itself.
    pub currency: Currency,
    /// Stored user preference, reported alongside but never used for parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_currency: Option<Currency>,
    pub availability: Availability,
    pub scraped_at: DateTime<Utc>,
}

impl ProductSnapshot {
    /// The well-formed result returned when an extraction pass faults.
    #[must_use]
    pub fn empty(source: &str, url: &str, scraped_at: DateTime<Utc>) -> Self {
        Self {
            source: source.to_string(),
            url: url.to_string(),
            title: String::new(),
            price: Price::none(),
            currency: Currency::Usd,
            preferred_currency: None,
            availability: Availability::unknown(),
            scraped_at,
        }
    }

    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price.value.is_some()
    }
}

/// Normalized amount plus its formatted display string.
///
/// `display` is non-empty exactly when `value` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Whole currency units, rounded.
    pub value: Option<i64>,
    pub display: String,
}

impl Price {
    #[must_use]
    pub fn none() -> Self {
        Self {
            value: None,
            display: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Unknown,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::InStock => write!(f, "InStock"),
            StockStatus::OutOfStock => write!(f, "OutOfStock"),
            StockStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub status: StockStatus,
    /// Human-readable explanation of which signal decided the status.
    pub reason: String,
}

impl Availability {
    #[must_use]
    pub fn new(status: StockStatus, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new(StockStatus::Unknown, NO_RELIABLE_SIGNAL)
    }
}
