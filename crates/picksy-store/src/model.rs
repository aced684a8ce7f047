use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use picksy_core::{Currency, ProductSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned to saved items when none is given.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Popup toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Hide out-of-stock items in saved listings.
    #[serde(default)]
    pub oos_toggle: bool,
}

/// A snapshot the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: Uuid,
    pub category: String,
    pub saved_at: DateTime<Utc>,
    pub snapshot: ProductSnapshot,
}

/// One observed price for a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub value: i64,
    pub display: String,
    pub scraped_at: DateTime<Utc>,
}

impl PricePoint {
    /// `None` for snapshots that carry no price.
    #[must_use]
    pub fn from_snapshot(snapshot: &ProductSnapshot) -> Option<Self> {
        snapshot.price.value.map(|value| Self {
            value,
            display: snapshot.price.display.clone(),
            scraped_at: snapshot.scraped_at,
        })
    }
}

/// Everything persisted in the store file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub settings: Settings,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scrape: Option<ProductSnapshot>,
    #[serde(default)]
    pub saved: Vec<SavedItem>,
    /// Price history keyed by snapshot URL, oldest first.
    #[serde(default)]
    pub history: BTreeMap<String, Vec<PricePoint>>,
}

impl StoreState {
    /// Empty state preferring `currency`.
    #[must_use]
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            settings: Settings::default(),
            currency,
            last_scrape: None,
            saved: Vec::new(),
            history: BTreeMap::new(),
        }
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::with_currency(Currency::Inr)
    }
}
