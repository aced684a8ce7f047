//! Message envelope exchanged between the popup, background relay and the
//! extractor. Every message is a JSON object tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::{Currency, ProductSnapshot};

/// The loaded document a scrape runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePayload {
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Run one extraction pass on `page`.
    PicksyScrape { page: PagePayload },
    /// Popup asks the relay to scrape the active page.
    PicksyScrapeRequest { page: PagePayload },
    PicksyScrapeResult { payload: ProductSnapshot },
    /// Sent once a result has been persisted as the last scrape.
    PicksyScrapeResultBroadcast { payload: ProductSnapshot },
    PicksyCurrencyChange {
        #[serde(default)]
        currency: Option<Currency>,
    },
    PicksyCurrencyChanged,
    PicksyAck { ok: bool },
}

impl Message {
    /// Wire name of the message kind, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Message::PicksyScrape { .. } => "PICKSY_SCRAPE",
            Message::PicksyScrapeRequest { .. } => "PICKSY_SCRAPE_REQUEST",
            Message::PicksyScrapeResult { .. } => "PICKSY_SCRAPE_RESULT",
            Message::PicksyScrapeResultBroadcast { .. } => "PICKSY_SCRAPE_RESULT_BROADCAST",
            Message::PicksyCurrencyChange { .. } => "PICKSY_CURRENCY_CHANGE",
            Message::PicksyCurrencyChanged => "PICKSY_CURRENCY_CHANGED",
            Message::PicksyAck { .. } => "PICKSY_ACK",
        }
    }
}
