//! Background relay: reads one JSON message per stdin line, routes it the way
//! the extension's background worker does, and writes the resulting messages
//! to stdout, one per line.

use chrono::Utc;
use picksy_core::{Currency, Message, PagePayload, ProductSnapshot};
use picksy_extract::Extractor;
use picksy_store::Store;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Preference stored when a currency change arrives without a code.
const FALLBACK_CURRENCY: Currency = Currency::Inr;

pub(crate) struct Relay {
    extractor: Extractor,
    store: Store,
    history_limit: usize,
}

impl Relay {
    pub(crate) fn new(extractor: Extractor, store: Store, history_limit: usize) -> Self {
        Self {
            extractor,
            store,
            history_limit,
        }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    /// Decode and route one line. Malformed input and store failures are
    /// answered with a negative ack instead of stopping the relay.
    pub(crate) async fn handle_line(&mut self, line: &str) -> Vec<Message> {
        let message = match serde_json::from_str::<Message>(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed relay message");
                return vec![Message::PicksyAck { ok: false }];
            }
        };

        let kind = message.kind();
        match self.route(message).await {
            Ok(out) => out,
            Err(e) => {
                tracing::error!(kind, error = %e, "relay message failed");
                vec![Message::PicksyAck { ok: false }]
            }
        }
    }

    /// Messages to emit for `message`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub(crate) async fn route(&mut self, message: Message) -> anyhow::Result<Vec<Message>> {
        tracing::debug!(kind = message.kind(), "relay message received");
        match message {
            Message::PicksyScrapeRequest { page } => {
                let mut out = vec![Message::PicksyAck { ok: true }];
                out.extend(self.scrape(page).await?);
                Ok(out)
            }
            Message::PicksyScrape { page } => self.scrape(page).await,
            Message::PicksyScrapeResult { payload } => Ok(vec![self.accept_result(payload).await?]),
            Message::PicksyCurrencyChange { currency } => {
                let currency = currency.unwrap_or(FALLBACK_CURRENCY);
                self.store.set_currency(currency).await?;
                tracing::info!(%currency, "preferred currency changed");
                Ok(vec![
                    Message::PicksyAck { ok: true },
                    Message::PicksyCurrencyChanged,
                ])
            }
            Message::PicksyScrapeResultBroadcast { .. }
            | Message::PicksyCurrencyChanged
            | Message::PicksyAck { .. } => Ok(Vec::new()),
        }
    }

    /// Extract with the stored preference, then persist the result.
    async fn scrape(&mut self, page: PagePayload) -> anyhow::Result<Vec<Message>> {
        let preferred = self.store.preferred_currency();
        let snapshot = self
            .extractor
            .extract(&page.html, &page.url, Some(preferred), Utc::now());
        let broadcast = self.accept_result(snapshot.clone()).await?;
        Ok(vec![Message::PicksyScrapeResult { payload: snapshot }, broadcast])
    }

    async fn accept_result(&mut self, payload: ProductSnapshot) -> anyhow::Result<Message> {
        self.store
            .record_scrape(payload.clone(), self.history_limit)
            .await?;
        Ok(Message::PicksyScrapeResultBroadcast { payload })
    }
}

/// Pump stdin to stdout until EOF.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub(crate) async fn run_relay(relay: &mut Relay) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        for message in relay.handle_line(&line).await {
            let mut encoded = serde_json::to_vec(&message)?;
            encoded.push(b'\n');
            stdout.write_all(&encoded).await?;
        }
        stdout.flush().await?;
    }

    tracing::debug!("relay input closed");
    Ok(())
}
