use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use picksy_core::{Currency, ProductSnapshot};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{PricePoint, SavedItem, Settings, StoreState, DEFAULT_CATEGORY};

/// JSON-file backed key-value store for preferences, scrapes and saved items.
///
/// The whole state is held in memory and rewritten on every mutation. A
/// mutation only takes effect in memory once its write has succeeded.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    state: StoreState,
}

impl Store {
    /// Open the store at `path`, starting from `defaults` when the file does
    /// not exist yet. Nothing is written until the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Json`] if its contents do not parse.
    pub async fn open(path: impl Into<PathBuf>, defaults: StoreState) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file missing, using defaults");
                defaults
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        Ok(Self { path, state })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn preferred_currency(&self) -> Currency {
        self.state.currency
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store file cannot be written.
    pub async fn set_currency(&mut self, currency: Currency) -> Result<(), StoreError> {
        let mut next = self.state.clone();
        next.currency = currency;
        self.commit(next).await
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store file cannot be written.
    pub async fn set_oos_toggle(&mut self, enabled: bool) -> Result<(), StoreError> {
        let mut next = self.state.clone();
        next.settings.oos_toggle = enabled;
        self.commit(next).await
    }

    /// Keep `snapshot` as the last scrape and append its price to the URL's
    /// history, dropping the oldest points beyond `history_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store file cannot be written.
    pub async fn record_scrape(
        &mut self,
        snapshot: ProductSnapshot,
        history_limit: usize,
    ) -> Result<(), StoreError> {
        let mut next = self.state.clone();
        if let Some(point) = PricePoint::from_snapshot(&snapshot) {
            let points = next.history.entry(snapshot.url.clone()).or_default();
            points.push(point);
            let excess = points.len().saturating_sub(history_limit);
            points.drain(..excess);
            tracing::debug!(url = %snapshot.url, points = points.len(), "price history updated");
        }
        next.last_scrape = Some(snapshot);
        self.commit(next).await
    }

    #[must_use]
    pub fn last_scrape(&self) -> Option<&ProductSnapshot> {
        self.state.last_scrape.as_ref()
    }

    /// Append `snapshot` to the saved list under `category`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store file cannot be written.
    pub async fn save_item(
        &mut self,
        snapshot: ProductSnapshot,
        category: Option<&str>,
    ) -> Result<SavedItem, StoreError> {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        let item = SavedItem {
            id: Uuid::new_v4(),
            category: category.to_string(),
            saved_at: Utc::now(),
            snapshot,
        };
        let mut next = self.state.clone();
        next.saved.push(item.clone());
        self.commit(next).await?;
        tracing::info!(id = %item.id, category = %item.category, "saved item");
        Ok(item)
    }

    /// Remove the saved item at `index` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] for a bad index, or
    /// [`StoreError`] if the store file cannot be written.
    pub async fn delete_item(&mut self, index: usize) -> Result<SavedItem, StoreError> {
        let len = self.state.saved.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        let mut next = self.state.clone();
        let removed = next.saved.remove(index);
        self.commit(next).await?;
        Ok(removed)
    }

    #[must_use]
    pub fn saved_items(&self) -> &[SavedItem] {
        &self.state.saved
    }

    /// Recorded prices for `url`, oldest first.
    #[must_use]
    pub fn history(&self, url: &str) -> &[PricePoint] {
        self.state.history.get(url).map_or(&[][..], Vec::as_slice)
    }

    /// Write `next` and adopt it only once it is on disk.
    async fn commit(&mut self, next: StoreState) -> Result<(), StoreError> {
        write_atomic(&self.path, &next).await?;
        self.state = next;
        Ok(())
    }
}

/// Serialize `state` next to `path` and rename it into place.
async fn write_atomic(path: &Path, state: &StoreState) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    let body = serde_json::to_vec_pretty(state)?;
    let temp_path = path.with_extension("json.tmp");

    let mut file = tokio::fs::File::create(&temp_path)
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;
    file.write_all(&body)
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;
    drop(file);

    tokio::fs::rename(&temp_path, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    tracing::trace!(path = %path.display(), bytes = body.len(), "store written");
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
