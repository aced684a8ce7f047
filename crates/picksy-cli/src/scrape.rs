use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use picksy_extract::Extractor;
use picksy_store::Store;

pub(crate) struct ScrapeOptions<'a> {
    pub save: bool,
    pub category: Option<&'a str>,
    pub history_limit: usize,
}

/// Extract one snapshot from `file`, record it, optionally save it, and
/// print it as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the store cannot be written.
pub(crate) async fn run_scrape(
    extractor: &Extractor,
    store: &mut Store,
    file: &Path,
    url: &str,
    options: &ScrapeOptions<'_>,
) -> anyhow::Result<()> {
    let html = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let preferred = store.preferred_currency();
    let snapshot = extractor.extract(&html, url, Some(preferred), Utc::now());
    store
        .record_scrape(snapshot.clone(), options.history_limit)
        .await?;

    if options.save {
        let item = store.save_item(snapshot.clone(), options.category).await?;
        tracing::info!(id = %item.id, index = store.saved_items().len() - 1, "snapshot saved");
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
