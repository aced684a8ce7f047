//! `saved` command handlers.

use clap::{ArgAction, Subcommand};
use picksy_core::StockStatus;
use picksy_store::Store;
use serde_json::json;

/// Sub-commands available under `saved`.
#[derive(Debug, Subcommand)]
pub enum SavedCommands {
    /// Print saved items as JSON with their positions
    List {
        /// Include out-of-stock items even when hidden by settings
        #[arg(long)]
        all: bool,
    },
    /// Remove the saved item at a position shown by `list`
    Delete { index: usize },
    /// Hide out-of-stock items from `list`
    HideOos {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

/// Print saved items. Positions always refer to the full list so they can be
/// passed to `delete` even when out-of-stock items are hidden.
pub(crate) fn run_saved_list(store: &Store, all: bool) -> anyhow::Result<()> {
    let hide_oos = store.settings().oos_toggle && !all;
    let listed: Vec<_> = store
        .saved_items()
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            !hide_oos || item.snapshot.availability.status != StockStatus::OutOfStock
        })
        .map(|(index, item)| json!({ "index": index, "item": item }))
        .collect();

    println!("{}", serde_json::to_string_pretty(&listed)?);
    Ok(())
}

/// # Errors
///
/// Returns an error if `index` is out of range or the store cannot be written.
pub(crate) async fn run_saved_delete(store: &mut Store, index: usize) -> anyhow::Result<()> {
    let removed = store.delete_item(index).await?;
    tracing::info!(index, id = %removed.id, "saved item deleted");
    println!("{}", serde_json::to_string_pretty(&removed)?);
    Ok(())
}

pub(crate) async fn run_saved_hide_oos(store: &mut Store, enabled: bool) -> anyhow::Result<()> {
    store.set_oos_toggle(enabled).await?;
    println!("{}", json!({ "oosToggle": enabled }));
    Ok(())
}
