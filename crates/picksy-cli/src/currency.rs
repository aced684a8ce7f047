use clap::Subcommand;
use picksy_core::Currency;
use picksy_store::Store;
use serde_json::json;

/// Sub-commands available under `currency`.
#[derive(Debug, Subcommand)]
pub enum CurrencyCommands {
    /// Print the stored preference
    Show,
    /// Store a new preference (USD, EUR, GBP, INR or CAD)
    Set { code: Currency },
}

pub(crate) fn run_currency_show(store: &Store) {
    let currency = store.preferred_currency();
    println!(
        "{}",
        json!({ "currency": currency, "symbol": currency.symbol() })
    );
}

/// # Errors
///
/// Returns an error if the store cannot be written.
pub(crate) async fn run_currency_set(store: &mut Store, code: Currency) -> anyhow::Result<()> {
    store.set_currency(code).await?;
    tracing::info!(currency = %code, "preferred currency updated");
    println!("{}", json!({ "currency": code }));
    Ok(())
}
