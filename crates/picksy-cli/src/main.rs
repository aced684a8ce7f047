mod currency;
mod relay;
mod saved;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use picksy_core::AppConfig;
use picksy_extract::Extractor;
use picksy_store::{Store, StoreState};
use tracing_subscriber::EnvFilter;

use crate::currency::CurrencyCommands;
use crate::saved::SavedCommands;

#[derive(Debug, Parser)]
#[command(name = "picksy")]
#[command(about = "Extract price and availability from saved product pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract a product snapshot from an HTML file
    Scrape {
        /// HTML document to read
        file: PathBuf,
        /// URL the document was loaded from
        #[arg(long)]
        url: String,
        /// Also add the snapshot to the saved list
        #[arg(long)]
        save: bool,
        /// Category for the saved item
        #[arg(long, requires = "save")]
        category: Option<String>,
    },
    /// Manage saved items
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// Show or change the preferred currency
    Currency {
        #[command(subcommand)]
        command: CurrencyCommands,
    },
    /// Route newline-delimited JSON messages from stdin to stdout
    Relay,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = picksy_core::load_app_config()?;
    init_tracing(&config)?;

    let mut store = open_store(&config).await?;

    match cli.command {
        Commands::Scrape {
            file,
            url,
            save,
            category,
        } => {
            let extractor = Extractor::from_sites_path(config.sites_path.as_deref())?;
            let options = scrape::ScrapeOptions {
                save,
                category: category.as_deref(),
                history_limit: config.history_limit,
            };
            scrape::run_scrape(&extractor, &mut store, &file, &url, &options).await?;
        }
        Commands::Saved { command } => match command {
            SavedCommands::List { all } => saved::run_saved_list(&store, all)?,
            SavedCommands::Delete { index } => saved::run_saved_delete(&mut store, index).await?,
            SavedCommands::HideOos { enabled } => {
                saved::run_saved_hide_oos(&mut store, enabled).await?;
            }
        },
        Commands::Currency { command } => match command {
            CurrencyCommands::Show => currency::run_currency_show(&store),
            CurrencyCommands::Set { code } => currency::run_currency_set(&mut store, code).await?,
        },
        Commands::Relay => {
            let extractor = Extractor::from_sites_path(config.sites_path.as_deref())?;
            let mut relay = relay::Relay::new(extractor, store, config.history_limit);
            relay::run_relay(&mut relay).await?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only JSON. `RUST_LOG` wins over
/// `PICKSY_LOG_LEVEL`.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, store = %config.store_path.display(), "picksy starting");
    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Store> {
    let defaults = StoreState::with_currency(config.default_currency);
    Ok(Store::open(&config.store_path, defaults).await?)
}
