pub mod app_config;
pub mod config;
pub mod currency;
pub mod error;
pub mod messages;
pub mod sites;
pub mod snapshot;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use currency::{Currency, CurrencyParseError};
pub use error::ConfigError;
pub use messages::{Message, PagePayload};
pub use sites::{
    builtin_sites, load_sites, parse_sites, AvailabilityRules, GenericRules, RegionRule, SiteRule,
    SitesFile,
};
pub use snapshot::{Availability, Price, ProductSnapshot, StockStatus};
