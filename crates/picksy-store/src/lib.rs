//! Local persistence for Picksy: the preferred currency, popup settings,
//! the last scrape, per-URL price history and saved items, kept in a single
//! JSON file.

pub mod error;
pub mod model;
pub mod store;

pub use error::StoreError;
pub use model::{PricePoint, SavedItem, Settings, StoreState, DEFAULT_CATEGORY};
pub use store::Store;
