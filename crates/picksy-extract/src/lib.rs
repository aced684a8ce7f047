//! Page signal extraction: turns one loaded product page into a
//! [`picksy_core::ProductSnapshot`].
//!
//! Each concern is layered from most to least specific: site selectors from
//! the [`rules::SiteTable`], then generic heuristics, then a whole-document
//! fallback. Nothing in the pass returns an error; misses fall through.

pub mod availability;
pub mod currency;
pub mod document;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod price;
pub mod rules;
pub mod title;

pub use document::Page;
pub use error::ExtractError;
pub use extract::Extractor;
pub use price::{format_price, parse_price_to_number, PriceReading};
pub use rules::{CompiledSite, SiteTable};
