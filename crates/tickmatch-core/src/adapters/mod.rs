//! Provider adapters.

pub mod alphavantage;
pub mod catalog;
pub mod yahoo;

pub use alphavantage::AlphaVantageAdapter;
pub use catalog::{reference_catalog, CatalogAdapter, CatalogEntry};
pub use yahoo::YahooAdapter;
