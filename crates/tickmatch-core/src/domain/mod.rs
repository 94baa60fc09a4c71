//! # Domain Models
//!
//! Canonical domain types for company disambiguation.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CompanyRecord`] | Resolved company: name, ticker, exchange, country |
//! | [`SearchCandidate`] | Provider free-text search hit |
//! | [`Ticker`] | Validated, uppercase ticker symbol |
//!
//! Construction validates invariants, so a [`CompanyRecord`] in hand always has a
//! non-empty ticker and exchange:
//!
//! ```rust
//! use tickmatch_core::{CompanyRecord, Ticker};
//!
//! let ticker = Ticker::parse("aapl").unwrap();
//! let record = CompanyRecord::new(Some("Apple Inc.".into()), ticker, "NASDAQ", None).unwrap();
//! assert_eq!(record.ticker.as_str(), "AAPL");
//! ```

mod models;
mod symbol;

pub use models::{CompanyRecord, SearchCandidate};
pub use symbol::Ticker;
