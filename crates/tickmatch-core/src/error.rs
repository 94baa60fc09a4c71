use thiserror::Error;

/// Validation and contract errors exposed by `tickmatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("exchange cannot be empty")]
    EmptyExchange,

    #[error("search query must not be empty")]
    EmptySearchQuery,

    #[error("invalid provider '{value}', expected one of alphavantage, yahoo, catalog")]
    InvalidProvider { value: String },
}

/// Construction-time configuration errors. These are the only failures that
/// abort building a [`Disambiguator`](crate::Disambiguator).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported provider '{value}'")]
    UnsupportedProvider { value: String },

    #[error("match threshold {value} is out of range 0..=100")]
    ThresholdOutOfRange { value: u8 },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Reason text carried by every unresolved reference.
pub const NO_MATCH_MESSAGE: &str = "No matching company found";

/// Ordinary "could not resolve" outcome of a disambiguation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct DisambiguationError {
    reason: String,
}

impl DisambiguationError {
    pub fn no_match() -> Self {
        Self {
            reason: NO_MATCH_MESSAGE.to_owned(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
