//! Provider capability contract and request/response types.
//!
//! Every financial-data provider is exposed through [`CompanySource`], which
//! offers two operations:
//!
//! | Operation | Request | Response | Description |
//! |-----------|---------|----------|-------------|
//! | Search | [`SearchRequest`] | `Vec<SearchCandidate>` | Free-text symbol search |
//! | Details | [`DetailsRequest`] | `Option<CompanyRecord>` | Ticker + exchange lookup |
//!
//! Soft "nothing found" results are ordinary values (`Ok(vec![])`, `Ok(None)`).
//! Transport, authentication and decoding problems come back as [`SourceError`]
//! so the provider chain can tell a fault apart from an empty answer.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{CompanyRecord, ProviderId, SearchCandidate, Ticker, ValidationError};

/// Provider operation used for diagnostics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SearchSymbol,
    FetchDetails,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchSymbol => "search_symbol",
            Self::FetchDetails => "fetch_details",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Unauthorized,
    Internal,
}

/// Structured provider fault. The chain records these and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unauthorized,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Unauthorized => "source.unauthorized",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for free-text symbol search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Result<Self, ValidationError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ValidationError::EmptySearchQuery);
        }
        Ok(Self { query })
    }
}

/// Request payload for a ticker + exchange detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsRequest {
    pub ticker: Ticker,
    pub exchange: String,
}

impl DetailsRequest {
    pub fn new(ticker: Ticker, exchange: impl Into<String>) -> Result<Self, ValidationError> {
        let exchange = exchange.into();
        if exchange.trim().is_empty() {
            return Err(ValidationError::EmptyExchange);
        }
        Ok(Self { ticker, exchange })
    }
}

/// Boxed future returned by provider operations.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Provider capability contract.
///
/// Implementations must be `Send + Sync`; the chain shares them behind `Arc`.
///
/// ```rust,ignore
/// use tickmatch_core::{CompanySource, DetailsRequest, ProviderId, SearchRequest, SourceFuture};
///
/// struct MySource;
///
/// impl CompanySource for MySource {
///     fn id(&self) -> ProviderId {
///         ProviderId::Catalog
///     }
///
///     fn search_symbol<'a>(&'a self, req: SearchRequest) -> SourceFuture<'a, Vec<SearchCandidate>> {
///         Box::pin(async move { Ok(Vec::new()) })
///     }
///
///     fn fetch_details<'a>(&'a self, req: DetailsRequest) -> SourceFuture<'a, Option<CompanyRecord>> {
///         Box::pin(async move { Ok(None) })
///     }
/// }
/// ```
pub trait CompanySource: Send + Sync {
    /// Returns the provider identifier.
    fn id(&self) -> ProviderId;

    /// Searches the provider by free text.
    ///
    /// Returns an empty list when nothing matches; never a fault for "no hits".
    fn search_symbol<'a>(&'a self, req: SearchRequest) -> SourceFuture<'a, Vec<SearchCandidate>>;

    /// Looks up the provider's record for a ticker on an exchange.
    ///
    /// Returns `Ok(None)` when the provider has no record. The returned record
    /// carries the exchange the provider reports, which may differ from the
    /// requested one.
    fn fetch_details<'a>(&'a self, req: DetailsRequest)
        -> SourceFuture<'a, Option<CompanyRecord>>;
}

/// Classified result of one provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome<T> {
    Hit(T),
    Empty,
    Fault(SourceError),
}

impl<T> ProviderOutcome<T> {
    pub fn from_result(result: Result<Option<T>, SourceError>) -> Self {
        match result {
            Ok(Some(value)) => Self::Hit(value),
            Ok(None) => Self::Empty,
            Err(error) => Self::Fault(error),
        }
    }
}

impl<T> ProviderOutcome<Vec<T>> {
    /// Classifies a list result, treating an empty list as [`ProviderOutcome::Empty`].
    pub fn from_list(result: Result<Vec<T>, SourceError>) -> Self {
        Self::from_result(result.map(|items| (!items.is_empty()).then_some(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_rejects_blank_query() {
        let err = SearchRequest::new("   ").expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySearchQuery);
    }

    #[test]
    fn empty_list_classifies_as_empty() {
        let outcome = ProviderOutcome::<Vec<u8>>::from_list(Ok(Vec::new()));
        assert_eq!(outcome, ProviderOutcome::Empty);

        let outcome = ProviderOutcome::from_list(Ok(vec![1_u8]));
        assert_eq!(outcome, ProviderOutcome::Hit(vec![1]));
    }

    #[test]
    fn error_classifies_as_fault() {
        let outcome =
            ProviderOutcome::<CompanyRecord>::from_result(Err(SourceError::unavailable("down")));
        assert!(matches!(outcome, ProviderOutcome::Fault(error) if error.code() == "source.unavailable"));
    }
}
