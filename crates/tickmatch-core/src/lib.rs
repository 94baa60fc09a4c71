//! # Tickmatch Core
//!
//! Resolves free-form or `EXCHANGE:TICKER` company references to a canonical
//! record of company name, ticker and exchange.
//!
//! ## Overview
//!
//! - **Structured references** (`NASDAQ:AAPL`) are parsed and confirmed against
//!   a provider's detail lookup; the provider must report the same exchange.
//! - **Free text** (`Tesla`, `Telsa`) goes through provider symbol search and
//!   fuzzy scoring; the best candidate is accepted at or above a threshold.
//! - **Provider chain**: a primary provider plus ordered fallbacks. Faults and
//!   empty answers move on to the next provider and are kept as diagnostics.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Alpha Vantage, Yahoo, in-memory catalog) |
//! | [`chain`] | Ordered provider fallback with attempt trail |
//! | [`circuit_breaker`] | Circuit breaker for resilient calls |
//! | [`config`] | [`DisambiguatorBuilder`] and provider selection |
//! | [`disambiguator`] | Structured-then-unstructured orchestration |
//! | [`domain`] | Domain models (CompanyRecord, SearchCandidate, Ticker) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`provider`] | Provider trait and request types |
//! | [`provider_policy`] | Per-provider request budgets |
//! | [`similarity`] | 0-100 fuzzy scoring |
//! | [`source`] | Provider identifiers |
//! | [`structured`] | `EXCHANGE:TICKER` parsing |
//! | [`throttling`] | Rate limiting support |
//! | [`unstructured`] | Free-text search and threshold matching |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickmatch_core::Disambiguator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let disambiguator = Disambiguator::builder()
//!         .with_env_credentials()
//!         .build()?;
//!
//!     match disambiguator.disambiguate("Tesla").await {
//!         Ok(record) => println!("{} on {}", record.ticker, record.exchange),
//!         Err(error) => println!("{error}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only construction can fail hard ([`ConfigError`]). Provider problems are
//! [`SourceError`] values contained by the chain, and an unresolved reference
//! is an ordinary [`DisambiguationError`]:
//!
//! ```rust
//! use tickmatch_core::{SourceError, SourceErrorKind};
//!
//! fn describe(error: &SourceError) -> &'static str {
//!     match error.kind() {
//!         SourceErrorKind::RateLimited => "provider quota exhausted",
//!         SourceErrorKind::Unauthorized => "check the API key",
//!         _ => "provider unavailable",
//!     }
//! }
//!
//! assert_eq!(describe(&SourceError::rate_limited("slow down")), "provider quota exhausted");
//! ```
//!
//! ## Security
//!
//! - API keys come from configuration or environment variables and are never logged
//! - Transport errors are reported without request URLs

pub mod adapters;
pub mod chain;
pub mod circuit_breaker;
pub mod config;
pub mod disambiguator;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod provider;
pub mod provider_policy;
pub mod similarity;
pub mod source;
pub mod structured;
pub mod throttling;
pub mod unstructured;

// Adapter implementations
pub use adapters::{reference_catalog, AlphaVantageAdapter, CatalogAdapter, CatalogEntry, YahooAdapter};

// Provider chain
pub use chain::{AttemptStatus, ChainOutcome, ProviderAttempt, ProviderChain};

// Circuit breaker
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

// Configuration
pub use config::{DisambiguatorBuilder, DEFAULT_FALLBACKS, DEMO_API_KEY};

// Orchestration
pub use disambiguator::{Disambiguator, MatchStage, Resolution};

// Domain models
pub use domain::{CompanyRecord, SearchCandidate, Ticker};

// Error types
pub use error::{ConfigError, DisambiguationError, ValidationError, NO_MATCH_MESSAGE};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Provider trait and types
pub use provider::{
    CompanySource, DetailsRequest, Operation, ProviderOutcome, SearchRequest, SourceError,
    SourceErrorKind, SourceFuture,
};

// Provider policies
pub use provider_policy::ProviderPolicy;

// Source identifiers
pub use source::ProviderId;

// Stages
pub use structured::{parse_structured, StructuredReference};
pub use unstructured::{parse_unstructured, UnstructuredMatch, DEFAULT_THRESHOLD};

// Throttling
pub use throttling::Throttle;
