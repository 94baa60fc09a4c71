use serde::Serialize;

use crate::chain::{ProviderAttempt, ProviderChain};
use crate::config::DisambiguatorBuilder;
use crate::unstructured::DEFAULT_THRESHOLD;
use crate::{structured, unstructured, CompanyRecord, ConfigError, DisambiguationError};

/// Stage that produced an accepted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    Structured,
    Unstructured,
}

impl MatchStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Unstructured => "unstructured",
        }
    }
}

/// Disambiguation result with the diagnostics behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub input: String,
    pub outcome: Result<CompanyRecord, DisambiguationError>,
    /// Stage that matched; `None` when unresolved.
    pub stage: Option<MatchStage>,
    /// Best unstructured score, when the matcher scored any candidate.
    pub score: Option<u8>,
    /// Every provider call made, structured stage first.
    pub attempts: Vec<ProviderAttempt>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Resolves company references to canonical records.
///
/// Structured `EXCHANGE:TICKER` input is tried first and, when the provider
/// confirms the exchange, returned without consulting the fuzzy matcher.
/// Anything else goes through free-text search and threshold scoring. Each
/// call is a single pass over the provider chain with no retries.
///
/// ```rust,ignore
/// use tickmatch_core::Disambiguator;
///
/// let disambiguator = Disambiguator::builder().with_mock_mode().build()?;
/// let record = disambiguator.disambiguate("NASDAQ:AAPL").await?;
/// assert_eq!(record.ticker.as_str(), "AAPL");
/// ```
#[derive(Clone)]
pub struct Disambiguator {
    chain: ProviderChain,
    threshold: u8,
}

impl Disambiguator {
    pub fn new(chain: ProviderChain) -> Self {
        Self {
            chain,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn builder() -> DisambiguatorBuilder {
        DisambiguatorBuilder::new()
    }

    /// Live chain with `primary` first and the default fallbacks after it.
    pub fn with_provider(api_key: impl Into<String>, primary: &str) -> Result<Self, ConfigError> {
        DisambiguatorBuilder::new()
            .with_api_key(api_key)
            .with_primary_provider(primary)
            .build()
    }

    pub(crate) fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub async fn disambiguate(&self, text: &str) -> Result<CompanyRecord, DisambiguationError> {
        self.resolve(text).await.outcome
    }

    pub async fn resolve(&self, text: &str) -> Resolution {
        let structured = structured::parse_structured(&self.chain, text).await;
        let mut attempts = structured.attempts;
        if let Some(record) = structured.value {
            tracing::debug!(input = text, ticker = %record.ticker, "resolved structured reference");
            return Resolution {
                input: text.to_owned(),
                outcome: Ok(record),
                stage: Some(MatchStage::Structured),
                score: None,
                attempts,
            };
        }

        let unstructured = unstructured::parse_unstructured(&self.chain, text, self.threshold).await;
        attempts.extend(unstructured.attempts);
        let (outcome, stage) = match unstructured.record {
            Some(record) => {
                tracing::debug!(
                    input = text,
                    ticker = %record.ticker,
                    score = ?unstructured.score,
                    "resolved free-text reference"
                );
                (Ok(record), Some(MatchStage::Unstructured))
            }
            None => {
                tracing::debug!(input = text, "no matching company");
                (Err(DisambiguationError::no_match()), None)
            }
        };

        Resolution {
            input: text.to_owned(),
            outcome,
            stage,
            score: unstructured.score,
            attempts,
        }
    }

    /// Structured stage on its own.
    pub async fn parse_structured(&self, text: &str) -> Option<CompanyRecord> {
        structured::parse_structured(&self.chain, text).await.value
    }

    /// Unstructured stage on its own, with an explicit threshold.
    pub async fn parse_unstructured(&self, text: &str, threshold: u8) -> Option<CompanyRecord> {
        unstructured::parse_unstructured(&self.chain, text, threshold)
            .await
            .record
    }
}
