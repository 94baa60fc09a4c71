use std::sync::Arc;

use serde::Serialize;

use crate::provider::{
    CompanySource, DetailsRequest, Operation, ProviderOutcome, SearchRequest, SourceFuture,
};
use crate::{CompanyRecord, ProviderId, SearchCandidate};

/// How one provider call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptStatus {
    Hit,
    Empty,
    Fault { code: String, message: String },
}

/// One entry of the diagnostic trail kept by [`ProviderChain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttempt {
    pub provider: ProviderId,
    pub operation: Operation,
    #[serde(flatten)]
    pub status: AttemptStatus,
}

/// First non-empty result across the chain plus every attempt made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome<T> {
    pub value: Option<T>,
    pub attempts: Vec<ProviderAttempt>,
}

impl<T> ChainOutcome<T> {
    pub fn faults(&self) -> usize {
        self.attempts
            .iter()
            .filter(|attempt| matches!(attempt.status, AttemptStatus::Fault { .. }))
            .count()
    }
}

/// Ordered primary + fallback providers.
///
/// Each call walks the providers in order and stops at the first hit. Empty
/// answers and faults both move on to the next provider; faults are logged and
/// recorded in the attempt trail but never returned to the caller.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn CompanySource>>,
}

impl ProviderChain {
    pub fn new(primary: Arc<dyn CompanySource>, fallbacks: Vec<Arc<dyn CompanySource>>) -> Self {
        let mut providers = Vec::with_capacity(1 + fallbacks.len());
        providers.push(primary);
        providers.extend(fallbacks);
        Self { providers }
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.providers.iter().map(|provider| provider.id())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false; a chain has at least its primary.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub async fn search_symbol(&self, req: &SearchRequest) -> ChainOutcome<Vec<SearchCandidate>> {
        let req = req.clone();
        self.try_across(Operation::SearchSymbol, move |source| {
            non_empty_search(source, req.clone())
        })
        .await
    }

    pub async fn fetch_details(&self, req: &DetailsRequest) -> ChainOutcome<CompanyRecord> {
        let req = req.clone();
        self.try_across(Operation::FetchDetails, move |source| {
            source.fetch_details(req.clone())
        })
        .await
    }

    /// Runs `invoke` against each provider until one returns `Ok(Some(_))`.
    pub async fn try_across<T, F>(&self, operation: Operation, mut invoke: F) -> ChainOutcome<T>
    where
        F: for<'a> FnMut(&'a dyn CompanySource) -> SourceFuture<'a, Option<T>>,
    {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for source in &self.providers {
            let provider = source.id();
            match ProviderOutcome::from_result(invoke(source.as_ref()).await) {
                ProviderOutcome::Hit(value) => {
                    attempts.push(ProviderAttempt {
                        provider,
                        operation,
                        status: AttemptStatus::Hit,
                    });
                    return ChainOutcome {
                        value: Some(value),
                        attempts,
                    };
                }
                ProviderOutcome::Empty => {
                    tracing::debug!(
                        provider = provider.as_str(),
                        operation = operation.as_str(),
                        "provider returned no result"
                    );
                    attempts.push(ProviderAttempt {
                        provider,
                        operation,
                        status: AttemptStatus::Empty,
                    });
                }
                ProviderOutcome::Fault(error) => {
                    tracing::warn!(
                        provider = provider.as_str(),
                        operation = operation.as_str(),
                        code = error.code(),
                        retryable = error.retryable(),
                        "provider fault: {}",
                        error.message()
                    );
                    attempts.push(ProviderAttempt {
                        provider,
                        operation,
                        status: AttemptStatus::Fault {
                            code: error.code().to_owned(),
                            message: error.message().to_owned(),
                        },
                    });
                }
            }
        }

        ChainOutcome {
            value: None,
            attempts,
        }
    }
}

/// Search where an empty candidate list counts as "no result".
fn non_empty_search<'a>(
    source: &'a dyn CompanySource,
    req: SearchRequest,
) -> SourceFuture<'a, Option<Vec<SearchCandidate>>> {
    Box::pin(async move {
        match ProviderOutcome::from_list(source.search_symbol(req).await) {
            ProviderOutcome::Hit(candidates) => Ok(Some(candidates)),
            ProviderOutcome::Empty => Ok(None),
            ProviderOutcome::Fault(error) => Err(error),
        }
    })
}
