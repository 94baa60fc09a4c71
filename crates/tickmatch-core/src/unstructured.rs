//! Free-text matching: provider search plus fuzzy scoring of the hits.

use crate::chain::{ProviderAttempt, ProviderChain};
use crate::provider::SearchRequest;
use crate::similarity::best_match;
use crate::{CompanyRecord, SearchCandidate, Ticker};

/// Minimum score a candidate needs when no threshold is configured.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Result of one unstructured match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstructuredMatch {
    /// Accepted record, if the best candidate cleared the threshold.
    pub record: Option<CompanyRecord>,
    /// Score of the best candidate, accepted or not.
    pub score: Option<u8>,
    pub attempts: Vec<ProviderAttempt>,
}

impl UnstructuredMatch {
    fn unmatched(attempts: Vec<ProviderAttempt>) -> Self {
        Self {
            record: None,
            score: None,
            attempts,
        }
    }
}

pub async fn parse_unstructured(
    chain: &ProviderChain,
    text: &str,
    threshold: u8,
) -> UnstructuredMatch {
    let query = text.trim().to_uppercase();
    let Ok(request) = SearchRequest::new(query.clone()) else {
        return UnstructuredMatch::unmatched(Vec::new());
    };

    let outcome = chain.search_symbol(&request).await;
    let Some(candidates) = outcome.value else {
        return UnstructuredMatch::unmatched(outcome.attempts);
    };

    let Some((index, score)) = best_match(
        &query,
        candidates.iter().map(SearchCandidate::comparison_text),
    ) else {
        return UnstructuredMatch::unmatched(outcome.attempts);
    };

    let best = &candidates[index];
    let record = if score >= threshold {
        candidate_record(best)
    } else {
        tracing::debug!(
            query = %query,
            candidate = %best.symbol,
            score,
            threshold,
            "best candidate below threshold"
        );
        None
    };

    UnstructuredMatch {
        record,
        score: Some(score),
        attempts: outcome.attempts,
    }
}

/// Builds the record for an accepted candidate.
///
/// The exchange comes from the candidate's region as reported, or failing that
/// from the uppercased qualifier of an exchange-qualified symbol. Candidates
/// with neither are rejected.
fn candidate_record(candidate: &SearchCandidate) -> Option<CompanyRecord> {
    let ticker = match Ticker::parse(candidate.local_symbol()) {
        Ok(ticker) => ticker,
        Err(error) => {
            tracing::debug!(symbol = %candidate.symbol, %error, "candidate symbol rejected");
            return None;
        }
    };

    let exchange = candidate
        .region
        .clone()
        .or_else(|| candidate.symbol_qualifier().map(str::to_uppercase));
    let Some(exchange) = exchange else {
        tracing::debug!(symbol = %candidate.symbol, "candidate has no exchange");
        return None;
    };

    CompanyRecord::new(Some(candidate.name.clone()), ticker, exchange, None).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_supplies_the_exchange() {
        let candidate = SearchCandidate::new("Tesla Inc.", "TSLA", Some(String::from("NASDAQ")));

        let record = candidate_record(&candidate).expect("accepted");
        assert_eq!(record.ticker.as_str(), "TSLA");
        assert_eq!(record.exchange, "NASDAQ");
        assert_eq!(record.company_name.as_deref(), Some("Tesla Inc."));
    }

    #[test]
    fn qualified_symbol_supplies_missing_region() {
        let candidate = SearchCandidate::new("Tesla Inc.", "NASDAQ:TSLA", None);

        let record = candidate_record(&candidate).expect("accepted");
        assert_eq!(record.ticker.as_str(), "TSLA");
        assert_eq!(record.exchange, "NASDAQ");
    }

    #[test]
    fn candidate_without_exchange_is_rejected() {
        let candidate = SearchCandidate::new("Tesla Inc.", "TSLA", Some(String::from("  ")));
        assert_eq!(candidate_record(&candidate), None);
    }

    #[test]
    fn lowercase_symbol_is_uppercased() {
        let candidate = SearchCandidate::new("Shell plc", "lse:shel", None);

        let record = candidate_record(&candidate).expect("accepted");
        assert_eq!(record.ticker.as_str(), "SHEL");
        assert_eq!(record.exchange, "LSE");
    }
}
