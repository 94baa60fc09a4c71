//! `EXCHANGE:TICKER` references confirmed against provider data.

use crate::chain::{ChainOutcome, ProviderChain};
use crate::provider::DetailsRequest;
use crate::{CompanyRecord, Ticker};

/// Parsed shape of an `EXCHANGE:TICKER` reference, before any provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredReference {
    pub exchange: String,
    pub ticker: Ticker,
}

impl StructuredReference {
    /// Uppercases `text` and splits it on the first colon.
    ///
    /// Returns `None` when there is no colon, either side is blank, or the
    /// ticker part is not a valid [`Ticker`] (which also rules out a second
    /// colon).
    pub fn parse(text: &str) -> Option<Self> {
        let upper = text.to_uppercase();
        let (exchange, ticker) = upper.split_once(':')?;

        let exchange = exchange.trim();
        let ticker = ticker.trim();
        if exchange.is_empty() || ticker.is_empty() {
            return None;
        }

        Some(Self {
            exchange: exchange.to_owned(),
            ticker: Ticker::parse(ticker).ok()?,
        })
    }
}

/// Resolves a structured reference through the chain.
///
/// The record is accepted only when the provider reports exactly the parsed
/// exchange. The returned record keeps the parsed ticker and exchange and takes
/// name and country from the provider.
pub async fn parse_structured(chain: &ProviderChain, text: &str) -> ChainOutcome<CompanyRecord> {
    let Some(reference) = StructuredReference::parse(text) else {
        return ChainOutcome {
            value: None,
            attempts: Vec::new(),
        };
    };

    let Ok(request) = DetailsRequest::new(reference.ticker.clone(), reference.exchange.clone()) else {
        return ChainOutcome {
            value: None,
            attempts: Vec::new(),
        };
    };

    let ChainOutcome { value, attempts } = chain.fetch_details(&request).await;
    let value = value.and_then(|details| {
        if details.exchange != reference.exchange {
            tracing::debug!(
                ticker = %reference.ticker,
                requested = %reference.exchange,
                reported = %details.exchange,
                "structured reference rejected on exchange mismatch"
            );
            return None;
        }

        CompanyRecord::new(
            details.company_name,
            reference.ticker,
            reference.exchange,
            details.country,
        )
        .ok()
    });

    ChainOutcome { value, attempts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Option<(String, String)> {
        StructuredReference::parse(text)
            .map(|reference| (reference.exchange, reference.ticker.as_str().to_owned()))
    }

    #[test]
    fn parse_uppercases_both_parts() {
        assert_eq!(
            parsed("nasdaq:aapl"),
            Some((String::from("NASDAQ"), String::from("AAPL")))
        );
    }

    #[test]
    fn parse_trims_around_the_colon() {
        assert_eq!(
            parsed(" NYSE : IBM "),
            Some((String::from("NYSE"), String::from("IBM")))
        );
    }

    #[test]
    fn parse_rejects_malformed_shapes() {
        assert_eq!(parsed("NASDAQAAPL"), None);
        assert_eq!(parsed(":AAPL"), None);
        assert_eq!(parsed("NASDAQ:"), None);
        assert_eq!(parsed("NASDAQ:AAPL:X"), None);
        assert_eq!(parsed("NASDAQ:AA PL"), None);
    }
}
