use serde::{Deserialize, Serialize};

use crate::{Ticker, ValidationError};

/// Canonical company reference returned to callers.
///
/// `ticker` and `exchange` are always non-empty; `company_name` is `None` only
/// when the provider itself omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_name: Option<String>,
    pub ticker: Ticker,
    pub exchange: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CompanyRecord {
    pub fn new(
        company_name: Option<String>,
        ticker: Ticker,
        exchange: impl Into<String>,
        country: Option<String>,
    ) -> Result<Self, ValidationError> {
        let exchange = exchange.into().trim().to_owned();
        if exchange.is_empty() {
            return Err(ValidationError::EmptyExchange);
        }

        Ok(Self {
            company_name: non_blank(company_name),
            ticker,
            exchange,
            country: non_blank(country),
        })
    }
}

/// Free-text search hit as reported by a provider.
///
/// `symbol` may be exchange-qualified (`NASDAQ:TSLA`); `region` carries whatever
/// region or exchange fragment the provider attaches to the hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub name: String,
    pub symbol: String,
    pub region: Option<String>,
}

impl SearchCandidate {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            region: non_blank(region),
        }
    }

    /// Text the matcher scores the query against.
    pub fn comparison_text(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    /// Trailing component of a provider-qualified symbol (`NASDAQ:TSLA` -> `TSLA`).
    pub fn local_symbol(&self) -> &str {
        self.symbol
            .rsplit(':')
            .next()
            .unwrap_or(self.symbol.as_str())
            .trim()
    }

    /// Qualifier prefix of an exchange-qualified symbol, if any.
    pub fn symbol_qualifier(&self) -> Option<&str> {
        let (qualifier, _) = self.symbol.rsplit_once(':')?;
        let qualifier = qualifier.trim();
        (!qualifier.is_empty()).then_some(qualifier)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rejects_blank_exchange() {
        let ticker = Ticker::parse("AAPL").expect("valid ticker");
        let err = CompanyRecord::new(None, ticker, "  ", None).expect_err("must fail");
        assert_eq!(err, ValidationError::EmptyExchange);
    }

    #[test]
    fn record_drops_blank_optional_fields() {
        let ticker = Ticker::parse("AAPL").expect("valid ticker");
        let record = CompanyRecord::new(
            Some(String::from(" ")),
            ticker,
            "NASDAQ",
            Some(String::new()),
        )
        .expect("valid record");

        assert_eq!(record.company_name, None);
        assert_eq!(record.country, None);
    }

    #[test]
    fn record_serializes_null_name_and_omits_missing_country() {
        let ticker = Ticker::parse("AAPL").expect("valid ticker");
        let record = CompanyRecord::new(None, ticker, "NASDAQ", None).expect("valid record");

        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({"company_name": null, "ticker": "AAPL", "exchange": "NASDAQ"})
        );
    }

    #[test]
    fn candidate_splits_qualified_symbol() {
        let candidate = SearchCandidate::new("Tesla Inc.", "NASDAQ:TSLA", None);

        assert_eq!(candidate.local_symbol(), "TSLA");
        assert_eq!(candidate.symbol_qualifier(), Some("NASDAQ"));
        assert_eq!(candidate.comparison_text(), "Tesla Inc. (NASDAQ:TSLA)");
    }

    #[test]
    fn candidate_without_qualifier_keeps_symbol() {
        let candidate = SearchCandidate::new("BT Group", "BT-A.L", Some(String::from("LSE")));

        assert_eq!(candidate.local_symbol(), "BT-A.L");
        assert_eq!(candidate.symbol_qualifier(), None);
    }
}
