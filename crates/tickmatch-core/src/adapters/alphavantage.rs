use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::catalog::{reference_catalog, CatalogAdapter};
use crate::circuit_breaker::CircuitBreaker;
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient, DEFAULT_TIMEOUT_MS};
use crate::provider::{CompanySource, DetailsRequest, SearchRequest, SourceError, SourceFuture};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::Throttle;
use crate::{CompanyRecord, ProviderId, SearchCandidate, Ticker};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage adapter supporting both real API calls and mock mode.
///
/// Search uses `SYMBOL_SEARCH`; detail lookup uses `OVERVIEW`, which is keyed
/// by ticker only, so the exchange in the returned record is whatever Alpha
/// Vantage reports for that symbol.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    timeout_ms: u64,
    circuit_breaker: Arc<CircuitBreaker>,
    throttle: Throttle,
    mock_catalog: Option<Arc<CatalogAdapter>>,
}

impl Default for AlphaVantageAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(NoopHttpClient), "demo")
    }
}

impl AlphaVantageAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        let mock_catalog = http_client.is_mock().then(|| {
            Arc::new(CatalogAdapter::with_id(
                ProviderId::Alphavantage,
                reference_catalog(),
            ))
        });

        Self {
            http_client,
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            circuit_breaker: Arc::new(CircuitBreaker::with_defaults("alphavantage")),
            throttle: Throttle::from_policy(&ProviderPolicy::alphavantage_default()),
            mock_catalog,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_circuit_breaker(mut self, circuit_breaker: Arc<CircuitBreaker>) -> Self {
        self.circuit_breaker = circuit_breaker;
        self
    }

    fn endpoint(&self, params: &[(&str, &str)]) -> String {
        let mut url = format!("{BASE_URL}?");
        for (name, value) in params {
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            url.push('&');
        }
        url.push_str("apikey=");
        url.push_str(&urlencoding::encode(&self.api_key));
        url
    }

    /// Runs one upstream GET through the breaker and the throttle and returns
    /// the raw body of a 2xx response.
    async fn execute(&self, params: &[(&str, &str)]) -> Result<String, SourceError> {
        if !self.circuit_breaker.allow_request() {
            return Err(SourceError::unavailable(
                "alphavantage circuit breaker is open; skipping upstream call",
            ));
        }

        self.throttle.acquire()?;

        let request = HttpRequest::get(self.endpoint(params)).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await.map_err(|error| {
            self.circuit_breaker.record_failure();
            SourceError::unavailable(format!("alphavantage transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            self.circuit_breaker.record_failure();
            return Err(SourceError::unavailable(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        self.circuit_breaker.record_success();
        Ok(response.body)
    }

    async fn execute_real_search(
        &self,
        req: &SearchRequest,
    ) -> Result<Vec<SearchCandidate>, SourceError> {
        let body = self
            .execute(&[("function", "SYMBOL_SEARCH"), ("keywords", req.query.as_str())])
            .await?;

        let response: AlphaVantageSearchResponse = serde_json::from_str(&body).map_err(|e| {
            SourceError::internal(format!("failed to parse alphavantage search response: {e}"))
        })?;
        response.notice.into_result()?;

        Ok(response
            .best_matches
            .into_iter()
            .map(|hit| SearchCandidate::new(hit.name, hit.symbol, hit.region))
            .collect())
    }

    async fn fetch_real_details(
        &self,
        req: &DetailsRequest,
    ) -> Result<Option<CompanyRecord>, SourceError> {
        let body = self
            .execute(&[("function", "OVERVIEW"), ("symbol", req.ticker.as_str())])
            .await?;

        let overview: AlphaVantageOverview = serde_json::from_str(&body).map_err(|e| {
            SourceError::internal(format!("failed to parse alphavantage overview: {e}"))
        })?;
        overview.notice.into_result()?;

        let Some(exchange) = overview.exchange.filter(|value| !value.trim().is_empty()) else {
            return Ok(None);
        };

        let ticker = match overview.symbol.as_deref().map(Ticker::parse) {
            Some(Ok(ticker)) => ticker,
            _ => req.ticker.clone(),
        };

        CompanyRecord::new(overview.name, ticker, exchange, overview.country)
            .map(Some)
            .map_err(|e| SourceError::internal(e.to_string()))
    }
}

impl CompanySource for AlphaVantageAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn search_symbol<'a>(&'a self, req: SearchRequest) -> SourceFuture<'a, Vec<SearchCandidate>> {
        Box::pin(async move {
            match &self.mock_catalog {
                Some(catalog) => Ok(catalog.search(&req.query)),
                None => self.execute_real_search(&req).await,
            }
        })
    }

    fn fetch_details<'a>(
        &'a self,
        req: DetailsRequest,
    ) -> SourceFuture<'a, Option<CompanyRecord>> {
        Box::pin(async move {
            match &self.mock_catalog {
                Some(catalog) => Ok(catalog.details(&req.ticker, &req.exchange)),
                None => self.fetch_real_details(&req).await,
            }
        })
    }
}

/// Informational keys Alpha Vantage returns with HTTP 200 instead of data.
#[derive(Debug, Clone, Default, Deserialize)]
struct AlphaVantageNotice {
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
}

impl AlphaVantageNotice {
    fn into_result(self) -> Result<(), SourceError> {
        if let Some(message) = self.error_message {
            return Err(SourceError::invalid_request(format!(
                "alphavantage rejected request: {message}"
            )));
        }
        if let Some(message) = self.note.or(self.information) {
            let lowered = message.to_ascii_lowercase();
            if lowered.contains("api key") && lowered.contains("invalid") {
                return Err(SourceError::unauthorized(format!(
                    "alphavantage rejected api key: {message}"
                )));
            }
            return Err(SourceError::rate_limited(format!(
                "alphavantage notice: {message}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<AlphaVantageSearchMatch>,
    #[serde(flatten)]
    notice: AlphaVantageNotice,
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageSearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name", default)]
    name: String,
    #[serde(rename = "4. region", default)]
    region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AlphaVantageOverview {
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Exchange", default)]
    exchange: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
    #[serde(flatten)]
    notice: AlphaVantageNotice,
}
