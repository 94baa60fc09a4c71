use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::catalog::{CatalogAdapter, CatalogEntry};
use crate::circuit_breaker::CircuitBreaker;
use crate::http_client::{HttpClient, HttpRequest, NoopHttpClient, DEFAULT_TIMEOUT_MS};
use crate::provider::{CompanySource, DetailsRequest, SearchRequest, SourceError, SourceFuture};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::Throttle;
use crate::{CompanyRecord, ProviderId, SearchCandidate, Ticker};

const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
const QUOTES_COUNT: usize = 10;

/// Venue suffixes Yahoo appends to non-US listings (`HSBA.L`, `RY.TO`).
const VENUE_SUFFIXES: &[&str] = &[
    "AS", "AX", "BO", "BR", "CO", "DE", "F", "HE", "HK", "IR", "JO", "KS", "L", "LS", "MC",
    "MI", "MX", "NS", "NZ", "OL", "PA", "SA", "SI", "SS", "ST", "SW", "SZ", "T", "TO", "V",
    "VI", "WA",
];

/// Local exchange ticker of a Yahoo symbol. Share-class suffixes (`BRK.B`) are
/// part of the ticker and stay.
fn local_symbol(symbol: &str) -> &str {
    match symbol.rsplit_once('.') {
        Some((base, suffix)) if !base.is_empty() && VENUE_SUFFIXES.contains(&suffix) => base,
        _ => symbol,
    }
}

/// Yahoo Finance adapter over the public search endpoint.
///
/// Yahoo has no keyless overview endpoint, so detail lookup searches for the
/// ticker and keeps the listing whose local symbol matches exactly, preferring
/// the requested exchange.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
    circuit_breaker: Arc<CircuitBreaker>,
    throttle: Throttle,
    mock_catalog: Option<Arc<CatalogAdapter>>,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(NoopHttpClient))
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        let mock_catalog = http_client
            .is_mock()
            .then(|| Arc::new(CatalogAdapter::with_id(ProviderId::Yahoo, yahoo_catalog())));

        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            circuit_breaker: Arc::new(CircuitBreaker::with_defaults("yahoo")),
            throttle: Throttle::from_policy(&ProviderPolicy::yahoo_default()),
            mock_catalog,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_quotes(&self, query: &str) -> Result<Vec<YahooSearchQuote>, SourceError> {
        if !self.circuit_breaker.allow_request() {
            return Err(SourceError::unavailable("yahoo circuit breaker is open"));
        }

        self.throttle.acquire()?;

        let endpoint = format!(
            "{SEARCH_URL}?q={}&quotesCount={QUOTES_COUNT}&newsCount=0",
            urlencoding::encode(query)
        );
        let request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            self.circuit_breaker.record_failure();
            SourceError::unavailable(format!("yahoo transport error: {}", e.message()))
        })?;

        match response.status {
            401 | 403 => {
                self.circuit_breaker.record_failure();
                return Err(SourceError::unauthorized(format!(
                    "yahoo rejected request with status {}",
                    response.status
                )));
            }
            429 => {
                return Err(SourceError::rate_limited("yahoo returned status 429"));
            }
            status if !response.is_success() => {
                self.circuit_breaker.record_failure();
                return Err(SourceError::unavailable(format!(
                    "yahoo returned status {status}"
                )));
            }
            _ => {}
        }

        self.circuit_breaker.record_success();

        let search_response: YahooSearchResponse = serde_json::from_str(&response.body)
            .map_err(|e| SourceError::internal(format!("failed to parse yahoo search response: {e}")))?;
        Ok(search_response.quotes)
    }

    async fn execute_real_search(
        &self,
        req: &SearchRequest,
    ) -> Result<Vec<SearchCandidate>, SourceError> {
        let quotes = self.fetch_quotes(&req.query).await?;
        Ok(quotes.into_iter().map(YahooSearchQuote::into_candidate).collect())
    }

    async fn fetch_real_details(
        &self,
        req: &DetailsRequest,
    ) -> Result<Option<CompanyRecord>, SourceError> {
        let quotes = self.fetch_quotes(req.ticker.as_str()).await?;

        let listings = quotes
            .into_iter()
            .filter_map(YahooSearchQuote::into_record)
            .filter(|record| record.ticker == req.ticker)
            .collect::<Vec<_>>();

        let exact = listings
            .iter()
            .position(|record| record.exchange.eq_ignore_ascii_case(&req.exchange));
        Ok(match exact {
            Some(index) => listings.into_iter().nth(index),
            None => listings.into_iter().next(),
        })
    }
}

impl CompanySource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
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

#[derive(Debug, Clone, Deserialize)]
struct YahooSearchResponse {
    #[serde(default)]
    quotes: Vec<YahooSearchQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooSearchQuote {
    symbol: String,
    #[serde(rename = "longname", default)]
    long_name: Option<String>,
    #[serde(rename = "shortname", default)]
    short_name: Option<String>,
    #[serde(rename = "exchDisp", default)]
    exchange_display: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
}

impl YahooSearchQuote {
    fn display_name(&self) -> Option<String> {
        self.long_name.clone().or_else(|| self.short_name.clone())
    }

    fn venue(&self) -> Option<String> {
        self.exchange_display
            .clone()
            .or_else(|| self.exchange.clone())
            .map(|venue| venue.trim().to_ascii_uppercase())
            .filter(|venue| !venue.is_empty())
    }

    fn into_candidate(self) -> SearchCandidate {
        let name = self.display_name().unwrap_or_else(|| self.symbol.clone());
        SearchCandidate::new(name, local_symbol(&self.symbol), self.venue())
    }

    fn into_record(self) -> Option<CompanyRecord> {
        let ticker = Ticker::parse(local_symbol(&self.symbol)).ok()?;
        CompanyRecord::new(self.display_name(), ticker, self.venue()?, None).ok()
    }
}

/// Offline listings, keyed by Yahoo symbol and reduced to the local ticker the
/// real adapter reports.
fn yahoo_catalog() -> Vec<CatalogEntry> {
    [
        ("AAPL", "Apple Inc.", "NASDAQ"),
        ("MSFT", "Microsoft Corporation", "NASDAQ"),
        ("TSLA", "Tesla, Inc.", "NASDAQ"),
        ("ORCL", "Oracle Corporation", "NYSE"),
        ("BRK.B", "Berkshire Hathaway Inc.", "NYSE"),
        ("HSBA.L", "HSBC Holdings plc", "LSE"),
        ("SHEL", "Shell plc", "NYSE"),
        ("SHEL.L", "Shell plc", "LSE"),
    ]
    .into_iter()
    .map(|(symbol, name, exchange)| CatalogEntry::new(local_symbol(symbol), name, exchange))
    .collect()
}
