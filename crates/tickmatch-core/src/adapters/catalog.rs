use crate::provider::{CompanySource, DetailsRequest, SearchRequest, SourceFuture};
use crate::similarity::normalize;
use crate::{CompanyRecord, ProviderId, SearchCandidate, Ticker};

/// Minimum shared prefix between a query token and a name/symbol token for a
/// catalog entry to be returned by search.
const SCREEN_PREFIX_LEN: usize = 2;

/// One listing in an in-memory catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    /// Region/exchange fragment reported on search hits. Defaults to the exchange.
    pub region: Option<String>,
    pub country: Option<String>,
}

impl CatalogEntry {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, exchange: impl Into<String>) -> Self {
        let exchange = exchange.into();
        Self {
            symbol: symbol.into(),
            name: name.into(),
            region: Some(exchange.clone()),
            exchange,
            country: None,
        }
    }

    pub fn with_region(mut self, region: Option<&str>) -> Self {
        self.region = region.map(str::to_owned);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    fn candidate(&self) -> SearchCandidate {
        SearchCandidate::new(self.name.clone(), self.symbol.clone(), self.region.clone())
    }

    fn record(&self) -> Option<CompanyRecord> {
        let local_symbol = self.symbol.rsplit(':').next().unwrap_or(&self.symbol);
        let ticker = Ticker::parse(local_symbol).ok()?;
        CompanyRecord::new(
            Some(self.name.clone()),
            ticker,
            self.exchange.clone(),
            self.country.clone(),
        )
        .ok()
    }
}

/// In-memory provider over a fixed list of listings.
///
/// Used for offline mode and as the mock backend of the HTTP adapters. Search
/// keeps catalog order and screens entries by a two-character token prefix, so
/// light typos still reach the scorer. Detail lookup returns the ticker's
/// listing on the requested exchange when present and otherwise the first
/// listing the catalog has for that ticker.
#[derive(Debug, Clone)]
pub struct CatalogAdapter {
    id: ProviderId,
    entries: Vec<CatalogEntry>,
}

impl Default for CatalogAdapter {
    fn default() -> Self {
        Self::new(reference_catalog())
    }
}

impl CatalogAdapter {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self::with_id(ProviderId::Catalog, entries)
    }

    /// Catalog reporting as another provider, used by adapter mock modes.
    pub fn with_id(id: ProviderId, entries: Vec<CatalogEntry>) -> Self {
        Self { id, entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn search(&self, query: &str) -> Vec<SearchCandidate> {
        let query = normalize(query);
        let prefixes = query
            .split_whitespace()
            .map(|token| token.chars().take(SCREEN_PREFIX_LEN).collect::<String>())
            .collect::<Vec<_>>();
        if prefixes.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| {
                let haystack = normalize(&format!("{} {}", entry.name, entry.symbol));
                haystack
                    .split_whitespace()
                    .any(|token| prefixes.iter().any(|prefix| token.starts_with(prefix.as_str())))
            })
            .map(CatalogEntry::candidate)
            .collect()
    }

    pub fn details(&self, ticker: &Ticker, exchange: &str) -> Option<CompanyRecord> {
        let listings = self
            .entries
            .iter()
            .filter_map(CatalogEntry::record)
            .filter(|record| record.ticker == *ticker)
            .collect::<Vec<_>>();

        let exact = listings
            .iter()
            .position(|record| record.exchange.eq_ignore_ascii_case(exchange));
        match exact {
            Some(index) => listings.into_iter().nth(index),
            None => listings.into_iter().next(),
        }
    }
}

impl CompanySource for CatalogAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn search_symbol<'a>(&'a self, req: SearchRequest) -> SourceFuture<'a, Vec<SearchCandidate>> {
        Box::pin(async move { Ok(self.search(&req.query)) })
    }

    fn fetch_details<'a>(
        &'a self,
        req: DetailsRequest,
    ) -> SourceFuture<'a, Option<CompanyRecord>> {
        Box::pin(async move { Ok(self.details(&req.ticker, &req.exchange)) })
    }
}

/// Built-in offline listings for a handful of widely held names.
pub fn reference_catalog() -> Vec<CatalogEntry> {
    [
        ("AAPL", "Apple Inc.", "NASDAQ", "United States"),
        ("MSFT", "Microsoft Corporation", "NASDAQ", "United States"),
        ("GOOG", "Alphabet Inc.", "NASDAQ", "United States"),
        ("AMZN", "Amazon.com, Inc.", "NASDAQ", "United States"),
        ("TSLA", "Tesla Inc.", "NASDAQ", "United States"),
        ("IBM", "International Business Machines Corporation", "NYSE", "United States"),
        ("MMM", "3M Company", "NYSE", "United States"),
        ("ORCL", "Oracle Corporation", "NYSE", "United States"),
        ("HSBA", "HSBC Holdings plc", "LSE", "United Kingdom"),
        ("RELIANCE", "Reliance Industries Limited", "NSE", "India"),
    ]
    .into_iter()
    .map(|(symbol, name, exchange, country)| {
        CatalogEntry::new(symbol, name, exchange).with_country(country)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(value: &str) -> Ticker {
        Ticker::parse(value).expect("valid ticker")
    }

    #[test]
    fn search_tolerates_typos_through_prefix_screen() {
        let catalog = CatalogAdapter::default();

        let hits = catalog.search("Telsa");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "TSLA");
        assert_eq!(hits[0].region.as_deref(), Some("NASDAQ"));
    }

    #[test]
    fn search_keeps_catalog_order() {
        let catalog = CatalogAdapter::new(vec![
            CatalogEntry::new("AAPL", "Apple Inc.", "NASDAQ"),
            CatalogEntry::new("APLE", "Apple Hospitality REIT", "NYSE"),
        ]);

        let symbols = catalog
            .search("apple")
            .into_iter()
            .map(|hit| hit.symbol)
            .collect::<Vec<_>>();
        assert_eq!(symbols, vec!["AAPL", "APLE"]);
    }

    #[test]
    fn search_with_blank_query_is_empty() {
        assert!(CatalogAdapter::default().search("  ").is_empty());
    }

    #[test]
    fn details_report_listing_exchange() {
        let catalog = CatalogAdapter::default();

        let record = catalog
            .details(&ticker("MSFT"), "NYSE")
            .expect("ticker is listed");
        assert_eq!(record.exchange, "NASDAQ");
        assert_eq!(record.company_name.as_deref(), Some("Microsoft Corporation"));
        assert_eq!(record.country.as_deref(), Some("United States"));
    }

    #[test]
    fn details_prefer_requested_exchange() {
        let catalog = CatalogAdapter::new(vec![
            CatalogEntry::new("SHEL", "Shell plc", "NYSE"),
            CatalogEntry::new("SHEL", "Shell plc", "LSE"),
        ]);

        let record = catalog.details(&ticker("SHEL"), "LSE").expect("listed");
        assert_eq!(record.exchange, "LSE");
    }

    #[test]
    fn details_for_unknown_ticker_is_none() {
        assert!(CatalogAdapter::default()
            .details(&ticker("INVALIDTICKER"), "NYSE")
            .is_none());
    }
}
