use std::sync::Arc;

use tickmatch_core::{
    AlphaVantageAdapter, CatalogAdapter, CompanySource, DetailsRequest, ProviderId, SearchRequest,
    Ticker, YahooAdapter,
};
use tickmatch_tests::block_on;

#[derive(Clone)]
struct ProviderCase {
    id: ProviderId,
    source: Arc<dyn CompanySource>,
}

fn provider_cases() -> Vec<ProviderCase> {
    vec![
        ProviderCase {
            id: ProviderId::Alphavantage,
            source: Arc::new(AlphaVantageAdapter::default()),
        },
        ProviderCase {
            id: ProviderId::Yahoo,
            source: Arc::new(YahooAdapter::default()),
        },
        ProviderCase {
            id: ProviderId::Catalog,
            source: Arc::new(CatalogAdapter::default()),
        },
    ]
}

fn details_request(ticker: &str, exchange: &str) -> DetailsRequest {
    DetailsRequest::new(Ticker::parse(ticker).expect("valid ticker"), exchange)
        .expect("valid details request")
}

#[test]
fn every_provider_reports_its_own_id() {
    for case in provider_cases() {
        assert_eq!(case.source.id(), case.id);
    }
}

#[test]
fn search_returns_named_candidates_for_all_providers() {
    let request = SearchRequest::new("Apple").expect("valid search request");

    for case in provider_cases() {
        let candidates = block_on(case.source.search_symbol(request.clone())).unwrap_or_else(
            |error| panic!("provider '{}' search failed: {error}", case.id.as_str()),
        );
        assert!(
            !candidates.is_empty(),
            "provider '{}': expected at least one candidate",
            case.id
        );

        for candidate in &candidates {
            assert!(
                !candidate.name.trim().is_empty(),
                "provider '{}': candidate name",
                case.id
            );
            assert!(
                !candidate.local_symbol().is_empty(),
                "provider '{}': candidate symbol",
                case.id
            );
        }
        assert!(
            candidates.iter().any(|candidate| candidate.local_symbol() == "AAPL"),
            "provider '{}': AAPL among candidates",
            case.id
        );
    }
}

#[test]
fn search_without_hits_is_empty_not_a_fault() {
    let request = SearchRequest::new("Zzqx").expect("valid search request");

    for case in provider_cases() {
        let candidates = block_on(case.source.search_symbol(request.clone())).unwrap_or_else(
            |error| panic!("provider '{}' search failed: {error}", case.id.as_str()),
        );
        assert!(candidates.is_empty(), "provider '{}': no candidates", case.id);
    }
}

#[test]
fn details_return_record_with_ticker_and_exchange() {
    for case in provider_cases() {
        let record = block_on(case.source.fetch_details(details_request("AAPL", "NASDAQ")))
            .unwrap_or_else(|error| {
                panic!("provider '{}' details failed: {error}", case.id.as_str())
            })
            .unwrap_or_else(|| panic!("provider '{}': AAPL record", case.id.as_str()));

        assert_eq!(record.ticker.as_str(), "AAPL", "provider '{}': ticker", case.id);
        assert_eq!(record.exchange, "NASDAQ", "provider '{}': exchange", case.id);
        assert_eq!(
            record.company_name.as_deref(),
            Some("Apple Inc."),
            "provider '{}': name",
            case.id
        );
    }
}

#[test]
fn details_for_unknown_ticker_are_absent() {
    for case in provider_cases() {
        let record = block_on(case.source.fetch_details(details_request("INVALIDTICKER", "NYSE")))
            .unwrap_or_else(|error| {
                panic!("provider '{}' details failed: {error}", case.id.as_str())
            });
        assert_eq!(record, None, "provider '{}': no record", case.id);
    }
}

#[test]
fn details_report_the_provider_exchange_on_mismatch() {
    for case in provider_cases() {
        let record = block_on(case.source.fetch_details(details_request("MSFT", "NYSE")))
            .unwrap_or_else(|error| {
                panic!("provider '{}' details failed: {error}", case.id.as_str())
            })
            .unwrap_or_else(|| panic!("provider '{}': MSFT record", case.id.as_str()));

        assert_eq!(record.exchange, "NASDAQ", "provider '{}': exchange", case.id);
    }
}
