use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use time::macros::date;
use time::Date;
use vcaudit_core::{
    ComparableCompany, ComparableCompanySource, DataSourceError, DatasetDescriptor, EngineConfig,
    MarketIndexPoint, MarketIndexSource, MockComparableCompanySource, MockMarketIndexSource,
    Statistic, ValuationEngine,
};

#[derive(Clone)]
struct IndexCase {
    name: &'static str,
    source: Arc<dyn MarketIndexSource>,
    index: &'static str,
}

fn index_cases() -> Vec<IndexCase> {
    vec![
        IndexCase {
            name: "default mock",
            source: Arc::new(MockMarketIndexSource::default()),
            index: "NASDAQ_COMPOSITE",
        },
        IndexCase {
            name: "custom series",
            source: Arc::new(MockMarketIndexSource::empty().with_series(
                "CUSTOM",
                [
                    (date!(2024 - 01 - 31), dec!(100)),
                    (date!(2024 - 02 - 29), dec!(110)),
                    (date!(2024 - 03 - 31), dec!(121)),
                ],
            )),
            index: "CUSTOM",
        },
    ]
}

/// Stand-in for a live adapter: a flat index and a two-company universe.
struct FlatMarket;

impl MarketIndexSource for FlatMarket {
    fn get_level(
        &self,
        index_name: &str,
        as_of_date: Date,
    ) -> Result<MarketIndexPoint, DataSourceError> {
        if index_name != "FLAT" {
            return Err(DataSourceError::UnknownIndex {
                index: index_name.to_owned(),
            });
        }
        Ok(MarketIndexPoint::new(as_of_date, dec!(500)))
    }

    fn indices(&self) -> Vec<String> {
        vec![String::from("FLAT")]
    }

    fn dataset(&self) -> DatasetDescriptor {
        DatasetDescriptor::new("Flat index", "Constant level").with_version("flat-1")
    }

    fn source_kind(&self) -> &'static str {
        "live"
    }
}

impl ComparableCompanySource for FlatMarket {
    fn list_by_sector(&self, sector: &str) -> Result<Vec<ComparableCompany>, DataSourceError> {
        Ok(vec![
            ComparableCompany::new("AAA", "Alpha", sector, dec!(4)),
            ComparableCompany::new("BBB", "Beta", sector, dec!(6)),
        ])
    }

    fn list_by_tickers(
        &self,
        tickers: &[String],
    ) -> Result<Vec<ComparableCompany>, DataSourceError> {
        Err(DataSourceError::UnresolvedTickers {
            tickers: tickers.to_vec(),
        })
    }

    fn sectors(&self) -> Vec<String> {
        Vec::new()
    }

    fn dataset(&self) -> DatasetDescriptor {
        DatasetDescriptor::new("Flat comps", "Two fixed peers")
    }

    fn source_kind(&self) -> &'static str {
        "live"
    }
}

#[test]
fn index_lookups_never_resolve_after_requested_date() {
    let probes = [
        date!(2024 - 01 - 31),
        date!(2024 - 02 - 15),
        date!(2024 - 03 - 31),
        date!(2024 - 06 - 30),
        date!(2025 - 11 - 01),
    ];

    for case in index_cases() {
        for requested in probes {
            let point = case
                .source
                .get_level(case.index, requested)
                .unwrap_or_else(|err| panic!("{}: {requested}: {err}", case.name));
            assert!(point.as_of_date <= requested, "{}", case.name);
            assert!(point.level > Decimal::ZERO, "{}", case.name);
        }
    }
}

#[test]
fn index_sources_reject_dates_before_history() {
    for case in index_cases() {
        let err = case
            .source
            .get_level(case.index, date!(2000 - 01 - 01))
            .expect_err("history starts later");
        assert!(
            matches!(err, DataSourceError::NoObservation { .. }),
            "{}",
            case.name
        );
    }
}

#[test]
fn index_sources_list_the_indices_they_resolve() {
    for case in index_cases() {
        let indices = case.source.indices();
        assert!(indices.iter().any(|index| index == case.index), "{}", case.name);
        for index in indices {
            assert!(case.source.get_level(&index, date!(2030 - 01 - 01)).is_ok());
        }
    }
}

#[test]
fn index_dataset_is_versioned() {
    let dataset = MockMarketIndexSource::default().dataset();
    assert!(dataset.version.is_some());
    assert!(!dataset.label.is_empty());
}

#[test]
fn every_listed_sector_has_peers() {
    let source = MockComparableCompanySource::default();
    for sector in source.sectors() {
        let peers = source.list_by_sector(&sector).expect("listed sector");
        assert!(!peers.is_empty());
        assert!(peers.iter().all(|company| company.sector == sector));
        assert!(peers.iter().all(|company| company.ev_to_revenue > Decimal::ZERO));
    }
}

#[test]
fn ticker_lookup_resolves_across_sectors() {
    let source = MockComparableCompanySource::default();
    let tickers = vec![String::from("crwd"), String::from("NET"), String::from("Snow")];
    let peers = source.list_by_tickers(&tickers).expect("known tickers");
    assert_eq!(peers.len(), 3);
    let multiple = source
        .aggregate_multiple(&peers, Statistic::Median)
        .expect("non-empty");
    assert_eq!(multiple, dec!(14.2));
}

#[test]
fn engine_accepts_any_provider_implementation() {
    let flat = Arc::new(FlatMarket);
    let engine = ValuationEngine::with_sources(
        EngineConfig::default().with_default_public_index("FLAT"),
        flat.clone(),
        flat,
    );

    let last_round = engine
        .evaluate_value(&json!({
            "company_name": "Acme",
            "methodology": "last_round_market_adjusted",
            "as_of_date": "2025-06-30",
            "inputs": { "last_post_money_valuation": 2500000, "last_round_date": "2023-01-15" }
        }))
        .expect("flat index valuation")
        .valuation_result;
    assert_eq!(last_round.estimated_fair_value.amount, dec!(2500000));
    assert_eq!(last_round.confidence_indicators["data_source_type"], json!("live"));
    assert_eq!(last_round.citations[0].label, "Flat index");
    assert_eq!(last_round.citations[0].dataset_version.as_deref(), Some("flat-1"));

    let comps = engine
        .evaluate_value(&json!({
            "company_name": "Acme",
            "methodology": "comparable_companies",
            "as_of_date": "2025-06-30",
            "inputs": { "revenue_ltm": 1000, "sector": "anything" }
        }))
        .expect("flat comps valuation")
        .valuation_result;
    assert_eq!(comps.estimated_fair_value.amount, dec!(5000));
    assert_eq!(comps.confidence_indicators["peer_count"], json!(2));
}
