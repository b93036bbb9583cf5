use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::date;
use time::Date;

use super::MOCK_SOURCE_KIND;
use crate::data_source::{DatasetDescriptor, MarketIndexSource};
use crate::domain::{iso_date, MarketIndexPoint};
use crate::DataSourceError;

pub const MARKET_INDEX_DATASET_VERSION: &str = "mock-index-2026.02.18";

const NASDAQ_COMPOSITE: [(Date, Decimal); 10] = [
    (date!(2023 - 12 - 31), dec!(15011.35)),
    (date!(2024 - 03 - 31), dec!(16379.46)),
    (date!(2024 - 06 - 30), dec!(17637.12)),
    (date!(2024 - 09 - 30), dec!(16828.43)),
    (date!(2024 - 12 - 31), dec!(18842.12)),
    (date!(2025 - 03 - 31), dec!(18032.90)),
    (date!(2025 - 06 - 30), dec!(19422.55)),
    (date!(2025 - 09 - 30), dec!(20122.04)),
    (date!(2025 - 12 - 31), dec!(20905.88)),
    (date!(2026 - 02 - 18), dec!(21311.12)),
];

const RUSSELL_2000: [(Date, Decimal); 10] = [
    (date!(2023 - 12 - 31), dec!(2011.44)),
    (date!(2024 - 03 - 31), dec!(2107.88)),
    (date!(2024 - 06 - 30), dec!(2056.31)),
    (date!(2024 - 09 - 30), dec!(2190.04)),
    (date!(2024 - 12 - 31), dec!(2251.11)),
    (date!(2025 - 03 - 31), dec!(2176.92)),
    (date!(2025 - 06 - 30), dec!(2294.53)),
    (date!(2025 - 09 - 30), dec!(2340.19)),
    (date!(2025 - 12 - 31), dec!(2389.44)),
    (date!(2026 - 02 - 18), dec!(2412.90)),
];

/// Index history held in memory, resolved with closest-prior-observation
/// semantics.
#[derive(Debug, Clone)]
pub struct MockMarketIndexSource {
    series: HashMap<String, BTreeMap<Date, Decimal>>,
}

impl Default for MockMarketIndexSource {
    fn default() -> Self {
        Self::empty()
            .with_series("NASDAQ_COMPOSITE", NASDAQ_COMPOSITE)
            .with_series("RUSSELL_2000", RUSSELL_2000)
    }
}

impl MockMarketIndexSource {
    pub fn empty() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    /// Add or replace the history for `index_name`.
    pub fn with_series(
        mut self,
        index_name: impl Into<String>,
        points: impl IntoIterator<Item = (Date, Decimal)>,
    ) -> Self {
        self.series
            .insert(index_name.into(), points.into_iter().collect());
        self
    }
}

impl MarketIndexSource for MockMarketIndexSource {
    fn get_level(
        &self,
        index_name: &str,
        as_of_date: Date,
    ) -> Result<MarketIndexPoint, DataSourceError> {
        let history = self
            .series
            .get(index_name)
            .ok_or_else(|| DataSourceError::UnknownIndex {
                index: index_name.to_owned(),
            })?;

        let (observed, level) = history.range(..=as_of_date).next_back().ok_or_else(|| {
            DataSourceError::NoObservation {
                index: index_name.to_owned(),
                date: iso_date::format(as_of_date),
            }
        })?;

        if *observed != as_of_date {
            tracing::debug!(
                index = index_name,
                requested = %iso_date::format(as_of_date),
                resolved = %iso_date::format(*observed),
                "index level resolved to prior observation"
            );
        }

        Ok(MarketIndexPoint::new(*observed, *level))
    }

    fn indices(&self) -> Vec<String> {
        let mut names = self.series.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    fn dataset(&self) -> DatasetDescriptor {
        DatasetDescriptor::new(
            "Mock market index dataset",
            "In-memory quarter-end index levels for NASDAQ Composite and Russell 2000, \
             resolved to the latest observation on or before each requested date.",
        )
        .with_version(MARKET_INDEX_DATASET_VERSION)
    }

    fn source_kind(&self) -> &'static str {
        MOCK_SOURCE_KIND
    }
}
