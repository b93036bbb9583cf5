use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::{self, Citation, ComparableCompany, MarketIndexPoint, Statistic};
use crate::DataSourceError;

/// Static description of the dataset a source serves, used for citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub label: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DatasetDescriptor {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn citation(&self) -> Citation {
        Citation::new(self.label.clone(), self.detail.clone())
            .with_dataset_version(self.version.clone())
    }
}

/// Historical market-index levels.
///
/// Implementations must be read-only after construction; methodologies call
/// them concurrently without locking.
pub trait MarketIndexSource: Send + Sync {
    /// Latest observation of `index_name` dated on or before `as_of_date`.
    fn get_level(
        &self,
        index_name: &str,
        as_of_date: Date,
    ) -> Result<MarketIndexPoint, DataSourceError>;

    /// Index names this source can resolve, sorted.
    fn indices(&self) -> Vec<String>;

    fn dataset(&self) -> DatasetDescriptor;

    /// Marker reported in confidence indicators, e.g. `mock` or `live`.
    fn source_kind(&self) -> &'static str;
}

/// Public comparable-company reference data.
pub trait ComparableCompanySource: Send + Sync {
    /// All companies tagged with `sector`; an empty result is an error.
    fn list_by_sector(&self, sector: &str) -> Result<Vec<ComparableCompany>, DataSourceError>;

    /// Companies for `tickers`, matched case-insensitively. Fails naming
    /// every ticker that could not be resolved.
    fn list_by_tickers(&self, tickers: &[String])
        -> Result<Vec<ComparableCompany>, DataSourceError>;

    fn aggregate_multiple(
        &self,
        companies: &[ComparableCompany],
        statistic: Statistic,
    ) -> Result<Decimal, DataSourceError> {
        domain::aggregate_multiple(companies, statistic)
    }

    /// Sector names this source covers, sorted.
    fn sectors(&self) -> Vec<String>;

    fn dataset(&self) -> DatasetDescriptor;

    fn source_kind(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_citation_carries_version() {
        let citation = DatasetDescriptor::new("Index levels", "Quarterly closes")
            .with_version("v1")
            .citation();
        assert_eq!(citation.label, "Index levels");
        assert_eq!(citation.dataset_version.as_deref(), Some("v1"));
        assert!(citation.resolved_data_points.is_empty());
    }
}
