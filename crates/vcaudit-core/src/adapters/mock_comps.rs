use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::MOCK_SOURCE_KIND;
use crate::data_source::{ComparableCompanySource, DatasetDescriptor};
use crate::domain::ComparableCompany;
use crate::DataSourceError;

const COMPS: [(&str, &str, &str, Decimal); 10] = [
    ("SNOW", "Snowflake", "enterprise_software", dec!(13.1)),
    ("DDOG", "Datadog", "enterprise_software", dec!(12.4)),
    ("MDB", "MongoDB", "enterprise_software", dec!(9.2)),
    ("ZS", "Zscaler", "enterprise_software", dec!(11.8)),
    ("S", "SentinelOne", "cybersecurity", dec!(8.6)),
    ("CRWD", "CrowdStrike", "cybersecurity", dec!(14.2)),
    ("OKTA", "Okta", "cybersecurity", dec!(7.7)),
    ("NET", "Cloudflare", "infrastructure_software", dec!(16.1)),
    ("FSLY", "Fastly", "infrastructure_software", dec!(3.8)),
    ("ESTC", "Elastic", "infrastructure_software", dec!(5.3)),
];

/// Public comps held in memory, filterable by sector or ticker.
#[derive(Debug, Clone)]
pub struct MockComparableCompanySource {
    companies: Vec<ComparableCompany>,
}

impl Default for MockComparableCompanySource {
    fn default() -> Self {
        Self::new(
            COMPS
                .iter()
                .map(|(ticker, name, sector, multiple)| {
                    ComparableCompany::new(*ticker, *name, *sector, *multiple)
                })
                .collect(),
        )
    }
}

impl MockComparableCompanySource {
    /// Build a source over `companies`; tickers are normalized to uppercase.
    pub fn new(companies: Vec<ComparableCompany>) -> Self {
        let companies = companies
            .into_iter()
            .map(|mut company| {
                company.ticker = company.ticker.trim().to_ascii_uppercase();
                company
            })
            .collect();
        Self { companies }
    }
}

impl ComparableCompanySource for MockComparableCompanySource {
    fn list_by_sector(&self, sector: &str) -> Result<Vec<ComparableCompany>, DataSourceError> {
        let comps = self
            .companies
            .iter()
            .filter(|company| company.sector == sector)
            .cloned()
            .collect::<Vec<_>>();

        if comps.is_empty() {
            return Err(DataSourceError::UnknownSector {
                sector: sector.to_owned(),
            });
        }

        Ok(comps)
    }

    fn list_by_tickers(
        &self,
        tickers: &[String],
    ) -> Result<Vec<ComparableCompany>, DataSourceError> {
        let requested = tickers
            .iter()
            .map(|ticker| ticker.trim().to_ascii_uppercase())
            .collect::<BTreeSet<_>>();

        let comps = self
            .companies
            .iter()
            .filter(|company| requested.contains(&company.ticker))
            .cloned()
            .collect::<Vec<_>>();

        let missing = requested
            .iter()
            .filter(|ticker| !comps.iter().any(|company| &company.ticker == *ticker))
            .cloned()
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(DataSourceError::UnresolvedTickers { tickers: missing });
        }

        Ok(comps)
    }

    fn sectors(&self) -> Vec<String> {
        self.companies
            .iter()
            .map(|company| company.sector.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn dataset(&self) -> DatasetDescriptor {
        DatasetDescriptor::new(
            "Mock public comp dataset",
            "In-memory EV/Revenue multiples by ticker and sector for enterprise software, \
             cybersecurity, and infrastructure software peers.",
        )
    }

    fn source_kind(&self) -> &'static str {
        MOCK_SOURCE_KIND
    }
}
