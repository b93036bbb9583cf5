use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::iso_date;
use crate::{DataSourceError, ValidationError};

/// Latest known index level on or before a requested date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketIndexPoint {
    #[serde(with = "iso_date")]
    pub as_of_date: Date,
    pub level: Decimal,
}

impl MarketIndexPoint {
    pub fn new(as_of_date: Date, level: Decimal) -> Self {
        Self { as_of_date, level }
    }

    /// Literal provenance tuple, e.g. `NASDAQ_COMPOSITE@2024-06-30=17637.12`.
    pub fn cite(&self, index_name: &str) -> String {
        format!(
            "{index_name}@{}={}",
            iso_date::format(self.as_of_date),
            self.level
        )
    }
}

/// Public comparable company with its EV/Revenue multiple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparableCompany {
    pub ticker: String,
    pub company_name: String,
    pub sector: String,
    pub ev_to_revenue: Decimal,
}

impl ComparableCompany {
    pub fn new(
        ticker: impl Into<String>,
        company_name: impl Into<String>,
        sector: impl Into<String>,
        ev_to_revenue: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            company_name: company_name.into(),
            sector: sector.into(),
            ev_to_revenue,
        }
    }
}

/// Aggregation applied to a peer group's multiples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    #[default]
    Median,
    Mean,
}

impl Statistic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Mean => "mean",
        }
    }
}

impl Display for Statistic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "median" => Ok(Self::Median),
            "mean" => Ok(Self::Mean),
            other => Err(ValidationError::UnsupportedStatistic {
                value: other.to_owned(),
            }),
        }
    }
}

/// Aggregate the EV/Revenue multiples of `companies`.
///
/// The median of an even-sized group is the mean of the two middle values.
pub fn aggregate_multiple(
    companies: &[ComparableCompany],
    statistic: Statistic,
) -> Result<Decimal, DataSourceError> {
    if companies.is_empty() {
        return Err(DataSourceError::EmptyPeerSet);
    }

    let mut multiples = companies
        .iter()
        .map(|company| company.ev_to_revenue)
        .collect::<Vec<_>>();

    let value = match statistic {
        Statistic::Mean => {
            multiples.iter().copied().sum::<Decimal>() / Decimal::from(multiples.len())
        }
        Statistic::Median => {
            multiples.sort_unstable();
            let mid = multiples.len() / 2;
            if multiples.len() % 2 == 0 {
                (multiples[mid - 1] + multiples[mid]) / Decimal::TWO
            } else {
                multiples[mid]
            }
        }
    };

    Ok(value)
}
