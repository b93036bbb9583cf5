//! In-memory data source adapters.
//!
//! Both adapters serve a small fixed dataset and never touch the network or
//! disk, which keeps valuations reproducible. A live adapter only needs to
//! implement the same trait from [`crate::data_source`].

mod mock_comps;
mod mock_index;

pub use mock_comps::MockComparableCompanySource;
pub use mock_index::{MockMarketIndexSource, MARKET_INDEX_DATASET_VERSION};

pub(crate) const MOCK_SOURCE_KIND: &str = "mock";
