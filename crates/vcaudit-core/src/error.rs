use thiserror::Error;

/// Request content that is malformed or semantically invalid.
///
/// Always caused by the caller's input, never by the environment, so these
/// are surfaced verbatim and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: '{field}'")]
    MissingField { field: String },
    #[error("field '{field}' must be of type {expected}, received {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: &'static str,
    },
    #[error("field '{field}' must be numeric, received bool")]
    BooleanNotNumeric { field: String },
    #[error("field '{field}' must be numeric")]
    NotNumeric { field: String },
    #[error("field '{field}' is outside the supported numeric range")]
    OutOfRange { field: String },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: String },
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("date must be a string in YYYY-MM-DD format, received {value}")]
    DateNotString { value: String },
    #[error("invalid date '{value}', expected format YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("unknown methodology '{name}'. Available: {}", available.join(", "))]
    UnknownMethodology { name: String, available: Vec<String> },
    #[error("field 'statistic' must be either 'median' or 'mean', received '{value}'")]
    UnsupportedStatistic { value: String },
    #[error("field '{field}' cannot exceed {max}")]
    AboveMaximum { field: String, max: u32 },
    #[error("field '{field}' must be a list of ticker symbols")]
    NotAList { field: String },
}

/// Well-formed request that references data the catalog does not hold.
///
/// Depends on the state of the data set rather than on the request shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("unknown index '{index}'")]
    UnknownIndex { index: String },
    #[error("no index level for {index} on or before {date}")]
    NoObservation { index: String, date: String },
    #[error("no comps configured for sector '{sector}'")]
    UnknownSector { sector: String },
    #[error("missing comps for tickers: {}", tickers.join(", "))]
    UnresolvedTickers { tickers: Vec<String> },
    #[error("cannot aggregate multiples of an empty peer set")]
    EmptyPeerSet,
    #[error("index level for {index} on {date} is zero")]
    ZeroIndexLevel { index: String, date: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Whether adapters should report this as a client error (bad request)
    /// rather than a server fault.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::DataSource(_))
    }
}
