use thiserror::Error;
use vcaudit_core::CoreError;
use vcaudit_store::StoreError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid request file: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("run not found: {0}")]
    RunNotFound(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Core(CoreError::Validation(_)) | Self::InvalidRequest(_) => 2,
            Self::Core(CoreError::DataSource(_)) => 3,
            Self::Core(CoreError::Serialization(_))
            | Self::Store(_)
            | Self::RunNotFound(_)
            | Self::Serialization(_) => 4,
            Self::Core(CoreError::Overflow(_)) => 10,
            Self::Server(_) => 11,
        }
    }
}
