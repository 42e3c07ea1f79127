use thiserror::Error;

// Error types for the fare pipeline
#[derive(Error, Debug)]
pub enum FareError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid fare search endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid destination: {0:?}")]
    InvalidDestination(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid sale total: {0}")]
    PriceFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FareError {
    /// Only a malformed response is handled locally, by dropping that weekend.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FareError::UnexpectedShape(_))
    }
}
