use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid tier index: {index} (expected 0..{count})")]
    InvalidTier { index: usize, count: usize },

    #[error("Unknown tier: {0}")]
    UnknownTier(String),

    #[error("Product not found at position {0}")]
    ProductNotFound(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
