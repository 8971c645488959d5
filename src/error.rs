use thiserror::Error;

/// Unified error type for the proxy picker
#[derive(Error, Debug)]
pub enum PickerError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid proxy URL: {0}")]
    InvalidProxyUrl(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP client errors
    #[error("HTTP error: {0}")]
    Http(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for proxy picker operations
pub type Result<T> = std::result::Result<T, PickerError>;

impl From<reqwest::Error> for PickerError {
    fn from(err: reqwest::Error) -> Self {
        PickerError::Http(err.to_string())
    }
}

impl From<url::ParseError> for PickerError {
    fn from(err: url::ParseError) -> Self {
        PickerError::InvalidProxyUrl(err.to_string())
    }
}
