use thiserror::Error;

use crate::normalize::InvalidUrl;

/// Application-wide error types for Page Analyzer.
#[derive(Error, Debug)]
pub enum AppError {
    /// User-supplied address could not be turned into a canonical site name.
    #[error("Invalid URL: {0}")]
    InvalidInput(#[from] InvalidUrl),

    /// Store connection or query failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Outbound page fetch failed before a status code was received.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl AppError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::FetchFailed(_) => "fetch_failed",
            AppError::NotFound(_) => "not_found",
            AppError::ConfigError(_) => "config_error",
            AppError::HttpError(_) => "http_error",
        }
    }
}
