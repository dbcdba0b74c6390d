//! Error types for dataset retrieval.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching a dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The HTTP request could not be sent or its body read.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error("Taiga API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The dataset, version, or file does not exist.
    #[error("dataset not found: {0}")]
    NotFound(String),

    /// The token was rejected.
    #[error("not authorized to read dataset {0}")]
    Unauthorized(String),

    /// The file is still being converted on the server.
    #[error("dataset {dataset} is not ready (state: {state})")]
    NotReady { dataset: String, state: String },

    /// The metadata response could not be decoded.
    #[error("invalid Taiga response: {0}")]
    Json(#[from] serde_json::Error),

    /// The downloaded file is not readable CSV.
    #[error("failed to parse CSV for {dataset}: {message}")]
    Csv { dataset: String, message: String },

    /// The token file could not be read.
    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither a token nor a token file is available.
    #[error("no Taiga token configured (set TAIGA_TOKEN or create {0})")]
    MissingToken(PathBuf),

    /// A source-specific failure, used by non-HTTP sources.
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Returns whether the failure may go away on its own.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::NotReady { .. })
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
