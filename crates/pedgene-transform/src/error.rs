//! Error types for table transformations.

use pedgene_model::{CompositeError, ContractError, FrameError};
use pedgene_taiga::FetchError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while reshaping a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Retrieval failed; the source's error is passed through unchanged.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A composite value could not be parsed.
    #[error(transparent)]
    Composite(#[from] CompositeError),

    /// The split arguments were invalid.
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    /// A named column is absent from the table.
    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),

    /// A composite column does not hold strings.
    #[error("column '{column}' has type {dtype}, expected strings")]
    NotStringColumn { column: String, dtype: String },

    /// The two sides of an index map differ in length.
    #[error("index map has {targets} targets but {sources} sources")]
    MapLengthMismatch { targets: usize, sources: usize },

    /// Index keys and map sources have no common comparison type.
    #[error("index keys of type {index} cannot be matched against map values of type {map}")]
    KeyTypeMismatch { index: String, map: String },

    /// Two column headers parse to the same gene.
    #[error("columns '{first}' and '{second}' both name gene {gene}")]
    DuplicateGene {
        gene: String,
        first: String,
        second: String,
    },

    /// A column split would overwrite an existing column.
    #[error("column '{0}' already exists and would be overwritten by the split")]
    ColumnCollision(String),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type alias for transformations.
pub type Result<T> = std::result::Result<T, TransformError>;
