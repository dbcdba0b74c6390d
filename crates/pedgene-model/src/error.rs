//! Error types for the pedgene domain model.

use thiserror::Error;

/// Failure to read a composite `NAME (ID)` value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    /// No space separates the name from the id.
    #[error("composite value '{value}' has no space between name and id")]
    MissingSeparator { value: String },

    /// The id part is not an integer once its parentheses are stripped.
    #[error("composite value '{value}' has a non-integer id '{id_part}'")]
    InvalidId { value: String, id_part: String },

    /// A composite column held a null.
    #[error("composite column '{column}' has a null value at row {row}")]
    Null { column: String, row: usize },
}

/// Misuse of the split API that is rejected instead of coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The split attribute is not `header`, `column`, or absent.
    #[error("unknown split attribute '{0}' (expected 'header' or 'column')")]
    UnknownSplitAttribute(String),

    /// `column` splitting was requested without naming the column.
    #[error("split attribute 'column' requires a column name")]
    MissingColumn,
}

/// Failure to build or query an [`IndexedFrame`](crate::IndexedFrame).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The requested index column does not exist.
    #[error("index column '{0}' not found in frame")]
    IndexNotFound(String),
}
