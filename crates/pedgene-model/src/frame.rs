//! Polars frames with an explicit row index.
//!
//! Polars frames have no row labels. [`IndexedFrame`] names the column that
//! plays that role, or falls back to positional row numbers, so index-based
//! operations (remapping, re-indexing by gene id) have a well-defined key.

use polars::prelude::{Column, DataFrame, PlSmallStr, PolarsResult};

use crate::error::FrameError;

/// Name given to materialised positional indexes.
pub const POSITIONAL_INDEX_NAME: &str = "index";

/// A Polars frame plus the name of its row-index column.
///
/// When `index` is `None` the rows are indexed by position `0..height`.
#[derive(Debug, Clone)]
pub struct IndexedFrame {
    data: DataFrame,
    index: Option<PlSmallStr>,
}

impl IndexedFrame {
    /// Wrap a frame, checking that the index column exists.
    pub fn new(data: DataFrame, index: Option<PlSmallStr>) -> Result<Self, FrameError> {
        if let Some(name) = &index
            && data.column(name).is_err()
        {
            return Err(FrameError::IndexNotFound(name.to_string()));
        }
        Ok(Self { data, index })
    }

    /// Wrap a frame indexed by the named column.
    pub fn with_index(data: DataFrame, index: impl Into<PlSmallStr>) -> Result<Self, FrameError> {
        Self::new(data, Some(index.into()))
    }

    /// Wrap a frame indexed by row position.
    pub fn positional(data: DataFrame) -> Self {
        Self { data, index: None }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Name of the index column, `None` for positional frames.
    pub fn index_name(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// The row index as a column.
    ///
    /// Positional frames yield a `UInt64` column named
    /// [`POSITIONAL_INDEX_NAME`].
    pub fn index_values(&self) -> PolarsResult<Column> {
        match &self.index {
            Some(name) => self.data.column(name).cloned(),
            None => {
                let positions: Vec<u64> = (0..self.data.height() as u64).collect();
                Ok(Column::new(POSITIONAL_INDEX_NAME.into(), positions))
            }
        }
    }

    /// Names of all columns except the index, in frame order.
    pub fn value_column_names(&self) -> Vec<PlSmallStr> {
        self.data
            .get_column_names()
            .into_iter()
            .filter(|name| self.index.as_ref() != Some(*name))
            .cloned()
            .collect()
    }

    /// The frame without its index column.
    pub fn values(&self) -> PolarsResult<DataFrame> {
        match &self.index {
            Some(name) => self.data.drop(name),
            None => Ok(self.data.clone()),
        }
    }

    pub fn into_parts(self) -> (DataFrame, Option<PlSmallStr>) {
        (self.data, self.index)
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }
}
