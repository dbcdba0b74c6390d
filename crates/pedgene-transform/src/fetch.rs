//! Dataset retrieval followed by an optional composite split.

use pedgene_model::{IndexedFrame, MalformedPolicy, Split};
use pedgene_taiga::{DatasetRef, DatasetSource};
use tracing::debug;

use crate::column::split_column;
use crate::error::Result;
use crate::header::{GeneMatrix, split_header};

/// A fetched table, shaped according to the requested [`Split`].
#[derive(Debug, Clone)]
pub enum Dataset {
    /// The table exactly as fetched.
    Raw(IndexedFrame),
    /// Gene keys on the columns (header split).
    GeneColumns(GeneMatrix),
    /// Gene ids on the rows (column split).
    GeneRows(IndexedFrame),
}

impl Dataset {
    pub fn height(&self) -> usize {
        match self {
            Self::Raw(frame) | Self::GeneRows(frame) => frame.height(),
            Self::GeneColumns(matrix) => matrix.height(),
        }
    }

    /// Flatten to a single frame.
    ///
    /// Gene columns are renamed `SYMBOL (ID)`.
    pub fn into_frame(self) -> Result<IndexedFrame> {
        match self {
            Self::Raw(frame) | Self::GeneRows(frame) => Ok(frame),
            Self::GeneColumns(matrix) => matrix.into_labelled(),
        }
    }
}

/// Fetch a dataset from `source` and apply `split`.
///
/// Fetch errors are returned unchanged. [`Split::None`] returns the table
/// as fetched.
pub fn get_from_taiga<S>(
    source: &S,
    dataset: &DatasetRef,
    split: &Split,
    policy: MalformedPolicy,
) -> Result<Dataset>
where
    S: DatasetSource + ?Sized,
{
    let table = source.fetch(dataset)?;
    debug!(dataset = %dataset, %split, rows = table.height(), "Reshaping fetched table");

    let shaped = match split {
        Split::None => Dataset::Raw(table),
        Split::Header => Dataset::GeneColumns(split_header(table, policy)?),
        Split::Column(col) => Dataset::GeneRows(split_column(table, col, policy)?),
    };
    Ok(shaped)
}
