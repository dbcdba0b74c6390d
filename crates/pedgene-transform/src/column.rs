//! Composite value columns.
//!
//! Long-format tables carry the gene in one `SYMBOL (ID)` column. Splitting
//! replaces it with a `geneID` index column and a `gene` symbol column.

use pedgene_model::{
    CompositeError, IndexedFrame, MalformedPolicy, is_merged_entry, parse_composite,
};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, TransformError};

/// Name of the gene id column produced by a column split.
pub const GENE_ID_COLUMN: &str = "geneID";

/// Name of the gene symbol column produced by a column split.
pub const GENE_COLUMN: &str = "gene";

/// Split the composite column `col` and re-index the table by gene id.
///
/// The result starts with `geneID` (the new index) and `gene`, followed by
/// every original column except `col` and the previous index column. Rows
/// whose value contains `&` are excluded before parsing. Nulls and values
/// that do not parse are errors unless `policy` is
/// [`MalformedPolicy::Skip`], in which case those rows are dropped. A kept
/// column already named `geneID` or `gene` is
/// [`TransformError::ColumnCollision`].
pub fn split_column(
    table: IndexedFrame,
    col: &str,
    policy: MalformedPolicy,
) -> Result<IndexedFrame> {
    if let Some(existing) = table
        .value_column_names()
        .into_iter()
        .find(|name| {
            let name = name.as_str();
            name != col && (name == GENE_ID_COLUMN || name == GENE_COLUMN)
        })
    {
        return Err(TransformError::ColumnCollision(existing.to_string()));
    }

    let values = table
        .data()
        .column(col)
        .map_err(|_| TransformError::ColumnNotFound(col.to_string()))?;
    let values = values.str().map_err(|_| TransformError::NotStringColumn {
        column: col.to_string(),
        dtype: values.dtype().to_string(),
    })?;

    let mut rows: Vec<IdxSize> = Vec::with_capacity(values.len());
    let mut ids: Vec<i64> = Vec::with_capacity(values.len());
    let mut symbols: Vec<String> = Vec::with_capacity(values.len());
    let mut merged = 0usize;
    let mut skipped = 0usize;

    for (row, value) in values.into_iter().enumerate() {
        let parsed = match value {
            Some(value) if is_merged_entry(value) => {
                merged += 1;
                continue;
            }
            Some(value) => parse_composite(value),
            None => Err(CompositeError::Null {
                column: col.to_string(),
                row,
            }),
        };
        match parsed {
            Ok(key) => {
                rows.push(row as IdxSize);
                ids.push(key.id);
                symbols.push(key.symbol);
            }
            Err(error) if policy == MalformedPolicy::Skip => {
                warn!(column = col, row, %error, "Skipping malformed gene value");
                skipped += 1;
            }
            Err(error) => return Err(error.into()),
        }
    }

    let mut rest = table.values()?;
    if rest.column(col).is_ok() {
        rest = rest.drop(col)?;
    }
    if rest.width() > 0 && rows.len() != rest.height() {
        rest = rest.take(&IdxCa::from_vec(PlSmallStr::EMPTY, rows))?;
    }

    let mut columns = Vec::with_capacity(rest.width() + 2);
    columns.push(Column::new(GENE_ID_COLUMN.into(), ids));
    columns.push(Column::new(GENE_COLUMN.into(), symbols));
    columns.extend(rest.get_columns().iter().cloned());
    let data = DataFrame::new(columns)?;

    debug!(
        column = col,
        rows = data.height(),
        merged,
        skipped,
        "Split composite column"
    );
    Ok(IndexedFrame::with_index(data, GENE_ID_COLUMN)?)
}
