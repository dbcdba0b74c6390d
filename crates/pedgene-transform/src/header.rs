//! Composite column headers.
//!
//! Matrices label their columns `SYMBOL (ID)`. Splitting turns every header
//! into a [`GeneKey`], giving the frame a two-level (gene id, symbol) column
//! structure while the rows stay untouched.

use std::collections::HashMap;

use pedgene_model::{GeneKey, IndexedFrame, MalformedPolicy, is_merged_entry, parse_composite};
use polars::prelude::{Column, PlSmallStr};
use tracing::{debug, warn};

use crate::error::{Result, TransformError};

/// A frame whose value columns are keyed by gene.
///
/// `genes()[i]` is the key of the i-th value column. The Polars column names
/// are kept as storage names; use the key-based accessors for lookups.
#[derive(Debug, Clone)]
pub struct GeneMatrix {
    frame: IndexedFrame,
    genes: Vec<GeneKey>,
    storage: Vec<PlSmallStr>,
}

impl GeneMatrix {
    pub fn frame(&self) -> &IndexedFrame {
        &self.frame
    }

    /// Column keys in frame order.
    pub fn genes(&self) -> &[GeneKey] {
        &self.genes
    }

    /// Gene ids of the columns in frame order.
    pub fn gene_ids(&self) -> Vec<i64> {
        self.genes.iter().map(|gene| gene.id).collect()
    }

    /// Number of gene columns.
    pub fn width(&self) -> usize {
        self.genes.len()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// First column whose gene id is `id`.
    pub fn column_by_id(&self, id: i64) -> Option<&Column> {
        let pos = self.genes.iter().position(|gene| gene.id == id)?;
        self.storage_column(pos)
    }

    /// The column keyed by exactly `key`.
    pub fn column_by_key(&self, key: &GeneKey) -> Option<&Column> {
        let pos = self.genes.iter().position(|gene| gene == key)?;
        self.storage_column(pos)
    }

    fn storage_column(&self, pos: usize) -> Option<&Column> {
        self.frame.data().column(&self.storage[pos]).ok()
    }

    /// Flatten to a frame whose gene columns are named `SYMBOL (ID)`.
    ///
    /// The row index is kept.
    pub fn into_labelled(self) -> Result<IndexedFrame> {
        let (mut data, index) = self.frame.into_parts();
        let mut names: Vec<PlSmallStr> = Vec::with_capacity(self.genes.len() + 1);
        names.extend(index.iter().cloned());
        names.extend(self.genes.iter().map(|gene| PlSmallStr::from(gene.to_string())));
        data.set_column_names(names)?;
        Ok(IndexedFrame::new(data, index)?)
    }

    pub fn into_parts(self) -> (IndexedFrame, Vec<GeneKey>) {
        (self.frame, self.genes)
    }
}

/// Split composite column headers into gene keys.
///
/// Columns whose header contains `&` are removed. Every other value column
/// header must parse as `SYMBOL (ID)`; with [`MalformedPolicy::Skip`] the
/// columns that do not are removed instead of failing the split. Two
/// headers naming the same gene are [`TransformError::DuplicateGene`]; with
/// `Skip` the later one is removed. The index column, if any, is kept first.
pub fn split_header(table: IndexedFrame, policy: MalformedPolicy) -> Result<GeneMatrix> {
    let mut genes = Vec::new();
    let mut storage = Vec::new();
    let mut seen: HashMap<GeneKey, PlSmallStr> = HashMap::new();
    let mut merged = 0usize;
    let mut skipped = 0usize;

    for name in table.value_column_names() {
        if is_merged_entry(&name) {
            merged += 1;
            continue;
        }
        match parse_composite(&name) {
            Ok(key) => {
                if let Some(first) = seen.get(&key) {
                    if policy == MalformedPolicy::Skip {
                        warn!(
                            column = %name,
                            first = %first,
                            gene = %key,
                            "Skipping duplicate gene header"
                        );
                        skipped += 1;
                        continue;
                    }
                    return Err(TransformError::DuplicateGene {
                        gene: key.to_string(),
                        first: first.to_string(),
                        second: name.to_string(),
                    });
                }
                seen.insert(key.clone(), name.clone());
                genes.push(key);
                storage.push(name);
            }
            Err(error) if policy == MalformedPolicy::Skip => {
                warn!(column = %name, %error, "Skipping malformed gene header");
                skipped += 1;
            }
            Err(error) => return Err(error.into()),
        }
    }

    let (data, index) = table.into_parts();
    let selection = index.iter().chain(storage.iter()).cloned();
    let data = data.select(selection)?;
    let frame = IndexedFrame::new(data, index)?;

    debug!(genes = genes.len(), merged, skipped, "Split composite column headers");
    Ok(GeneMatrix {
        frame,
        genes,
        storage,
    })
}
