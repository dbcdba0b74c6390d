//! Row-index remapping through an index-mapping table.
//!
//! An [`IndexMap`] pairs target keys with source keys. Each row of the
//! remapped table takes the target whose source equals the row's current
//! index value; rows without a match get a null index and are optionally
//! dropped.

use std::collections::HashMap;
use std::hash::Hash;

use pedgene_model::IndexedFrame;
use polars::prelude::*;
use tracing::debug;

use crate::error::{Result, TransformError};

/// Lookup table from source keys (values) to target keys (positions).
#[derive(Debug, Clone)]
pub struct IndexMap {
    targets: Column,
    sources: Column,
}

impl IndexMap {
    /// Pair `targets[i]` with `sources[i]`.
    pub fn new(targets: Column, sources: Column) -> Result<Self> {
        if targets.len() != sources.len() {
            return Err(TransformError::MapLengthMismatch {
                targets: targets.len(),
                sources: sources.len(),
            });
        }
        Ok(Self { targets, sources })
    }

    /// Use a frame's row index as targets and `value_column` as sources.
    pub fn from_frame(frame: &IndexedFrame, value_column: &str) -> Result<Self> {
        let sources = frame
            .data()
            .column(value_column)
            .map_err(|_| TransformError::ColumnNotFound(value_column.to_string()))?
            .clone();
        Self::new(frame.index_values()?, sources)
    }

    pub fn targets(&self) -> &Column {
        &self.targets
    }

    pub fn sources(&self) -> &Column {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

}

/// How index keys and map sources are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    /// Same non-float type on both sides (or an all-null side).
    Exact,
    /// Integers of any width.
    Integer,
    /// Numbers where at least one side is floating point.
    Float,
}

/// Common comparison type for index keys and map sources.
///
/// Numbers compare by value across widths and between integers and floats.
/// Strings never equal numbers, so mixing them is an error.
fn key_kind(index: &DataType, source: &DataType) -> Result<KeyKind> {
    let numeric = |dtype: &DataType| dtype.is_integer() || dtype.is_float();
    if matches!(index, DataType::Null) || matches!(source, DataType::Null) {
        return Ok(KeyKind::Exact);
    }
    if index.is_float() || source.is_float() {
        if numeric(index) && numeric(source) {
            return Ok(KeyKind::Float);
        }
    } else if index == source {
        return Ok(KeyKind::Exact);
    } else if index.is_integer() && source.is_integer() {
        return Ok(KeyKind::Integer);
    }
    Err(TransformError::KeyTypeMismatch {
        index: index.to_string(),
        map: source.to_string(),
    })
}

/// Position of the first occurrence of every non-null key.
fn first_positions<K, I>(values: I) -> HashMap<K, IdxSize>
where
    K: Hash + Eq,
    I: Iterator<Item = Option<K>>,
{
    let mut lookup = HashMap::new();
    for (pos, value) in values.enumerate() {
        if let Some(value) = value {
            lookup.entry(value).or_insert(pos as IdxSize);
        }
    }
    lookup
}

/// Hashable float key. NaN never matches and `-0.0` equals `0.0`.
fn float_key(value: f64) -> Option<u64> {
    if value.is_nan() {
        None
    } else if value == 0.0 {
        Some(0)
    } else {
        Some(value.to_bits())
    }
}

/// Map position of the first source equal to each key, null when absent.
fn match_positions(keys: &Column, sources: &Column) -> Result<IdxCa> {
    let kind = key_kind(keys.dtype(), sources.dtype())?;
    if kind != KeyKind::Exact {
        debug!(
            index_dtype = %keys.dtype(),
            map_dtype = %sources.dtype(),
            ?kind,
            "Comparing index and map keys by numeric value"
        );
    }
    let positions: IdxCa = match kind {
        KeyKind::Exact => {
            // Both sides share one type, so their text forms compare exactly.
            let sources = sources.cast(&DataType::String)?;
            let keys = keys.cast(&DataType::String)?;
            let lookup = first_positions(sources.str()?.into_iter());
            keys.str()?
                .into_iter()
                .map(|key| key.and_then(|key| lookup.get(key).copied()))
                .collect()
        }
        KeyKind::Integer => {
            let sources = sources.cast(&DataType::Int64)?;
            let keys = keys.cast(&DataType::Int64)?;
            let lookup = first_positions(sources.i64()?.into_iter());
            keys.i64()?
                .into_iter()
                .map(|key| key.and_then(|key| lookup.get(&key).copied()))
                .collect()
        }
        KeyKind::Float => {
            let sources = sources.cast(&DataType::Float64)?;
            let keys = keys.cast(&DataType::Float64)?;
            let lookup = first_positions(
                sources
                    .f64()?
                    .into_iter()
                    .map(|value| value.and_then(float_key)),
            );
            keys.f64()?
                .into_iter()
                .map(|key| {
                    key.and_then(float_key)
                        .and_then(|key| lookup.get(&key).copied())
                })
                .collect()
        }
    };
    Ok(positions)
}

/// Replace the row index of `table` using `index_map`.
///
/// Each index value is looked up among the map's sources; the first match
/// in map order wins and its target becomes the new index value. Unmatched
/// rows get null, and are removed when `drop_unmapped` is set. Numeric
/// keys compare by value, so `1`, `1i32` and `1.0` are equal; a string key
/// never equals a number and mixing the two is
/// [`TransformError::KeyTypeMismatch`].
///
/// The new index column is named `index_field_name`, placed first, and
/// replaces both the old index column and any value column of that name.
pub fn remap_index(
    table: IndexedFrame,
    index_map: &IndexMap,
    index_field_name: &str,
    drop_unmapped: bool,
) -> Result<IndexedFrame> {
    let keys = table.index_values()?;
    let positions = match_positions(&keys, &index_map.sources)?;
    let unmapped = positions.null_count();

    let new_index = if unmapped == positions.len() {
        Column::full_null(
            index_field_name.into(),
            positions.len(),
            index_map.targets.dtype(),
        )
    } else {
        index_map
            .targets
            .take(&positions)?
            .with_name(index_field_name.into())
    };

    let (mut data, old_index) = table.into_parts();
    if let Some(old) = old_index {
        data = data.drop(&old)?;
    }
    if data.column(index_field_name).is_ok() {
        data = data.drop(index_field_name)?;
    }
    data.insert_column(0, new_index)?;

    let rows = data.height();
    if drop_unmapped {
        let mask = data.column(index_field_name)?.is_not_null();
        data = data.filter(&mask)?;
    }

    debug!(
        rows,
        mapped = rows - unmapped,
        unmapped,
        dropped = rows - data.height(),
        index = index_field_name,
        "Remapped row index"
    );
    Ok(IndexedFrame::with_index(data, index_field_name)?)
}
