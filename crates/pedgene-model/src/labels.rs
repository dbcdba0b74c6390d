//! Pediatric cancer-type labels.
//!
//! The labels match the lineage names used in the screening datasets, so
//! they are compared exactly (case-sensitive).

use polars::prelude::{BooleanChunked, DataFrame, PolarsResult};

/// Pediatric cancer types considered in candidate-gene analyses, in
/// reporting order.
pub const PEDIATRIC_CANCERS: [&str; 9] = [
    "Ewing_sarcoma",
    "AML",
    "neuroblastoma",
    "rhabdomyosarcoma",
    "osteosarcoma",
    "malignant_rhabdoid_tumor",
    "medulloblastoma",
    "t-ALL",
    "b-ALL",
];

/// Returns true if `label` is one of [`PEDIATRIC_CANCERS`].
pub fn is_pediatric_cancer(label: &str) -> bool {
    PEDIATRIC_CANCERS.contains(&label)
}

/// Keep only the rows whose `column` holds a pediatric cancer label.
///
/// Null cells never match. Fails if the column is missing or is not a
/// string column.
pub fn filter_pediatric(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let labels = df.column(column)?.str()?;
    let mask: BooleanChunked = labels
        .into_iter()
        .map(|value| Some(value.is_some_and(is_pediatric_cancer)))
        .collect();
    df.filter(&mask)
}
