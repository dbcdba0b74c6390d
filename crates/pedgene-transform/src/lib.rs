//! Reshaping of gene tables.
//!
//! This crate implements the table operations of the workflow:
//!
//! - **remap**: replace a table's row index through an index-mapping table
//! - **header**: split composite `NAME (ID)` column headers into gene keys
//! - **column**: split a composite column and re-index rows by gene id
//! - **fetch**: retrieve a dataset and apply one of the splits

pub mod column;
pub mod error;
pub mod fetch;
pub mod header;
pub mod remap;

pub use column::{GENE_COLUMN, GENE_ID_COLUMN, split_column};
pub use error::{Result, TransformError};
pub use fetch::{Dataset, get_from_taiga};
pub use header::{GeneMatrix, split_header};
pub use remap::{IndexMap, remap_index};
