//! Core types shared by the pedgene crates.
//!
//! - **labels**: the pediatric cancer-type labels used as a filter list
//! - **composite**: `NAME (ID)` gene values and their parsing
//! - **split**: which part of a fetched table carries composite values
//! - **frame**: Polars frames with an explicit row index

pub mod composite;
pub mod error;
pub mod frame;
pub mod labels;
pub mod split;

pub use composite::{GeneKey, MalformedPolicy, is_merged_entry, parse_composite};
pub use error::{CompositeError, ContractError, FrameError};
pub use frame::{IndexedFrame, POSITIONAL_INDEX_NAME};
pub use labels::{PEDIATRIC_CANCERS, filter_pediatric, is_pediatric_cancer};
pub use split::Split;
