//! Dataset retrieval from the Taiga versioned-dataset service.
//!
//! Transformations depend on the [`DatasetSource`] trait only; the
//! [`TaigaClient`] is the network-backed implementation.

pub mod client;
pub mod config;
pub mod dataset;
pub mod error;

pub use client::{TaigaClient, read_csv_bytes};
pub use config::TaigaConfig;
pub use dataset::{DatasetRef, DatasetSource};
pub use error::{FetchError, Result};
