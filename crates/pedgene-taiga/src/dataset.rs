//! Dataset identity and the retrieval capability.

use std::fmt;
use std::str::FromStr;

use pedgene_model::IndexedFrame;
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Identifies one file of one dataset version.
///
/// Renders as Taiga's canonical id, `name.version/file`; a missing version
/// means the latest one and a missing file means the dataset's only file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Dataset permaname.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl DatasetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            file: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = self.version {
            write!(f, ".{version}")?;
        }
        if let Some(file) = &self.file {
            write!(f, "/{file}")?;
        }
        Ok(())
    }
}

impl FromStr for DatasetRef {
    type Err = FetchError;

    /// Parse `name[.version][/file]`.
    fn from_str(value: &str) -> Result<Self> {
        let (dataset, file) = match value.split_once('/') {
            Some((dataset, file)) if !file.is_empty() => (dataset, Some(file.to_string())),
            Some((dataset, _)) => (dataset, None),
            None => (value, None),
        };
        let (name, version) = match dataset.rsplit_once('.') {
            Some((name, version)) if version.chars().all(|ch| ch.is_ascii_digit()) => {
                let version = version
                    .parse::<u32>()
                    .map_err(|_| FetchError::Other(format!("invalid dataset version in '{value}'")))?;
                (name, Some(version))
            }
            _ => (dataset, None),
        };
        if name.is_empty() {
            return Err(FetchError::Other(format!("missing dataset name in '{value}'")));
        }
        Ok(Self {
            name: name.to_string(),
            version,
            file,
        })
    }
}

/// Anything that can retrieve a dataset file as a table.
///
/// This is the only capability the transformations need, so they can run
/// against in-memory tables in tests.
pub trait DatasetSource {
    /// Fetch one dataset file. Errors are returned as the source reports them.
    fn fetch(&self, dataset: &DatasetRef) -> Result<IndexedFrame>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for &T {
    fn fetch(&self, dataset: &DatasetRef) -> Result<IndexedFrame> {
        (**self).fetch(dataset)
    }
}

impl<T: DatasetSource + ?Sized> DatasetSource for Box<T> {
    fn fetch(&self, dataset: &DatasetRef) -> Result<IndexedFrame> {
        (**self).fetch(dataset)
    }
}
