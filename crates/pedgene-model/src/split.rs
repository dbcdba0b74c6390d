//! Where a fetched table carries its composite gene values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// How a fetched table is reshaped after retrieval.
///
/// `Column` carries the name of the composite column, so a column split
/// without a column cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    /// Return the table as fetched.
    #[default]
    None,
    /// Column headers are composite values; genes become the column keys.
    Header,
    /// The named column holds composite values; genes become the row index.
    Column(String),
}

impl Split {
    /// Build a split from loosely typed arguments.
    ///
    /// `attribute` must be absent, `"header"` or `"column"`; `"column"`
    /// requires `col`. Anything else is a contract violation.
    pub fn from_parts(attribute: Option<&str>, col: Option<&str>) -> Result<Self, ContractError> {
        let split = match attribute {
            None => Self::None,
            Some(value) => value.parse::<SplitAttribute>()?.with_column(col)?,
        };
        if col.is_some() && !matches!(split, Self::Column(_)) {
            tracing::debug!(?col, "column name ignored for {split} split");
        }
        Ok(split)
    }

    /// The composite column for a column split.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Column(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Header => f.write_str("header"),
            Self::Column(name) => write!(f, "column '{name}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitAttribute {
    Header,
    Column,
}

impl SplitAttribute {
    fn with_column(self, col: Option<&str>) -> Result<Split, ContractError> {
        match self {
            Self::Header => Ok(Split::Header),
            Self::Column => col
                .map(|name| Split::Column(name.to_string()))
                .ok_or(ContractError::MissingColumn),
        }
    }
}

impl FromStr for SplitAttribute {
    type Err = ContractError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "header" => Ok(Self::Header),
            "column" => Ok(Self::Column),
            other => Err(ContractError::UnknownSplitAttribute(other.to_string())),
        }
    }
}
