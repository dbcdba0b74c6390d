//! Composite gene values of the form `NAME (ID)`.
//!
//! Dependency and expression matrices label genes as `TP53 (7157)`: the
//! HGNC symbol followed by the Entrez id in parentheses. Columns that merge
//! two genes (`X1 & X2 (100)`) are excluded rather than parsed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CompositeError;

/// Marker for entries that combine more than one gene.
pub const MERGED_MARKER: char = '&';

/// A gene identified by its integer id and symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeneKey {
    /// Numeric gene id (Entrez).
    pub id: i64,
    /// Gene symbol.
    pub symbol: String,
}

impl GeneKey {
    pub fn new(id: i64, symbol: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for GeneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.id)
    }
}

/// What to do with a composite value that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Propagate the parse error to the caller.
    #[default]
    Fail,
    /// Drop the offending column or row and log a warning.
    Skip,
}

/// Returns true if the value names more than one gene.
pub fn is_merged_entry(value: &str) -> bool {
    value.contains(MERGED_MARKER)
}

/// Parse a composite `NAME (ID)` value.
///
/// The value is split at its first space. Parentheses and whitespace around
/// the id are stripped before it is parsed as an integer, so a symbol that
/// itself contains a space is rejected.
///
/// # Examples
///
/// ```
/// use pedgene_model::parse_composite;
///
/// let key = parse_composite("TP53 (7157)").unwrap();
/// assert_eq!(key.id, 7157);
/// assert_eq!(key.symbol, "TP53");
/// assert!(parse_composite("TP53").is_err());
/// ```
pub fn parse_composite(value: &str) -> Result<GeneKey, CompositeError> {
    let (name, id_part) = value
        .split_once(' ')
        .ok_or_else(|| CompositeError::MissingSeparator {
            value: value.to_string(),
        })?;
    let id_text = id_part.trim_matches(|ch| ch == '(' || ch == ')').trim();
    let id = id_text.parse::<i64>().map_err(|_| CompositeError::InvalidId {
        value: value.to_string(),
        id_part: id_part.to_string(),
    })?;
    Ok(GeneKey::new(id, name))
}
