//! Domain identifier types
//!
//! Newtype wrappers for the two identifiers a work item carries: its display
//! number (the grouping key of the history feed) and the numeric link id used
//! to build a browsable URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Work item identifier newtype wrapper
///
/// The display number of a story (e.g. `S-01234`). Consecutive feed rows
/// sharing this value belong to the same item.
///
/// # Examples
///
/// ```
/// use cycletime::domain::ids::ItemId;
/// use std::str::FromStr;
///
/// let id = ItemId::from_str("S-01234").unwrap();
/// assert_eq!(id.as_str(), "S-01234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new ItemId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Item ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the item ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Link identifier newtype wrapper
///
/// Extracted from a history asset oid of the form `Story:<link>:<moment>`.
/// Oids with any other shape carry no link.
///
/// # Examples
///
/// ```
/// use cycletime::domain::ids::LinkId;
///
/// let link = LinkId::from_oid("Story:1234:56789").unwrap();
/// assert_eq!(link.as_str(), "1234");
/// assert!(LinkId::from_oid("Story:1234").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(String);

impl LinkId {
    /// Parses the link id out of a versioned asset oid
    pub fn from_oid(oid: &str) -> Option<Self> {
        let parts: Vec<&str> = oid.split(':').collect();
        match parts.as_slice() {
            [_, link, _] if !link.is_empty() => Some(Self((*link).to_string())),
            _ => None,
        }
    }

    /// Returns the link id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
