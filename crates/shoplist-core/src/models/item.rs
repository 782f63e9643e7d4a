//! Shopping-list item model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for an item, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Create a new unique item ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    /// Whether the hyphenated form of this ID starts with `prefix`
    /// (case-insensitive).
    #[must_use]
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.as_str().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A single shopping-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display name, never empty
    pub name: String,
    /// Category label; usually a member of the category set
    pub category: String,
    /// Checked off the list
    pub completed: bool,
    /// Reminder date selected while composing the item
    pub reminder: DateTime<Utc>,
}

impl Item {
    /// Create a new, not yet completed item
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        reminder: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            category: category.into(),
            completed: false,
            reminder,
        }
    }

    /// Share-text line for this item: `<name> (<category>)`
    #[must_use]
    pub fn share_line(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}
