//! In-progress item fields held while the compose view is open

use chrono::{DateTime, Utc};

use super::category::DEFAULT_CATEGORY;

/// Not-yet-committed fields for the next item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Item name as typed
    pub name: String,
    /// Category text; picked from the set or typed free-form
    pub category: String,
    /// Selected reminder, `None` means "now" at creation time
    pub reminder: Option<DateTime<Utc>>,
}

impl Draft {
    /// Empty draft pointing at `category`
    #[must_use]
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            category: category.into(),
            reminder: None,
        }
    }

    /// Reminder to stamp on an item created at `now`
    #[must_use]
    pub fn reminder_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.reminder.unwrap_or(now)
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::with_category(DEFAULT_CATEGORY)
    }
}
