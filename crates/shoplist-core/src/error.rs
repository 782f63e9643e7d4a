//! Error types for shoplist-core

use thiserror::Error;

/// Result type alias using shoplist-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in shoplist-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Category name was empty after trimming
    #[error("Please enter a category name.")]
    EmptyCategoryName,

    /// Category already present in the set
    #[error("Please enter a unique category. \"{0}\" already exists.")]
    DuplicateCategoryName(String),

    /// Item name was empty after trimming
    #[error("Please enter an item name.")]
    EmptyItemName,

    /// Selected category is not a member of the category set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Draft category is not registered and the policy rejects it
    #[error("Category \"{0}\" is not registered. Add it first.")]
    UnregisteredCategory(String),

    /// Share collaborator reported a failure
    #[error("Failed to share the list: {0}")]
    ShareFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether the error is surfaced to the user as a notice instead of
    /// aborting the session.
    #[must_use]
    pub const fn is_user_notice(&self) -> bool {
        matches!(
            self,
            Self::EmptyCategoryName
                | Self::DuplicateCategoryName(_)
                | Self::EmptyItemName
                | Self::UnknownCategory(_)
                | Self::UnregisteredCategory(_)
                | Self::ShareFailed(_)
        )
    }
}
