use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] shoplist_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid reminder date '{0}'. Use YYYY-MM-DD, an RFC 3339 timestamp, or `cancel`.")]
    InvalidDate(String),
    #[error("Failed to export the list to {0}")]
    ExportFailed(String),
}

impl CliError {
    /// Errors shown as a notice while the session keeps running.
    pub const fn is_user_notice(&self) -> bool {
        match self {
            Self::Core(error) => error.is_user_notice(),
            Self::InvalidDate(_) | Self::ExportFailed(_) => true,
            _ => false,
        }
    }
}
