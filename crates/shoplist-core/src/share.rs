//! Share-sheet collaborator boundary.
//!
//! The store renders the share text; a `ShareSheet` decides where it goes.
//! This is the only asynchronous edge of the store.

use std::future::Future;

use thiserror::Error;

/// Failure reported by a share target
#[derive(Debug, Error)]
pub enum ShareError {
    /// Target refused or could not present the payload
    #[error("share target unavailable: {0}")]
    Unavailable(String),

    /// Writing the payload failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Something that can receive the shopping list as a single text payload.
pub trait ShareSheet {
    /// Present `message` to the user. No structured response is consumed.
    fn share(&self, message: &str) -> impl Future<Output = Result<(), ShareError>> + Send;
}
