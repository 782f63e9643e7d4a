//! Share targets for the terminal session.

use std::path::PathBuf;

use shoplist_core::{ShareError, ShareSheet};
use tokio::io::AsyncWriteExt;

/// Prints the shared list on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutShareSheet;

impl ShareSheet for StdoutShareSheet {
    async fn share(&self, message: &str) -> Result<(), ShareError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(message.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Writes the shared list to a file, replacing previous contents.
#[derive(Debug, Clone)]
pub struct FileShareSheet {
    path: PathBuf,
}

impl FileShareSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ShareSheet for FileShareSheet {
    async fn share(&self, message: &str) -> Result<(), ShareError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, message).await?;
        tracing::info!(path = %self.path.display(), "shared shopping list");
        Ok(())
    }
}

/// Share target selected by the config file.
#[derive(Debug, Clone)]
pub enum ConfiguredShareSheet {
    Stdout(StdoutShareSheet),
    File(FileShareSheet),
}

impl ShareSheet for ConfiguredShareSheet {
    async fn share(&self, message: &str) -> Result<(), ShareError> {
        match self {
            Self::Stdout(sheet) => sheet.share(message).await,
            Self::File(sheet) => sheet.share(message).await,
        }
    }
}
