//! Persistent CLI configuration.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shoplist_core::config::StoreConfig;

use crate::error::CliError;
use crate::share::{ConfiguredShareSheet, FileShareSheet, StdoutShareSheet};

const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "SHOPLIST_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub share: ShareConfig,
    /// Print the list again after every item change
    #[serde(default = "default_render_after_change")]
    pub render_after_change: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShareConfig {
    #[serde(default)]
    pub target: ShareTarget,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    #[default]
    Stdout,
    File,
}

const fn default_config_version() -> u32 {
    1
}

const fn default_render_after_change() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            store: StoreConfig::default(),
            share: ShareConfig::default(),
            render_after_change: default_render_after_change(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shoplist")
        .join(CONFIG_FILE_NAME)
}

/// `--config` wins over `SHOPLIST_CONFIG`, which wins over the platform
/// config directory.
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(default_config_path)
}

impl CliConfig {
    /// Load config from `path`; a missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                error
            ))
        })?;
        let config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(self)?;
        std::fs::write(path, format!("{payload}\n"))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CliError> {
        self.store
            .build_categories()
            .map_err(|error| CliError::Config(error.to_string()))?;
        if self.share.target == ShareTarget::File && self.share.path.is_none() {
            return Err(CliError::Config(
                "share.path is required when share.target is \"file\"".to_string(),
            ));
        }
        Ok(())
    }

    pub fn share_sheet(&self) -> Result<ConfiguredShareSheet, CliError> {
        match (self.share.target, self.share.path.as_ref()) {
            (ShareTarget::Stdout, _) => Ok(ConfiguredShareSheet::Stdout(StdoutShareSheet)),
            (ShareTarget::File, Some(path)) => {
                Ok(ConfiguredShareSheet::File(FileShareSheet::new(path.clone())))
            }
            (ShareTarget::File, None) => Err(CliError::Config(
                "share.path is required when share.target is \"file\"".to_string(),
            )),
        }
    }
}
