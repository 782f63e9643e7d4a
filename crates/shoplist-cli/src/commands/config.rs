use std::path::Path;

use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_config_init(config_path: &Path, force: bool) -> Result<(), CliError> {
    if config_path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Pass --force to overwrite it.",
            config_path.display()
        )));
    }

    CliConfig::default().save_to_path(config_path)?;
    tracing::info!(path = %config_path.display(), "wrote default config");
    println!("{}", config_path.display());
    Ok(())
}

pub fn run_config_show(config_path: &Path) -> Result<(), CliError> {
    let config = CliConfig::load_from_path(config_path)?;
    println!("# {}", config_path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
