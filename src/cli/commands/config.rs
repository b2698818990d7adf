//! Config command: initialize and display PistaSecure configuration.

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::args::ConfigAction;
use crate::config::settings::Config;

/// Execute the `config` subcommand (init, show).
///
/// `config_path` is the global `--config` flag; `init --path` takes precedence.
pub fn cmd_config(action: ConfigAction, config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Init { path } => {
            let config_path = path
                .or_else(|| config_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }

            let config = Config::default();
            let toml = config
                .to_toml()
                .context("Failed to serialize default config")?;
            std::fs::write(&config_path, toml).with_context(|| {
                format!("Failed to write config file '{}'", config_path.display())
            })?;

            debug!(path = %config_path.display(), "Config file created");
            println!("Created config at: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }
        ConfigAction::Show => {
            let config_path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::default_config_path);
            if config_path.exists() {
                let config = Config::from_file(&config_path).with_context(|| {
                    format!("Invalid config file '{}'", config_path.display())
                })?;
                println!("# {}", config_path.display());
                println!("{}", config.to_toml().context("Failed to serialize config")?);
                debug!("Config displayed");
            } else {
                println!("No config file found at: {}", config_path.display());
                println!("Run 'pistasecure config init' to create one.");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
