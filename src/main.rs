use anyhow::Context;
use clap::Parser;
use colored::*;
use pistasecure::cli::args::{Cli, Commands, EXIT_ERROR};
use pistasecure::cli::commands::{
    cmd_ask, cmd_config, cmd_email, cmd_link, cmd_profile, cmd_report, cmd_reports, cmd_scan,
};
use pistasecure::config::Config;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize structured logging before any command runs.
    if let Err(e) = pistasecure::logging::init(cli.log_level.into(), cli.log_format) {
        eprintln!("{}: Failed to initialize logging: {}", "Error".red().bold(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    cli.color.apply();

    match run(cli.command, cli.config.as_deref()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

fn run(command: Commands, config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Scan { kind, file, options } => {
            cmd_scan(&load_config(config_path)?, kind, file.as_deref(), &options)
        }
        Commands::Link { url, options } => cmd_link(&load_config(config_path)?, &url, &options),
        Commands::Email { file, options } => {
            cmd_email(&load_config(config_path)?, file.as_deref(), &options)
        }
        Commands::Profile {
            username,
            platform,
            options,
        } => cmd_profile(&load_config(config_path)?, &username, platform, &options),
        Commands::Report { action } => cmd_report(&load_config(config_path)?, action),
        Commands::Reports { action } => cmd_reports(&load_config(config_path)?, action),
        Commands::Ask { question } => cmd_ask(&question.join(" ")),
        Commands::Config { action } => cmd_config(action, config_path),
    }
}
