//! Email command: phishing and spoofing checks over a pasted email.

use std::path::Path;
use std::process::ExitCode;

use crate::cli::args::AnalysisOptions;
use crate::cli::commands::output::{read_content, run_analysis};
use crate::config::Config;
use crate::detection::input::AnalysisInput;
use crate::detection::surface::Surface;

pub fn cmd_email(
    config: &Config,
    file: Option<&Path>,
    options: &AnalysisOptions,
) -> anyhow::Result<ExitCode> {
    let content = read_content(file)?;
    let surface = Surface::EmailScanner;
    run_analysis(
        config,
        surface,
        AnalysisInput::new(content, surface.default_kind()),
        options,
    )
}
