//! Scan command: scam-intelligence analysis of messages, links and screenshot text.

use std::path::Path;
use std::process::ExitCode;

use crate::cli::args::AnalysisOptions;
use crate::cli::commands::output::{read_content, run_analysis};
use crate::config::Config;
use crate::detection::input::{AnalysisInput, ContentKind};
use crate::detection::surface::Surface;

/// Execute the `scan` subcommand.
///
/// For `--kind image` the input is the text extracted from the screenshot.
pub fn cmd_scan(
    config: &Config,
    kind: ContentKind,
    file: Option<&Path>,
    options: &AnalysisOptions,
) -> anyhow::Result<ExitCode> {
    if kind == ContentKind::Profile {
        anyhow::bail!("Usernames are checked with 'pistasecure profile <USERNAME>'");
    }

    let content = read_content(file)?;
    let input = AnalysisInput::new(content, kind);
    run_analysis(config, Surface::ScamIntelligence, input, options)
}
