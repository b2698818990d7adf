//! Link command: inspect a single URL.

use std::process::ExitCode;

use crate::cli::args::AnalysisOptions;
use crate::cli::commands::output::run_analysis;
use crate::config::Config;
use crate::detection::input::AnalysisInput;
use crate::detection::surface::Surface;

pub fn cmd_link(config: &Config, url: &str, options: &AnalysisOptions) -> anyhow::Result<ExitCode> {
    let surface = Surface::LinkInspector;
    run_analysis(
        config,
        surface,
        AnalysisInput::new(url.trim(), surface.default_kind()),
        options,
    )
}
