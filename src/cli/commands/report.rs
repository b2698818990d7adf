//! Report command: build a scam report for a platform or authority.

use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::cli::args::{OutputFormat, ReportAction};
use crate::cli::commands::output::{print_json, read_content, random_source};
use crate::config::Config;
use crate::detection::input::AnalysisInput;
use crate::detection::surface::Surface;
use crate::report::generator::{ReportRequest, ScamReport};
use crate::report::log::unix_now_secs;

/// Execute the `report` subcommand.
pub fn cmd_report(config: &Config, action: ReportAction) -> anyhow::Result<ExitCode> {
    match action {
        ReportAction::Generate {
            destination,
            email,
            file,
            screenshot,
            no_analysis,
            seed,
            format,
        } => {
            let screenshot = screenshot
                .as_deref()
                .map(screenshot_name)
                .transpose()?;

            // A screenshot alone is a complete submission; only fall back to
            // stdin when there is nothing else.
            let content = match (&file, &screenshot) {
                (Some(path), _) => read_content(Some(path.as_path()))?,
                (None, Some(_)) => String::new(),
                (None, None) => read_content(None)?,
            };

            let analysis = if no_analysis || content.trim().is_empty() {
                None
            } else {
                let surface = Surface::ScamIntelligence;
                let scorer = surface.scorer(config.scoring.clone());
                let mut rng = random_source(seed);
                let input = AnalysisInput::new(content.as_str(), surface.default_kind());
                Some(scorer.analyze(&input, rng.as_mut()))
            };

            let request = ReportRequest {
                content,
                screenshot,
                recipient: email,
            };
            let report = ScamReport::generate(request, destination, analysis, unix_now_secs())
                .context("Failed to generate report")?;
            info!(
                %destination,
                category = %report.category,
                vector = %report.vector,
                "Report generated"
            );

            match format {
                OutputFormat::Text => print!("{}", report.render_text()),
                OutputFormat::Json => print_json(&report)?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// File name of an existing screenshot.
fn screenshot_name(path: &Path) -> anyhow::Result<String> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to read screenshot '{}'", path.display()))?;
    if !meta.is_file() {
        anyhow::bail!("Screenshot '{}' is not a file", path.display());
    }
    debug!(path = %path.display(), bytes = meta.len(), "Screenshot attached");
    Ok(path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string()))
}
