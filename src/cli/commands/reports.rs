//! Reports command: list recorded analyses and summarize them.

use anyhow::Context;
use colored::*;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::args::{OutputFormat, ReportsAction};
use crate::cli::commands::output::{colored_tier, print_json, report_log_config, report_log_path};
use crate::config::Config;
use crate::detection::tier::Tier;
use crate::report::generator::format_date;
use crate::report::log::{ReportEntry, ReportLog, ReportStats};

/// Execute the `reports` subcommand (list, stats).
pub fn cmd_reports(config: &Config, action: ReportsAction) -> anyhow::Result<ExitCode> {
    match action {
        ReportsAction::List { log, limit } => {
            let path = report_log_path(config, log.as_deref());
            let Some(entries) = load_entries(config, &path)? else {
                println!("No reports recorded at: {}", path.display());
                println!("Run an analysis with '--record' to start the log.");
                return Ok(ExitCode::SUCCESS);
            };

            let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
            for entry in entries.iter().skip(skip) {
                println!(
                    "{}  {:<18} {:<10} {:>3}%  {}",
                    format_date(entry.timestamp_secs),
                    entry.surface.to_string(),
                    colored_tier(entry.tier),
                    entry.percentage,
                    entry.preview.dimmed()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        ReportsAction::Stats { log, format } => {
            let path = report_log_path(config, log.as_deref());
            let entries = load_entries(config, &path)?.unwrap_or_default();
            let stats = ReportStats::from_entries(&entries);

            match format {
                OutputFormat::Text => {
                    println!("Total analyses: {}", stats.total);
                    for tier in [Tier::Dangerous, Tier::Suspicious, Tier::Safe] {
                        println!("  {:<12} {}", colored_tier(tier), stats.count(tier));
                    }
                    if !stats.by_surface.is_empty() {
                        println!();
                        println!("By tool:");
                        for (surface, count) in &stats.by_surface {
                            println!("  {:<18} {}", surface.to_string(), count);
                        }
                    }
                    println!();
                    println!("Average risk: {:.1}%", stats.average_percentage);
                }
                OutputFormat::Json => print_json(&stats)?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Entries from the log at `path`, or `None` if nothing was recorded yet.
fn load_entries(config: &Config, path: &Path) -> anyhow::Result<Option<Vec<ReportEntry>>> {
    if !path.exists() {
        debug!(path = %path.display(), "No report log yet");
        return Ok(None);
    }

    let log = ReportLog::open(path, report_log_config(config))
        .with_context(|| format!("Failed to open report log '{}'", path.display()))?;
    let entries = log
        .entries()
        .with_context(|| format!("Failed to read report log '{}'", path.display()))?;
    debug!(path = %log.path().display(), count = entries.len(), "Report log loaded");
    Ok(Some(entries))
}
