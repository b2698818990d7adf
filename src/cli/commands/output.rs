//! Shared plumbing for the analysis commands: input, randomness, rendering,
//! recording and exit codes.

use anyhow::Context;
use colored::*;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::cli::args::{AnalysisOptions, OutputFormat, EXIT_CLEAN, EXIT_FLAGGED};
use crate::config::Config;
use crate::detection::advice::recommended_steps;
use crate::detection::input::AnalysisInput;
use crate::detection::random::{RandomSource, SeededSource, ThreadSource};
use crate::detection::scorer::AnalysisResult;
use crate::detection::surface::Surface;
use crate::detection::tier::Tier;
use crate::report::log::{ReportEntry, ReportLog, ReportLogConfig};

/// Read `file`, or all of stdin when no file is given.
pub fn read_content(file: Option<&Path>) -> anyhow::Result<String> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    debug!(
        content_bytes = content.len(),
        source = if file.is_some() { "file" } else { "stdin" },
        "Content read"
    );
    Ok(content)
}

/// Seeded source when `--seed` is given, thread RNG otherwise.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededSource::new(seed)),
        None => Box::new(ThreadSource::new()),
    }
}

pub fn exit_code(config: &Config, tier: Tier) -> ExitCode {
    if config.is_failing(tier) {
        ExitCode::from(EXIT_FLAGGED)
    } else {
        ExitCode::from(EXIT_CLEAN)
    }
}

pub fn colored_tier(tier: Tier) -> ColoredString {
    match tier {
        Tier::Safe => tier.as_str().green().bold(),
        Tier::Suspicious => tier.as_str().yellow().bold(),
        Tier::Dangerous => tier.as_str().red().bold(),
    }
}

/// Human-readable result block.
pub fn print_analysis_text(result: &AnalysisResult) {
    let marker = if result.tier.is_flagged() {
        "!".red().bold()
    } else {
        "✓".green()
    };
    println!(
        "{} Risk: {} ({}%)",
        marker,
        colored_tier(result.tier),
        result.percentage
    );
    println!();
    println!("Reasons:");
    for reason in &result.reasons {
        println!("  - {}", reason);
    }
    println!();
    println!("{} {}", "Advice:".bold(), result.advice);

    let steps = recommended_steps(result.tier);
    if result.tier.is_flagged() && !steps.is_empty() {
        println!();
        println!("Recommended steps:");
        for (i, step) in steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn report_log_path(config: &Config, override_path: Option<&Path>) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.report_log_path())
}

pub fn report_log_config(config: &Config) -> ReportLogConfig {
    ReportLogConfig {
        max_file_bytes: config.report_log.max_file_bytes,
        max_rotated_files: config.report_log.max_rotated_files,
    }
}

/// Append one analysis to the configured report log.
pub fn record(
    config: &Config,
    surface: Surface,
    content: &str,
    result: &AnalysisResult,
) -> anyhow::Result<()> {
    let path = config.report_log_path();
    let log = ReportLog::open(&path, report_log_config(config))
        .with_context(|| format!("Failed to open report log '{}'", path.display()))?;
    log.append(&ReportEntry::new(surface, content, result))
        .with_context(|| format!("Failed to record analysis to '{}'", log.path().display()))?;
    Ok(())
}

/// Score `input` on `surface`, print, optionally record, and map to an exit code.
pub fn run_analysis(
    config: &Config,
    surface: Surface,
    input: AnalysisInput,
    options: &AnalysisOptions,
) -> anyhow::Result<ExitCode> {
    let _span = info_span!("analyze", %surface, kind = %input.kind()).entered();

    let scorer = surface.scorer(config.scoring.clone());
    let mut rng = random_source(options.seed);

    let start = Instant::now();
    let result = scorer.analyze(&input, rng.as_mut());
    info!(
        tier = %result.tier,
        percentage = result.percentage,
        reason_count = result.reasons.len(),
        analysis_duration_us = start.elapsed().as_micros() as u64,
        "Analysis complete"
    );

    if options.record {
        record(config, surface, input.raw_text(), &result)?;
    }

    if !options.quiet {
        match options.format {
            OutputFormat::Text => print_analysis_text(&result),
            OutputFormat::Json => print_json(&result)?,
        }
    }

    Ok(exit_code(config, result.tier))
}
