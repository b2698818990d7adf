//! Profile command: fake and scam account checks for social-media usernames.

use colored::*;
use std::process::ExitCode;
use tracing::{info, info_span};

use crate::cli::args::{AnalysisOptions, OutputFormat};
use crate::cli::commands::output::{exit_code, print_analysis_text, print_json, random_source, record};
use crate::config::Config;
use crate::detection::profile::{Platform, ProfileChecker, ProfileReport};
use crate::detection::surface::Surface;

pub fn cmd_profile(
    config: &Config,
    username: &str,
    platform: Platform,
    options: &AnalysisOptions,
) -> anyhow::Result<ExitCode> {
    let username = username.trim().trim_start_matches('@');
    if username.is_empty() {
        anyhow::bail!("Username must not be empty");
    }
    let _span = info_span!("profile", %platform).entered();

    let checker = ProfileChecker::new(config.profile_scoring());
    let mut rng = random_source(options.seed);
    let report = checker.check(username, platform, rng.as_mut());
    info!(
        tier = %report.result.tier,
        percentage = report.result.percentage,
        followers = report.follower_count,
        age_days = report.account_age_days,
        "Profile checked"
    );

    if options.record {
        record(config, Surface::ProfileChecker, username, &report.result)?;
    }

    if !options.quiet {
        match options.format {
            OutputFormat::Text => print_profile_text(&report),
            OutputFormat::Json => print_json(&report)?,
        }
    }

    Ok(exit_code(config, report.result.tier))
}

fn print_profile_text(report: &ProfileReport) {
    println!("{} on {}", format!("@{}", report.username).bold(), report.platform);
    println!("  Followers:   {}", report.follower_count);
    println!("  Account age: {} days", report.account_age_days);
    println!();
    print_analysis_text(&report.result);
}
