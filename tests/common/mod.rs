//! Shared test utilities for PistaSecure integration tests.
//!
//! Provides helpers for running the binary against an isolated config and
//! for building small single-category taxonomies with exact percentages.

use assert_cmd::Command;
use pistasecure::detection::taxonomy::{KeywordCategory, Taxonomy};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns a `Command` configured to run the `pistasecure` binary.
#[allow(dead_code, deprecated)]
pub fn pistasecure_cmd() -> Command {
    Command::cargo_bin("pistasecure").unwrap()
}

/// Returns a `Command` whose config file lives in `dir`, with the report log
/// next to it, so tests never touch the user's real directories.
#[allow(dead_code)]
pub fn isolated_cmd(dir: &TempDir) -> Command {
    let config = write_config(dir.path());
    let mut cmd = pistasecure_cmd();
    cmd.arg("--config").arg(config).arg("--color").arg("never");
    cmd
}

/// Write a config pointing the report log into `dir`.
#[allow(dead_code)]
pub fn write_config(dir: &Path) -> PathBuf {
    let config_path = dir.join("config.toml");
    let log_path = report_log_path(dir);
    let toml = format!(
        "[report_log]\npath = \"{}\"\n",
        log_path.display().to_string().replace('\\', "\\\\")
    );
    fs::write(&config_path, toml).unwrap();
    config_path
}

#[allow(dead_code)]
pub fn report_log_path(dir: &Path) -> PathBuf {
    dir.join("reports.jsonl")
}

/// A one-category taxonomy of `total` distinct terms, weight 1.
///
/// Terms are `k000x`, `k001x`, ... so no term is a substring of another.
#[allow(dead_code)]
pub fn uniform_taxonomy(total: usize) -> Taxonomy {
    let terms: Vec<String> = (0..total).map(|i| format!("k{:03}x", i)).collect();
    let category =
        KeywordCategory::new("uniform", 1.0, 1, "Matched uniform terms", &terms).unwrap();
    Taxonomy::new("uniform", vec![category]).unwrap()
}

/// Text containing the first `matched` terms of [`uniform_taxonomy`].
#[allow(dead_code)]
pub fn uniform_text(matched: usize) -> String {
    (0..matched)
        .map(|i| format!("k{:03}x", i))
        .collect::<Vec<_>>()
        .join(" ")
}
