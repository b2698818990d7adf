//! Append-only report log with size limits and rotation.
//!
//! Each analysis the user chooses to record becomes one JSON line. The log
//! stores a SHA-256 of the analyzed content and a short preview, never the
//! full text. Files rotate once they reach the size limit.

use crate::detection::scorer::AnalysisResult;
use crate::detection::surface::Surface;
use crate::detection::tier::Tier;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Characters of content kept in the preview.
pub const PREVIEW_CHARS: usize = 80;

#[derive(Error, Debug)]
pub enum ReportLogError {
    #[error("Failed to access report log: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize report entry: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Size limits for the report log.
#[derive(Debug, Clone)]
pub struct ReportLogConfig {
    /// Maximum size of a single log file in bytes before rotation.
    pub max_file_bytes: u64,
    /// Rotated files to keep (reports.jsonl.1, reports.jsonl.2, ...).
    pub max_rotated_files: u32,
}

impl Default for ReportLogConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

/// One recorded analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub timestamp_secs: u64,
    pub surface: Surface,
    pub tier: Tier,
    pub percentage: u8,
    pub reasons: Vec<String>,
    pub content_sha256: String,
    pub preview: String,
}

impl ReportEntry {
    /// Build an entry stamped with the current time.
    pub fn new(surface: Surface, content: &str, result: &AnalysisResult) -> Self {
        Self {
            timestamp_secs: unix_now_secs(),
            surface,
            tier: result.tier,
            percentage: result.percentage,
            reasons: result.reasons.clone(),
            content_sha256: sha256_hex(content),
            preview: preview(content),
        }
    }

    pub fn with_timestamp(mut self, timestamp_secs: u64) -> Self {
        self.timestamp_secs = timestamp_secs;
        self
    }
}

/// Append-only report log with automatic rotation.
pub struct ReportLog {
    path: PathBuf,
    config: ReportLogConfig,
}

impl ReportLog {
    /// Open (or create) a report log at the given path.
    pub fn open(path: &Path, config: ReportLogConfig) -> Result<Self, ReportLogError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry.
    pub fn append(&self, entry: &ReportEntry) -> Result<(), ReportLogError> {
        self.rotate_if_needed()?;

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        debug!(path = %self.path.display(), tier = %entry.tier, "Report recorded");
        Ok(())
    }

    /// All entries, oldest first, across rotated files.
    ///
    /// Lines that fail to parse are skipped with a warning.
    pub fn entries(&self) -> Result<Vec<ReportEntry>, ReportLogError> {
        let mut entries = Vec::new();
        for n in (1..=self.config.max_rotated_files).rev() {
            let rotated = self.rotated_path(n);
            if rotated.exists() {
                read_entries(&rotated, &mut entries)?;
            }
        }
        if self.path.exists() {
            read_entries(&self.path, &mut entries)?;
        }
        Ok(entries)
    }

    /// Rotate log files if the current file exceeds the size limit.
    fn rotate_if_needed(&self) -> Result<(), ReportLogError> {
        let size = match fs::metadata(&self.path) {
            Ok(m) => m.len(),
            Err(_) => return Ok(()),
        };

        if size < self.config.max_file_bytes {
            return Ok(());
        }

        // Shift .1 -> .2 and so on; the oldest falls off the end.
        for i in (1..=self.config.max_rotated_files).rev() {
            let src = self.rotated_path(i);
            if src.exists() {
                if i == self.config.max_rotated_files {
                    let _ = fs::remove_file(&src);
                } else {
                    let _ = fs::rename(&src, self.rotated_path(i + 1));
                }
            }
        }

        if self.config.max_rotated_files > 0 {
            let _ = fs::rename(&self.path, self.rotated_path(1));
        }
        File::create(&self.path)?;
        debug!(path = %self.path.display(), size, "Report log rotated");

        Ok(())
    }

    fn rotated_path(&self, n: u32) -> PathBuf {
        let name = self.path.file_name().unwrap_or_default().to_string_lossy();
        self.path.with_file_name(format!("{}.{}", name, n))
    }
}

fn read_entries(path: &Path, out: &mut Vec<ReportEntry>) -> Result<(), ReportLogError> {
    let reader = BufReader::new(File::open(path)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ReportEntry>(&line) {
            Ok(entry) => out.push(entry),
            Err(e) => warn!(
                path = %path.display(),
                line = lineno + 1,
                error = %e,
                "Skipping malformed report entry"
            ),
        }
    }
    Ok(())
}

/// Totals over recorded reports, for the admin summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub by_tier: BTreeMap<Tier, usize>,
    pub by_surface: BTreeMap<Surface, usize>,
    pub average_percentage: f64,
}

impl ReportStats {
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };
        if entries.is_empty() {
            return stats;
        }

        let mut sum = 0u64;
        for entry in entries {
            *stats.by_tier.entry(entry.tier).or_insert(0) += 1;
            *stats.by_surface.entry(entry.surface).or_insert(0) += 1;
            sum += u64::from(entry.percentage);
        }
        stats.average_percentage = sum as f64 / entries.len() as f64;
        stats
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.by_tier.get(&tier).copied().unwrap_or(0)
    }
}

pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn preview(content: &str) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = flat.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    }
}

/// Seconds since the Unix epoch.
pub fn unix_now_secs() -> u64 {
    use std::time::SystemTime;
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
