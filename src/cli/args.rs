//! Command-line argument parsing.

use crate::detection::input::ContentKind;
use crate::detection::profile::Platform;
use crate::report::generator::ReportDestination;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// PistaSecure - scam awareness toolkit
#[derive(Parser, Debug)]
#[command(name = "pistasecure")]
#[command(author, version, long_about = None)]
#[command(
    about = "PistaSecure - spot scams in messages, links, emails and social profiles before they cost you"
)]
pub struct Cli {
    /// Logging verbosity level
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,

    /// Logging output format
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: crate::logging::LogFormat,

    /// Control color output (auto, always, never). Respects NO_COLOR env var.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Path to config file [default: user config dir]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct AnalysisOptions {
    /// Output format: text, json
    #[arg(short = 'F', long, default_value = "text")]
    pub format: OutputFormat,

    /// Seed the random source for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append the result to the report log
    #[arg(long)]
    pub record: bool,

    /// Suppress all stdout output, only set exit code
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a message, link or screenshot text for scam signals
    Scan {
        /// What the input is
        #[arg(short, long, default_value = "text")]
        kind: ContentKind,

        /// File to scan (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        options: AnalysisOptions,
    },

    /// Inspect a URL
    Link {
        /// URL to inspect
        url: String,

        #[command(flatten)]
        options: AnalysisOptions,
    },

    /// Scan an email for phishing and spoofing
    Email {
        /// File containing the email (reads from stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        options: AnalysisOptions,
    },

    /// Check a social-media username for fake or scam accounts
    Profile {
        /// Username to check
        username: String,

        /// Platform the account lives on
        #[arg(short, long, default_value = "instagram")]
        platform: Platform,

        #[command(flatten)]
        options: AnalysisOptions,
    },

    /// Generate scam reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Browse recorded analyses
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },

    /// Ask the security assistant a question
    Ask {
        /// Your question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportAction {
    /// Build a report from scam text or a screenshot
    Generate {
        /// Who receives the report
        #[arg(short, long)]
        destination: ReportDestination,

        /// Recipient address (required for the email destination)
        #[arg(short, long)]
        email: Option<String>,

        /// File with the scam text (reads from stdin if neither this nor --screenshot is given)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Screenshot file to reference in the report
        #[arg(long)]
        screenshot: Option<PathBuf>,

        /// Skip the risk assessment section
        #[arg(long)]
        no_analysis: bool,

        /// Seed the risk assessment's random source for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportsAction {
    /// List recorded analyses, newest last
    List {
        /// Report log path [default: from config]
        #[arg(long)]
        log: Option<PathBuf>,

        /// Show only the last N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Totals per tier and per tool
    Stats {
        /// Report log path [default: from config]
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output format: text, json
        #[arg(short = 'F', long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default configuration
    Init {
        /// Path to create config file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Show current configuration
    Show,
}

/// Logging verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Apply to the global `colored` override. `Auto` leaves detection to
    /// `colored`, which honors NO_COLOR and non-tty output.
    pub fn apply(self) {
        match self {
            ColorMode::Auto => {}
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
        }
    }
}

/// Exit codes with distinct semantics.
/// 0 = clean, 1 = flagged, 2 = error.
pub const EXIT_CLEAN: u8 = 0;
pub const EXIT_FLAGGED: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_default_log_level_is_warn() {
        let cli = Cli::parse_from(["pistasecure", "config", "show"]);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn cli_accepts_log_format_json() {
        let cli = Cli::parse_from(["pistasecure", "--log-format", "json", "config", "show"]);
        assert_eq!(cli.log_format, crate::logging::LogFormat::Json);
    }

    #[test]
    fn cli_log_level_global_works_after_subcommand() {
        let cli = Cli::parse_from(["pistasecure", "config", "show", "--log-level", "trace"]);
        assert_eq!(cli.log_level, LogLevel::Trace);
    }

    #[test]
    fn log_level_converts_to_tracing_level() {
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
    }

    #[test]
    fn scan_defaults_to_text_from_stdin() {
        let cli = Cli::parse_from(["pistasecure", "scan"]);
        match cli.command {
            Commands::Scan { kind, file, options } => {
                assert_eq!(kind, ContentKind::Text);
                assert!(file.is_none());
                assert_eq!(options.format, OutputFormat::Text);
                assert!(options.seed.is_none());
                assert!(!options.record);
                assert!(!options.quiet);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn scan_accepts_kind_and_seed() {
        let cli = Cli::parse_from(["pistasecure", "scan", "--kind", "link", "--seed", "7", "-F", "json"]);
        match cli.command {
            Commands::Scan { kind, options, .. } => {
                assert_eq!(kind, ContentKind::Link);
                assert_eq!(options.seed, Some(7));
                assert_eq!(options.format, OutputFormat::Json);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn profile_parses_platform() {
        let cli = Cli::parse_from(["pistasecure", "profile", "prize_winner", "-p", "tiktok"]);
        match cli.command {
            Commands::Profile { username, platform, .. } => {
                assert_eq!(username, "prize_winner");
                assert_eq!(platform, Platform::Tiktok);
            }
            _ => panic!("Expected Profile command"),
        }
    }

    #[test]
    fn report_generate_parses_destination() {
        let cli = Cli::parse_from([
            "pistasecure",
            "report",
            "generate",
            "--destination",
            "email",
            "--email",
            "fraud@example.org",
            "--seed",
            "3",
        ]);
        match cli.command {
            Commands::Report {
                action: ReportAction::Generate { destination, email, seed, .. },
            } => {
                assert_eq!(destination, ReportDestination::Email);
                assert_eq!(email.as_deref(), Some("fraud@example.org"));
                assert_eq!(seed, Some(3));
            }
            _ => panic!("Expected Report Generate command"),
        }
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::parse_from(["pistasecure", "ask", "is", "this", "a", "scam"]);
        match cli.command {
            Commands::Ask { question } => assert_eq!(question.join(" "), "is this a scam"),
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn color_mode_defaults_to_auto() {
        let cli = Cli::parse_from(["pistasecure", "config", "show"]);
        assert_eq!(cli.color, ColorMode::Auto);
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_eq!(EXIT_CLEAN, 0);
        assert_eq!(EXIT_FLAGGED, 1);
        assert_eq!(EXIT_ERROR, 2);
    }
}
