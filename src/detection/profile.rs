//! Social-media profile checker.
//!
//! Scores a username with pattern checks instead of keyword lists, using the
//! same measure/finalize pipeline as text content. Follower count and account
//! age are simulated from the injected random source, conditioned on how many
//! patterns matched.

use crate::detection::input::AnalysisInput;
use crate::detection::random::RandomSource;
use crate::detection::scorer::{AnalysisResult, RiskScorer, ScoringConfig};
use crate::detection::signal::{SignalHit, SignalSource};
use crate::detection::surface::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const IMPERSONATION_KEYWORDS: &[&str] = &[
    "official", "support", "verify", "admin", "help", "team", "real", "winner", "prize",
    "giveaway",
];

pub const PROFILE_DEFAULT_REASONS: [&str; 3] = [
    "Username follows common naming patterns",
    "No impersonation keywords found",
    "Account activity looks established",
];

pub const PROFILE_PADDING_POOL: &[&str] = &[
    "Profile details could not be independently verified",
    "Follower activity shows irregular patterns",
    "Profile resembles accounts reported by other users",
];

pub const RECENT_ACCOUNT_REASON: &str = "Account created very recently";
pub const FEW_FOLLOWERS_REASON: &str = "Very small follower base";

/// Platforms the checker knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Telegram,
    Whatsapp,
    Tiktok,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Platform::Instagram => "Instagram",
            Platform::Telegram => "Telegram",
            Platform::Whatsapp => "WhatsApp",
            Platform::Tiktok => "TikTok",
        };
        f.write_str(label)
    }
}

/// Pattern checks over a username. Each check is a one-term category.
#[derive(Debug, Clone)]
pub struct UsernamePatterns {
    impersonation_keywords: Vec<String>,
}

impl Default for UsernamePatterns {
    fn default() -> Self {
        Self {
            impersonation_keywords: IMPERSONATION_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UsernamePatterns {
    pub fn is_short(username: &str) -> bool {
        username.trim().chars().count() <= 3
    }

    pub fn has_digit_run(username: &str) -> bool {
        let mut run = 0;
        for c in username.chars() {
            if c.is_ascii_digit() {
                run += 1;
                if run >= 4 {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }

    pub fn is_symbol_heavy(username: &str) -> bool {
        username.chars().filter(|c| !c.is_alphanumeric()).count() > 2
    }

    pub fn impersonation_matches(&self, username: &str) -> Vec<&str> {
        self.impersonation_keywords
            .iter()
            .filter(|k| username.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

fn pattern_hit(name: &str, matched: bool, weight: f64, reason: &str) -> SignalHit {
    SignalHit {
        name: name.to_string(),
        matched: usize::from(matched),
        capacity: 1,
        weight,
        min_matches: 1,
        reason: reason.to_string(),
    }
}

impl SignalSource for UsernamePatterns {
    fn evaluate(&self, normalized: &str) -> Vec<SignalHit> {
        let username = normalized.trim();
        vec![
            pattern_hit(
                "short-username",
                Self::is_short(username),
                1.0,
                "Username is unusually short",
            ),
            pattern_hit(
                "digit-run",
                Self::has_digit_run(username),
                1.2,
                "Username contains a long run of digits",
            ),
            pattern_hit(
                "symbol-heavy",
                Self::is_symbol_heavy(username),
                1.0,
                "Username uses many special characters",
            ),
            pattern_hit(
                "impersonation",
                !self.impersonation_matches(username).is_empty(),
                1.8,
                "Username claims to represent an official entity or giveaway",
            ),
        ]
    }
}

/// Simulated account statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub follower_count: u64,
    pub account_age_days: u64,
}

impl ProfileStats {
    /// Follower and age ranges per number of matched patterns.
    pub fn bucket(matched_patterns: usize) -> ((u64, u64), (u64, u64)) {
        match matched_patterns {
            0 => ((1_000, 50_000), (365, 3_650)),
            1 => ((200, 2_000), (90, 365)),
            2 => ((50, 500), (14, 90)),
            _ => ((0, 100), (1, 14)),
        }
    }

    pub fn synthesize(matched_patterns: usize, rng: &mut dyn RandomSource) -> Self {
        let ((fmin, fmax), (amin, amax)) = Self::bucket(matched_patterns);
        Self {
            follower_count: rng.range_inclusive(fmin, fmax),
            account_age_days: rng.range_inclusive(amin, amax),
        }
    }

    fn reasons(&self) -> Vec<&'static str> {
        let mut reasons = Vec::new();
        if self.account_age_days < 30 {
            reasons.push(RECENT_ACCOUNT_REASON);
        }
        if self.follower_count < 100 {
            reasons.push(FEW_FOLLOWERS_REASON);
        }
        reasons
    }
}

/// Result of checking one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub username: String,
    pub platform: Platform,
    pub follower_count: u64,
    pub account_age_days: u64,
    pub result: AnalysisResult,
}

/// Username scorer with simulated account statistics.
pub struct ProfileChecker {
    scorer: RiskScorer,
}

impl ProfileChecker {
    /// Usernames carry few signals, so they amplify less than free text.
    pub fn default_config() -> ScoringConfig {
        ScoringConfig {
            amplification_factor: 1.5,
            ..ScoringConfig::default()
        }
    }

    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: Surface::ProfileChecker.scorer(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    pub fn check(
        &self,
        username: &str,
        platform: Platform,
        rng: &mut dyn RandomSource,
    ) -> ProfileReport {
        let input = AnalysisInput::profile(username);
        let mut measurement = self.scorer.measure(&input);

        let matched = measurement.matched_categories.len();
        let stats = ProfileStats::synthesize(matched, rng);
        for reason in stats.reasons() {
            measurement.push_reason(reason);
        }
        debug!(
            %platform,
            matched,
            followers = stats.follower_count,
            age_days = stats.account_age_days,
            "Profile stats synthesized"
        );

        let result: AnalysisResult = self.scorer.finalize(measurement, rng).into();
        ProfileReport {
            username: username.to_string(),
            platform,
            follower_count: stats.follower_count,
            account_age_days: stats.account_age_days,
            result,
        }
    }
}

impl Default for ProfileChecker {
    fn default() -> Self {
        Self::new(Self::default_config())
    }
}
