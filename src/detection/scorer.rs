//! Keyword-weighted content risk scorer.

use crate::detection::advice::advice_for;
use crate::detection::input::AnalysisInput;
use crate::detection::random::RandomSource;
use crate::detection::signal::{LinkDetector, SignalDetector, SignalHit, SignalSource};
use crate::detection::taxonomy::Taxonomy;
use crate::detection::tier::{Tier, DANGEROUS_THRESHOLD, SUSPICIOUS_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Hard cap on reasons in any result.
pub const MAX_REASONS: usize = 5;

/// Filler reasons drawn when a flagged result is thin on explanation.
pub const DEFAULT_PADDING_POOL: &[&str] = &[
    "Message pattern resembles known scam templates",
    "Unsolicited contact from an unverified source",
    "Wording is inconsistent with legitimate organizations",
    "Similar content has been reported by other users",
    "Creates pressure to act without verification",
];

/// Reasons reported when nothing matched.
pub const DEFAULT_SAFE_REASONS: [&str; 3] = [
    "No urgent language detected",
    "No suspicious links found",
    "No requests for personal information",
];

/// Invalid scoring parameters.
#[derive(Error, Debug, PartialEq)]
pub enum ScoringConfigError {
    #[error("Amplification factor must be positive and finite, got {0}")]
    InvalidAmplification(f64),

    #[error("Dangerous threshold {0} is above 100")]
    DangerousOutOfRange(u8),

    #[error("Suspicious threshold {suspicious} must be below dangerous threshold {dangerous}")]
    ThresholdOrder { suspicious: u8, dangerous: u8 },

    #[error("Minimum reasons {0} exceeds the cap of {MAX_REASONS}")]
    TooManyMinReasons(usize),
}

/// Tunable scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Multiplier on the raw match ratio; biases toward over-flagging.
    pub amplification_factor: f64,
    pub dangerous_threshold: u8,
    pub suspicious_threshold: u8,
    /// Padding tops reasons up to this many.
    pub min_reasons: usize,
    /// Padding only applies above this percentage.
    pub padding_threshold: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            amplification_factor: 3.0,
            dangerous_threshold: DANGEROUS_THRESHOLD,
            suspicious_threshold: SUSPICIOUS_THRESHOLD,
            min_reasons: 2,
            padding_threshold: 30,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if !(self.amplification_factor.is_finite() && self.amplification_factor > 0.0) {
            return Err(ScoringConfigError::InvalidAmplification(
                self.amplification_factor,
            ));
        }
        if self.dangerous_threshold > 100 {
            return Err(ScoringConfigError::DangerousOutOfRange(
                self.dangerous_threshold,
            ));
        }
        if self.suspicious_threshold >= self.dangerous_threshold {
            return Err(ScoringConfigError::ThresholdOrder {
                suspicious: self.suspicious_threshold,
                dangerous: self.dangerous_threshold,
            });
        }
        if self.min_reasons > MAX_REASONS {
            return Err(ScoringConfigError::TooManyMinReasons(self.min_reasons));
        }
        Ok(())
    }

    pub fn tier_for(&self, percentage: u8) -> Tier {
        Tier::classify(
            percentage,
            self.dangerous_threshold,
            self.suspicious_threshold,
        )
    }

    /// `round(ratio * 100 * amplification)` clamped to `0..=100`.
    pub fn percentage(&self, weighted: f64, max_possible: f64) -> u8 {
        if max_possible <= 0.0 {
            return 0;
        }
        let raw = (weighted / max_possible * 100.0 * self.amplification_factor).round();
        if raw.is_nan() {
            return 0;
        }
        raw.clamp(0.0, 100.0) as u8
    }
}

/// Deterministic part of a score, before padding and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub percentage: u8,
    /// Categories with at least one match.
    pub matched_categories: BTreeMap<String, usize>,
    /// Category reasons followed by kind-specific reasons.
    pub reasons: Vec<String>,
}

impl Measurement {
    fn blank() -> Self {
        Self {
            percentage: 0,
            matched_categories: BTreeMap::new(),
            reasons: Vec::new(),
        }
    }

    /// Append a reason unless it is already present.
    pub fn push_reason(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }
}

/// Outcome of scoring one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub percentage: u8,
    pub matched_categories: BTreeMap<String, usize>,
    pub reasons: Vec<String>,
    pub tier: Tier,
}

/// Consumer-facing result: score plus advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub tier: Tier,
    pub percentage: u8,
    pub reasons: Vec<String>,
    pub advice: String,
    pub matched_categories: BTreeMap<String, usize>,
}

impl From<ScoreResult> for AnalysisResult {
    fn from(score: ScoreResult) -> Self {
        Self {
            tier: score.tier,
            percentage: score.percentage,
            reasons: score.reasons,
            advice: advice_for(score.tier).to_string(),
            matched_categories: score.matched_categories,
        }
    }
}

/// Scores text against a signal source plus kind-specific detectors.
pub struct RiskScorer {
    source: Box<dyn SignalSource>,
    detectors: Vec<Box<dyn SignalDetector>>,
    config: ScoringConfig,
    padding_pool: Vec<String>,
    default_reasons: Vec<String>,
}

impl RiskScorer {
    /// Create a scorer with the link detector registered.
    pub fn new(source: impl SignalSource + 'static, config: ScoringConfig) -> Self {
        Self {
            source: Box::new(source),
            detectors: vec![Box::new(LinkDetector)],
            config,
            padding_pool: DEFAULT_PADDING_POOL.iter().map(|s| s.to_string()).collect(),
            default_reasons: DEFAULT_SAFE_REASONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_detector(mut self, detector: impl SignalDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    pub fn without_detectors(mut self) -> Self {
        self.detectors.clear();
        self
    }

    pub fn with_padding_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.padding_pool = pool.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_reasons<I, S>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_reasons = reasons.into_iter().map(Into::into).collect();
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Percentage, matched categories and signal reasons. Never random.
    pub fn measure(&self, input: &AnalysisInput) -> Measurement {
        if input.is_blank() {
            return Measurement::blank();
        }

        let normalized = input.normalized();
        let hits = self.source.evaluate(&normalized);

        let weighted: f64 = hits.iter().map(SignalHit::weighted).sum();
        let max_possible: f64 = hits.iter().map(SignalHit::max_weighted).sum();
        let percentage = self.config.percentage(weighted, max_possible);

        let mut measurement = Measurement {
            percentage,
            matched_categories: BTreeMap::new(),
            reasons: Vec::new(),
        };

        for hit in &hits {
            if hit.matched > 0 {
                measurement
                    .matched_categories
                    .insert(hit.name.clone(), hit.matched);
            }
            if hit.triggered() {
                measurement.push_reason(hit.reason.clone());
            }
        }

        for detector in self.detectors.iter().filter(|d| d.applies_to(input.kind())) {
            for reason in detector.detect(&normalized) {
                measurement.push_reason(reason);
            }
        }

        debug!(
            kind = %input.kind(),
            percentage,
            weighted,
            max_possible,
            matched = measurement.matched_categories.len(),
            reasons = measurement.reasons.len(),
            "Content measured"
        );

        measurement
    }

    /// Pad, default and truncate reasons, then classify.
    pub fn finalize(&self, measurement: Measurement, rng: &mut dyn RandomSource) -> ScoreResult {
        let Measurement {
            percentage,
            matched_categories,
            mut reasons,
        } = measurement;

        if reasons.len() < self.config.min_reasons && percentage > self.config.padding_threshold {
            let mut candidates: Vec<&String> = self
                .padding_pool
                .iter()
                .filter(|r| !reasons.contains(r))
                .collect();
            while reasons.len() < self.config.min_reasons && !candidates.is_empty() {
                let picked = candidates.remove(rng.pick_index(candidates.len()));
                reasons.push(picked.clone());
            }
            debug!(padded_to = reasons.len(), "Reasons padded");
        }

        if reasons.is_empty() {
            reasons = self.default_reasons.clone();
        }
        reasons.truncate(MAX_REASONS);

        ScoreResult {
            percentage,
            matched_categories,
            reasons,
            tier: self.config.tier_for(percentage),
        }
    }

    pub fn score(&self, input: &AnalysisInput, rng: &mut dyn RandomSource) -> ScoreResult {
        let measurement = self.measure(input);
        self.finalize(measurement, rng)
    }

    pub fn analyze(&self, input: &AnalysisInput, rng: &mut dyn RandomSource) -> AnalysisResult {
        self.score(input, rng).into()
    }
}

/// Score `input` against `taxonomy` with the standard detectors.
pub fn score(
    input: &AnalysisInput,
    taxonomy: &Taxonomy,
    config: &ScoringConfig,
    rng: &mut dyn RandomSource,
) -> AnalysisResult {
    RiskScorer::new(taxonomy.clone(), config.clone()).analyze(input, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::random::SequenceSource;
    use crate::detection::taxonomy::KeywordCategory;

    fn single_category(terms: &[&str], min_matches: usize) -> Taxonomy {
        let cat = KeywordCategory::new("only", 1.0, min_matches, "Only reason", terms).unwrap();
        Taxonomy::new("single", vec![cat]).unwrap()
    }

    #[test]
    fn percentage_guards_zero_max() {
        assert_eq!(ScoringConfig::default().percentage(0.0, 0.0), 0);
    }

    #[test]
    fn percentage_clamps_at_100() {
        assert_eq!(ScoringConfig::default().percentage(10.0, 10.0), 100);
    }

    #[test]
    fn percentage_rounds_half_up() {
        let config = ScoringConfig {
            amplification_factor: 1.0,
            ..ScoringConfig::default()
        };
        assert_eq!(config.percentage(1.0, 8.0), 13); // 12.5
        assert_eq!(config.percentage(1.0, 3.0), 33);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn config_rejects_inverted_thresholds() {
        let config = ScoringConfig {
            suspicious_threshold: 70,
            dangerous_threshold: 40,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScoringConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn config_rejects_bad_amplification() {
        let config = ScoringConfig {
            amplification_factor: 0.0,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn measure_is_blank_for_whitespace() {
        let scorer = RiskScorer::new(Taxonomy::scam_intelligence(), ScoringConfig::default());
        let m = scorer.measure(&AnalysisInput::text("   \n\t"));
        assert_eq!(m.percentage, 0);
        assert!(m.reasons.is_empty());
        assert!(m.matched_categories.is_empty());
    }

    #[test]
    fn padding_draws_from_pool_without_repeats() {
        // 4 of 10 terms at x3 = 120 -> 100, but min_matches 5 keeps the reason back.
        let terms = ["a1x", "b2x", "c3x", "d4x", "e5x", "f6x", "g7x", "h8x", "i9x", "j0x"];
        let scorer = RiskScorer::new(single_category(&terms, 5), ScoringConfig::default())
            .with_padding_pool(["p1", "p2", "p3"]);
        let mut rng = SequenceSource::new(vec![0.0, 0.0]);
        let result = scorer.score(&AnalysisInput::text("a1x b2x c3x d4x"), &mut rng);
        assert_eq!(result.percentage, 100);
        assert_eq!(result.reasons, vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn padding_stops_when_pool_exhausted() {
        let terms = ["a1x", "b2x"];
        let scorer = RiskScorer::new(single_category(&terms, 2), ScoringConfig::default())
            .with_padding_pool(["only filler"]);
        let mut rng = SequenceSource::new(vec![0.5]);
        let result = scorer.score(&AnalysisInput::text("a1x"), &mut rng);
        assert_eq!(result.reasons, vec!["only filler".to_string()]);
    }

    #[test]
    fn no_padding_at_or_below_threshold() {
        // 1 of 10 terms -> 30%, not above the padding threshold.
        let terms = ["a1x", "b2x", "c3x", "d4x", "e5x", "f6x", "g7x", "h8x", "i9x", "j0x"];
        let scorer = RiskScorer::new(single_category(&terms, 2), ScoringConfig::default());
        let mut rng = SequenceSource::new(vec![0.0]);
        let result = scorer.score(&AnalysisInput::text("a1x"), &mut rng);
        assert_eq!(result.percentage, 30);
        assert_eq!(rng.draws(), 0);
        assert_eq!(
            result.reasons,
            DEFAULT_SAFE_REASONS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn detectors_can_be_removed() {
        let scorer = RiskScorer::new(Taxonomy::link(), ScoringConfig::default()).without_detectors();
        assert!(scorer.detector_names().is_empty());
        let m = scorer.measure(&AnalysisInput::link("http://bit.ly/x"));
        assert!(m.reasons.is_empty());
    }

    #[test]
    fn analysis_result_carries_advice() {
        let mut rng = SequenceSource::new(vec![0.0]);
        let result = score(
            &AnalysisInput::text("hello there"),
            &Taxonomy::scam_intelligence(),
            &ScoringConfig::default(),
            &mut rng,
        );
        assert_eq!(result.tier, Tier::Safe);
        assert_eq!(result.advice, advice_for(Tier::Safe));
    }
}
