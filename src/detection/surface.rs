//! The analysis tools, each binding a signal source and detectors.

use crate::detection::input::ContentKind;
use crate::detection::profile::{
    UsernamePatterns, PROFILE_DEFAULT_REASONS, PROFILE_PADDING_POOL,
};
use crate::detection::scorer::{RiskScorer, ScoringConfig};
use crate::detection::signal::SenderMismatchDetector;
use crate::detection::taxonomy::Taxonomy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A consumer-facing analysis tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    /// Messages, links and screenshots
    ScamIntelligence,
    EmailScanner,
    LinkInspector,
    ProfileChecker,
}

impl Surface {
    /// Text-based scorer for this surface.
    ///
    /// Profiles are scored through
    /// [`ProfileChecker`](crate::detection::profile::ProfileChecker), which
    /// adds simulated account statistics on top of this username scorer.
    pub fn scorer(self, config: ScoringConfig) -> RiskScorer {
        match self {
            Surface::ScamIntelligence => RiskScorer::new(Taxonomy::scam_intelligence(), config),
            Surface::EmailScanner => {
                RiskScorer::new(Taxonomy::email(), config).with_detector(SenderMismatchDetector)
            }
            Surface::LinkInspector => RiskScorer::new(Taxonomy::link(), config),
            Surface::ProfileChecker => RiskScorer::new(UsernamePatterns::default(), config)
                .without_detectors()
                .with_padding_pool(PROFILE_PADDING_POOL.iter().copied())
                .with_default_reasons(PROFILE_DEFAULT_REASONS),
        }
    }

    /// Content kind the surface submits when the caller does not choose one.
    pub fn default_kind(self) -> ContentKind {
        match self {
            Surface::ScamIntelligence | Surface::EmailScanner => ContentKind::Text,
            Surface::LinkInspector => ContentKind::Link,
            Surface::ProfileChecker => ContentKind::Profile,
        }
    }

    pub fn all() -> [Surface; 4] {
        [
            Surface::ScamIntelligence,
            Surface::EmailScanner,
            Surface::LinkInspector,
            Surface::ProfileChecker,
        ]
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Surface::ScamIntelligence => "scam-intelligence",
            Surface::EmailScanner => "email-scanner",
            Surface::LinkInspector => "link-inspector",
            Surface::ProfileChecker => "profile-checker",
        };
        f.write_str(label)
    }
}
