//! Canned advice per risk tier.

use crate::detection::tier::Tier;

/// One-line recommendation shown with every result.
pub fn advice_for(tier: Tier) -> &'static str {
    match tier {
        Tier::Dangerous => {
            "This content shows strong signs of a scam. Do not respond or click any links. \
             Block the sender and report it immediately."
        }
        Tier::Suspicious => {
            "This content has several red flags. Verify through official channels before \
             responding or sharing any information."
        }
        Tier::Safe => {
            "This content appears to be safe, but always stay vigilant with unexpected \
             communications."
        }
    }
}

/// Concrete next steps for the tier, most important first.
pub fn recommended_steps(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Dangerous => &[
            "Do not click any links",
            "Do not download any attachments",
            "Report this content as a scam to the platform or your provider",
            "Block the sender",
        ],
        Tier::Suspicious => &[
            "Exercise caution with this content",
            "Verify the sender through other channels before taking action",
            "Do not share sensitive information",
        ],
        Tier::Safe => &["Always remain vigilant with unexpected communications"],
    }
}
