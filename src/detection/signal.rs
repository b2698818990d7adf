//! Signal sources and extra-signal detectors.
//!
//! A [`SignalSource`] turns normalized text into per-category hits that feed
//! the score. A [`SignalDetector`] only contributes reasons, and only for the
//! content kinds it declares.

use crate::detection::input::ContentKind;
use regex::Regex;
use std::sync::LazyLock;

/// Match outcome for one category of a signal source.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalHit {
    pub name: String,
    /// Distinct terms or patterns matched.
    pub matched: usize,
    /// Terms or patterns the category could match.
    pub capacity: usize,
    pub weight: f64,
    /// Matches required before the reason is reported.
    pub min_matches: usize,
    pub reason: String,
}

impl SignalHit {
    pub fn weighted(&self) -> f64 {
        self.matched as f64 * self.weight
    }

    pub fn max_weighted(&self) -> f64 {
        self.capacity as f64 * self.weight
    }

    /// Whether this hit is strong enough to surface its reason.
    pub fn triggered(&self) -> bool {
        self.matched > 0 && self.matched >= self.min_matches
    }
}

/// Produces weighted category hits from lowercased text.
pub trait SignalSource: Send + Sync {
    fn evaluate(&self, normalized: &str) -> Vec<SignalHit>;
}

/// Kind-specific check that adds reasons without changing the percentage.
pub trait SignalDetector: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies_to(&self, _kind: ContentKind) -> bool {
        true
    }

    /// Reasons for the lowercased text, in a fixed order.
    fn detect(&self, normalized: &str) -> Vec<String>;
}

const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "goo.gl",
    "tinyurl",
    "t.co/",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "cutt.ly",
    "rebrand.ly",
    "tiny.cc",
    "shorturl.at",
];

/// Raw IPv4 hosts, chains of hyphens, and TLDs that are cheap to register
/// in bulk. Matched against the host only.
static SUSPICIOUS_HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\d{1,3}(?:\.\d{1,3}){3}$
        | [a-z0-9]+(?:-[a-z0-9]+){2,}
        | \.(?:xyz|top|tk|ml|ga|cf|gq|click|zip|loan|work|rest)$
        ",
    )
    .unwrap()
});

/// Letter/digit runs like `freemoney123`, anywhere in the link.
static DIGIT_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]\d{3,}|\d{3,}[a-z]").unwrap());

pub const SHORTENER_REASON: &str = "URL shortener hides the real destination";
pub const SUSPICIOUS_LINK_REASON: &str =
    "Link uses a suspicious pattern (letter-digit runs, hyphen chains, a raw IP, or a high-risk TLD)";
pub const INSECURE_SCHEME_REASON: &str = "Link does not use a secure HTTPS connection";

/// URL heuristics for `link` content.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkDetector;

impl LinkDetector {
    pub fn uses_shortener(normalized: &str) -> bool {
        URL_SHORTENERS.iter().any(|s| normalized.contains(s))
    }

    /// Host part of a link, without scheme, userinfo, port or path.
    pub fn host(normalized: &str) -> &str {
        let rest = normalized
            .split_once("://")
            .map_or(normalized, |(_, rest)| rest);
        let authority = rest
            .split(|c| matches!(c, '/' | '?' | '#'))
            .next()
            .unwrap_or(rest);
        let host = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host)| host);
        host.split(':').next().unwrap_or(host)
    }

    pub fn has_suspicious_pattern(normalized: &str) -> bool {
        SUSPICIOUS_HOST_PATTERN.is_match(Self::host(normalized.trim()))
            || DIGIT_RUN_PATTERN.is_match(normalized)
    }
}

impl SignalDetector for LinkDetector {
    fn name(&self) -> &'static str {
        "link"
    }

    fn applies_to(&self, kind: ContentKind) -> bool {
        kind == ContentKind::Link
    }

    fn detect(&self, normalized: &str) -> Vec<String> {
        let mut reasons = Vec::new();
        if Self::uses_shortener(normalized) {
            reasons.push(SHORTENER_REASON.to_string());
        }
        if Self::has_suspicious_pattern(normalized) {
            reasons.push(SUSPICIOUS_LINK_REASON.to_string());
        }
        if normalized.contains("http://") {
            reasons.push(INSECURE_SCHEME_REASON.to_string());
        }
        reasons
    }
}

const SPOOFED_BRANDS: &[&str] = &[
    "paypal",
    "amazon",
    "microsoft",
    "apple",
    "netflix",
    "google",
    "facebook",
    "instagram",
];

static BRAND_MENTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", SPOOFED_BRANDS.join("|"))).unwrap()
});

static EMAIL_ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9._%+-]+@([a-z0-9-]+(?:\.[a-z0-9-]+)+)").unwrap()
});

/// Second-level labels that sit under a country code, as in `co.uk`.
const COUNTRY_SECOND_LEVELS: &[&str] = &["co", "com", "net", "org", "ac", "gov", "ne", "or"];

pub const SENDER_MISMATCH_REASON: &str =
    "Sender address does not match the organization it claims to be";

/// Flags email text that names a brand while every sender address sits on
/// some other domain.
#[derive(Debug, Default, Clone, Copy)]
pub struct SenderMismatchDetector;

impl SenderMismatchDetector {
    /// Label a domain was registered under: `amazon` for `mail.amazon.com`
    /// and for `amazon.co.uk`.
    pub fn registrable_label(domain: &str) -> Option<&str> {
        let labels: Vec<&str> = domain.split('.').collect();
        let suffix_len = match labels.as_slice() {
            [.., second, tld] if tld.len() == 2 && COUNTRY_SECOND_LEVELS.contains(second) => 2,
            _ => 1,
        };
        labels
            .len()
            .checked_sub(suffix_len + 1)
            .map(|index| labels[index])
    }

    fn domain_belongs_to(domain: &str, brand: &str) -> bool {
        Self::registrable_label(domain) == Some(brand)
    }
}

impl SignalDetector for SenderMismatchDetector {
    fn name(&self) -> &'static str {
        "sender-mismatch"
    }

    fn detect(&self, normalized: &str) -> Vec<String> {
        let domains: Vec<&str> = EMAIL_ADDRESS_PATTERN
            .captures_iter(normalized)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        if domains.is_empty() {
            return Vec::new();
        }

        let spoofed = BRAND_MENTION_PATTERN
            .find_iter(normalized)
            .any(|brand| {
                !domains
                    .iter()
                    .any(|d| Self::domain_belongs_to(d, brand.as_str()))
            });

        if spoofed {
            vec![SENDER_MISMATCH_REASON.to_string()]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_triggers_at_minimum() {
        let mut hit = SignalHit {
            name: "c".into(),
            matched: 1,
            capacity: 4,
            weight: 1.5,
            min_matches: 2,
            reason: "r".into(),
        };
        assert!(!hit.triggered());
        hit.matched = 2;
        assert!(hit.triggered());
        assert_eq!(hit.weighted(), 3.0);
        assert_eq!(hit.max_weighted(), 6.0);
    }

    #[test]
    fn link_detector_only_for_links() {
        assert!(LinkDetector.applies_to(ContentKind::Link));
        assert!(!LinkDetector.applies_to(ContentKind::Text));
        assert!(!LinkDetector.applies_to(ContentKind::Image));
    }

    #[test]
    fn link_detector_flags_shortener_and_domain() {
        let reasons = LinkDetector.detect("http://bit.ly/freemoney123");
        assert_eq!(
            reasons,
            vec![
                SHORTENER_REASON.to_string(),
                SUSPICIOUS_LINK_REASON.to_string(),
                INSECURE_SCHEME_REASON.to_string(),
            ]
        );
    }

    #[test]
    fn suspicious_domain_patterns() {
        assert!(LinkDetector::has_suspicious_pattern("http://192.168.4.20/login"));
        assert!(LinkDetector::has_suspicious_pattern("https://secure-pay-update.com"));
        assert!(LinkDetector::has_suspicious_pattern("https://prize.xyz/claim"));
        assert!(!LinkDetector::has_suspicious_pattern("https://www.example.com/about"));
        assert!(!LinkDetector::has_suspicious_pattern("https://news.org/2024/report"));
    }

    #[test]
    fn hyphenated_path_on_plain_host_is_not_suspicious() {
        let url = "https://www.bbc.com/news/world-europe-68123456";
        assert_eq!(LinkDetector::host(url), "www.bbc.com");
        assert!(LinkDetector.detect(url).is_empty());
    }

    #[test]
    fn host_ignores_userinfo_and_port() {
        assert_eq!(LinkDetector::host("http://paypal.com@evil.xyz:8080/x"), "evil.xyz");
        assert_eq!(LinkDetector::host("bit.ly/freemoney123"), "bit.ly");
        assert!(LinkDetector::has_suspicious_pattern("http://paypal.com@evil.xyz/"));
    }

    #[test]
    fn clean_https_link_has_no_reasons() {
        assert!(LinkDetector.detect("https://www.wikipedia.org/").is_empty());
    }

    #[test]
    fn sender_mismatch_on_lookalike_domain() {
        let text = "from: service@paypa1-support.net\nyour paypal account is locked";
        assert_eq!(
            SenderMismatchDetector.detect(text),
            vec![SENDER_MISMATCH_REASON.to_string()]
        );
    }

    #[test]
    fn sender_on_official_domain_is_fine() {
        let text = "from: receipts@mail.amazon.com\nyour amazon order has shipped";
        assert!(SenderMismatchDetector.detect(text).is_empty());
    }

    #[test]
    fn regional_brand_domain_is_fine() {
        let text = "from: auto-confirm@amazon.co.uk\nyour amazon order has shipped";
        assert!(SenderMismatchDetector.detect(text).is_empty());
        assert_eq!(
            SenderMismatchDetector::registrable_label("amazon.co.uk"),
            Some("amazon")
        );
        assert_eq!(
            SenderMismatchDetector::registrable_label("amazon.de"),
            Some("amazon")
        );
    }

    #[test]
    fn brand_inside_another_word_is_ignored() {
        let text = "from: bob@farmstand.com\nfresh pineapple delivered today";
        assert!(SenderMismatchDetector.detect(text).is_empty());
    }

    #[test]
    fn no_sender_address_no_reason() {
        assert!(SenderMismatchDetector.detect("your paypal account is locked").is_empty());
    }
}
