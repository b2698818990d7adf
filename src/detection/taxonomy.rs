//! Keyword taxonomies consumed by the risk scorer.
//!
//! A taxonomy is an ordered list of keyword categories. Each category has a
//! weight, a minimum match count before it contributes a reason, and the
//! single reason sentence shown to the user.

use crate::detection::signal::{SignalHit, SignalSource};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from building a category or taxonomy.
#[derive(Error, Debug, PartialEq)]
pub enum TaxonomyError {
    #[error("Category '{0}' has no terms")]
    EmptyCategory(String),

    #[error("Category '{category}' has a blank term")]
    BlankTerm { category: String },

    #[error("Category '{category}' lists term '{term}' more than once")]
    DuplicateTerm { category: String, term: String },

    #[error("Category '{category}' has invalid weight {weight}; weights must be positive")]
    InvalidWeight { category: String, weight: f64 },

    #[error("Category '{0}' needs a minimum match count of at least 1")]
    InvalidMinMatches(String),

    #[error("Taxonomy '{taxonomy}' defines category '{category}' more than once")]
    DuplicateCategory { taxonomy: String, category: String },

    #[error("Taxonomy '{0}' has no categories")]
    NoCategories(String),
}

/// A named list of trigger terms with a weight.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordCategory {
    name: String,
    terms: Vec<String>,
    weight: f64,
    min_matches: usize,
    reason: String,
}

impl KeywordCategory {
    /// Create a validated category. Terms are lowercased.
    pub fn new<I, S>(
        name: &str,
        weight: f64,
        min_matches: usize,
        reason: &str,
        terms: I,
    ) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(TaxonomyError::InvalidWeight {
                category: name.to_string(),
                weight,
            });
        }
        if min_matches == 0 {
            return Err(TaxonomyError::InvalidMinMatches(name.to_string()));
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::new();
        for term in terms {
            let term = term.as_ref().to_lowercase();
            if term.trim().is_empty() {
                return Err(TaxonomyError::BlankTerm {
                    category: name.to_string(),
                });
            }
            if !seen.insert(term.clone()) {
                return Err(TaxonomyError::DuplicateTerm {
                    category: name.to_string(),
                    term,
                });
            }
            normalized.push(term);
        }
        if normalized.is_empty() {
            return Err(TaxonomyError::EmptyCategory(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            terms: normalized,
            weight,
            min_matches,
            reason: reason.to_string(),
        })
    }

    /// Built-in tables are known-valid and skip validation.
    fn builtin(name: &str, weight: f64, min_matches: usize, reason: &str, terms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
            weight,
            min_matches,
            reason: reason.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn min_matches(&self) -> usize {
        self.min_matches
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Number of distinct terms present in already-lowercased text.
    pub fn count_matches(&self, normalized: &str) -> usize {
        self.terms
            .iter()
            .filter(|term| normalized.contains(term.as_str()))
            .count()
    }
}

/// Ordered set of keyword categories for one content domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    name: String,
    categories: Vec<KeywordCategory>,
}

impl Taxonomy {
    /// Create a taxonomy, rejecting duplicate category names.
    pub fn new(name: &str, categories: Vec<KeywordCategory>) -> Result<Self, TaxonomyError> {
        if categories.is_empty() {
            return Err(TaxonomyError::NoCategories(name.to_string()));
        }
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.name()) {
                return Err(TaxonomyError::DuplicateCategory {
                    taxonomy: name.to_string(),
                    category: category.name().to_string(),
                });
            }
        }
        Ok(Self {
            name: name.to_string(),
            categories,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&KeywordCategory> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Messages, pasted text and extracted image text.
    pub fn scam_intelligence() -> Self {
        Self {
            name: "scam-intelligence".to_string(),
            categories: vec![
                KeywordCategory::builtin(
                    "urgency",
                    1.5,
                    1,
                    "Contains urgent action language",
                    &[
                        "urgent",
                        "immediately",
                        "act now",
                        "final notice",
                        "expires",
                        "within 24 hours",
                    ],
                ),
                KeywordCategory::builtin(
                    "financial",
                    1.2,
                    1,
                    "Mentions financial transactions or payments",
                    &[
                        "bank",
                        "account",
                        "payment",
                        "bitcoin",
                        "gift card",
                        "wire transfer",
                    ],
                ),
                KeywordCategory::builtin(
                    "personal-info",
                    1.8,
                    1,
                    "Requests sensitive personal information",
                    &[
                        "password",
                        "verify",
                        "social security",
                        "pin code",
                        "login details",
                        "date of birth",
                    ],
                ),
                KeywordCategory::builtin(
                    "scam-generic",
                    1.0,
                    2,
                    "Uses wording common in prize and lottery scams",
                    &[
                        "prize",
                        "winner",
                        "congratulations",
                        "free",
                        "claim",
                        "lottery",
                    ],
                ),
            ],
        }
    }

    /// Email bodies and headers pasted by the user.
    pub fn email() -> Self {
        Self {
            name: "email".to_string(),
            categories: vec![
                KeywordCategory::builtin(
                    "phishing-language",
                    1.5,
                    1,
                    "Uses pressure tactics common in phishing emails",
                    &[
                        "urgent",
                        "click here",
                        "suspended",
                        "unusual activity",
                        "act now",
                        "confirm",
                    ],
                ),
                KeywordCategory::builtin(
                    "brand-mention",
                    1.2,
                    1,
                    "Claims to come from a commonly spoofed organization",
                    &["paypal", "amazon", "bank", "microsoft", "apple", "netflix"],
                ),
                KeywordCategory::builtin(
                    "credential-request",
                    1.8,
                    1,
                    "Requests sensitive information",
                    &[
                        "password",
                        "verify",
                        "account",
                        "login",
                        "social security",
                        "credit card",
                    ],
                ),
                KeywordCategory::builtin(
                    "links-attachments",
                    1.0,
                    2,
                    "Pushes you to open links or attachments",
                    &[
                        "http://",
                        "https://",
                        "attachment",
                        "download",
                        "invoice",
                        ".zip",
                    ],
                ),
            ],
        }
    }

    /// URLs submitted to the link inspector.
    pub fn link() -> Self {
        Self {
            name: "link".to_string(),
            categories: vec![
                KeywordCategory::builtin(
                    "phishing-bait",
                    1.5,
                    1,
                    "URL contains bait words used in phishing links",
                    &["free", "prize", "win", "bonus", "gift", "reward"],
                ),
                KeywordCategory::builtin(
                    "credential-lure",
                    1.8,
                    1,
                    "URL imitates a login or verification page",
                    &["login", "verify", "secure", "account", "update", "signin"],
                ),
                KeywordCategory::builtin(
                    "brand-lookalike",
                    1.2,
                    1,
                    "Domain imitates a well-known brand",
                    &["paypa1", "amaz0n", "faceb00k", "micros0ft", "app1e", "g00gle"],
                ),
                KeywordCategory::builtin(
                    "obfuscation",
                    1.0,
                    2,
                    "URL uses tricks to hide its real destination",
                    &["@", "%2f", "redirect", "url=", "data:", "javascript:"],
                ),
            ],
        }
    }
}

impl SignalSource for Taxonomy {
    fn evaluate(&self, normalized: &str) -> Vec<SignalHit> {
        self.categories
            .iter()
            .map(|c| SignalHit {
                name: c.name().to_string(),
                matched: c.count_matches(normalized),
                capacity: c.terms().len(),
                weight: c.weight(),
                min_matches: c.min_matches(),
                reason: c.reason().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revalidate(taxonomy: &Taxonomy) -> Result<Taxonomy, TaxonomyError> {
        let categories = taxonomy
            .categories()
            .iter()
            .map(|c| KeywordCategory::new(c.name(), c.weight(), c.min_matches(), c.reason(), c.terms()))
            .collect::<Result<Vec<_>, _>>()?;
        Taxonomy::new(taxonomy.name(), categories)
    }

    #[test]
    fn builtin_taxonomies_are_valid() {
        for taxonomy in [Taxonomy::scam_intelligence(), Taxonomy::email(), Taxonomy::link()] {
            let rebuilt = revalidate(&taxonomy).expect("builtin taxonomy should validate");
            assert_eq!(rebuilt, taxonomy);
        }
    }

    #[test]
    fn scam_intelligence_weights() {
        let t = Taxonomy::scam_intelligence();
        assert_eq!(t.categories().len(), 4);
        assert_eq!(t.category("urgency").unwrap().weight(), 1.5);
        assert_eq!(t.category("financial").unwrap().weight(), 1.2);
        assert_eq!(t.category("personal-info").unwrap().weight(), 1.8);
        assert_eq!(t.category("scam-generic").unwrap().weight(), 1.0);
        assert_eq!(t.category("scam-generic").unwrap().min_matches(), 2);
    }

    #[test]
    fn terms_are_lowercased() {
        let c = KeywordCategory::new("c", 1.0, 1, "r", ["URGENT", "Now"]).unwrap();
        assert_eq!(c.terms(), &["urgent".to_string(), "now".to_string()]);
    }

    #[test]
    fn rejects_duplicate_terms_case_insensitively() {
        let err = KeywordCategory::new("c", 1.0, 1, "r", ["Bank", "bank"]).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateTerm { .. }));
    }

    #[test]
    fn rejects_non_positive_weight() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = KeywordCategory::new("c", weight, 1, "r", ["a"]).unwrap_err();
            assert!(matches!(err, TaxonomyError::InvalidWeight { .. }));
        }
    }

    #[test]
    fn rejects_empty_and_blank_terms() {
        let empty: [&str; 0] = [];
        assert_eq!(
            KeywordCategory::new("c", 1.0, 1, "r", empty).unwrap_err(),
            TaxonomyError::EmptyCategory("c".to_string())
        );
        assert!(matches!(
            KeywordCategory::new("c", 1.0, 1, "r", ["  "]).unwrap_err(),
            TaxonomyError::BlankTerm { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_category_names() {
        let a = KeywordCategory::new("dup", 1.0, 1, "r", ["a"]).unwrap();
        let b = KeywordCategory::new("dup", 2.0, 1, "r", ["b"]).unwrap();
        let err = Taxonomy::new("t", vec![a, b]).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateCategory { .. }));
    }

    #[test]
    fn counts_presence_not_frequency() {
        let c = KeywordCategory::new("c", 1.0, 1, "r", ["win", "cash"]).unwrap();
        assert_eq!(c.count_matches("win win win"), 1);
        assert_eq!(c.count_matches("win some cash"), 2);
        assert_eq!(c.count_matches("nothing here"), 0);
    }
}
