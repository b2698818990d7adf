//! Analysis input types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the raw text stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Pasted message text
    Text,
    /// A URL
    Link,
    /// Text extracted from a screenshot
    Image,
    /// A social-media username
    Profile,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Text => "text",
            ContentKind::Link => "link",
            ContentKind::Image => "image",
            ContentKind::Profile => "profile",
        };
        f.write_str(s)
    }
}

/// Text to analyze plus its kind.
///
/// For [`ContentKind::Image`] the text is whatever the caller extracted from
/// the picture; for [`ContentKind::Profile`] it is the username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput {
    raw_text: String,
    kind: ContentKind,
}

impl AnalysisInput {
    pub fn new(raw_text: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            raw_text: raw_text.into(),
            kind,
        }
    }

    pub fn text(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, ContentKind::Text)
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self::new(url, ContentKind::Link)
    }

    pub fn image(extracted_text: impl Into<String>) -> Self {
        Self::new(extracted_text, ContentKind::Image)
    }

    pub fn profile(username: impl Into<String>) -> Self {
        Self::new(username, ContentKind::Profile)
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// True when there is nothing but whitespace to analyze.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }

    /// Lowercased text used for all matching.
    pub fn normalized(&self) -> String {
        self.raw_text.to_lowercase()
    }
}
