//! Scam report generation for authorities and platforms.

use crate::detection::scorer::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("Nothing to report: provide the scam text or a screenshot")]
    EmptySubmission,

    #[error("Email destination needs a recipient address")]
    MissingRecipient,

    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),
}

/// Where the report is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportDestination {
    Email,
    Instagram,
    Facebook,
    Tiktok,
    Whatsapp,
    Police,
    Ftc,
    Interpol,
    Discord,
    Paypal,
}

impl ReportDestination {
    pub fn label(&self) -> &'static str {
        match self {
            ReportDestination::Email => "Email",
            ReportDestination::Instagram => "Instagram",
            ReportDestination::Facebook => "Facebook",
            ReportDestination::Tiktok => "TikTok",
            ReportDestination::Whatsapp => "WhatsApp",
            ReportDestination::Police => "Local Police",
            ReportDestination::Ftc => "FTC",
            ReportDestination::Interpol => "Interpol",
            ReportDestination::Discord => "Discord",
            ReportDestination::Paypal => "PayPal",
        }
    }
}

impl fmt::Display for ReportDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScamCategory {
    FinancialFraud,
    PhishingAttempt,
}

impl fmt::Display for ScamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScamCategory::FinancialFraud => f.write_str("financial fraud"),
            ScamCategory::PhishingAttempt => f.write_str("phishing attempt"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttackVector {
    MaliciousLinks,
    SocialEngineering,
}

impl fmt::Display for AttackVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackVector::MaliciousLinks => f.write_str("malicious links"),
            AttackVector::SocialEngineering => f.write_str("social engineering"),
        }
    }
}

/// What the user submitted.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub content: String,
    /// File name of an attached screenshot
    pub screenshot: Option<String>,
    pub recipient: Option<String>,
}

/// A generated report, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScamReport {
    pub generated_at_secs: u64,
    pub destination: ReportDestination,
    pub recipient: Option<String>,
    pub content: Option<String>,
    pub screenshot: Option<String>,
    pub category: ScamCategory,
    pub vector: AttackVector,
    pub analysis: Option<AnalysisResult>,
}

impl ScamReport {
    pub fn generate(
        request: ReportRequest,
        destination: ReportDestination,
        analysis: Option<AnalysisResult>,
        generated_at_secs: u64,
    ) -> Result<Self, ReportError> {
        let content = Some(request.content.trim().to_string()).filter(|c| !c.is_empty());
        if content.is_none() && request.screenshot.is_none() {
            return Err(ReportError::EmptySubmission);
        }

        let recipient = match (destination, request.recipient) {
            (ReportDestination::Email, None) => return Err(ReportError::MissingRecipient),
            (_, Some(addr)) => {
                let addr = addr.trim().to_string();
                if !looks_like_email(&addr) {
                    return Err(ReportError::InvalidRecipient(addr));
                }
                Some(addr)
            }
            (_, None) => None,
        };

        let lower = content.as_deref().unwrap_or_default().to_lowercase();
        let category = if lower.contains("money") || lower.contains("bank") {
            ScamCategory::FinancialFraud
        } else {
            ScamCategory::PhishingAttempt
        };
        let vector = if lower.contains("click") {
            AttackVector::MaliciousLinks
        } else {
            AttackVector::SocialEngineering
        };

        Ok(Self {
            generated_at_secs,
            destination,
            recipient,
            content,
            screenshot: request.screenshot,
            category,
            vector,
            analysis,
        })
    }

    /// One-sentence summary of the scam.
    pub fn summary(&self) -> String {
        format!(
            "This appears to be a {} targeting users through {}.",
            self.category, self.vector
        )
    }

    /// Plain-text report suitable for copying or sending.
    pub fn render_text(&self) -> String {
        let mut out = String::from("SCAM REPORT\n\n");
        out.push_str(&format!("Date: {}\n", format_date(self.generated_at_secs)));
        out.push_str(&format!("Destination: {}\n", self.destination));
        if let Some(recipient) = &self.recipient {
            out.push_str(&format!("Recipient: {}\n", recipient));
        }
        out.push_str(&format!("Summary: {}\n\n", self.summary()));

        out.push_str("Content:\n");
        match &self.content {
            Some(content) => out.push_str(content),
            None => out.push_str("Image submission (see attached screenshot)"),
        }
        out.push('\n');
        if let Some(screenshot) = &self.screenshot {
            out.push_str(&format!("Screenshot: {}\n", screenshot));
        }

        if let Some(analysis) = &self.analysis {
            out.push_str(&format!(
                "\nRisk assessment: {} ({}%)\n",
                analysis.tier, analysis.percentage
            ));
            for reason in &analysis.reasons {
                out.push_str(&format!("- {}\n", reason));
            }
            out.push_str(&format!("Advice: {}\n", analysis.advice));
        }

        out
    }
}

fn looks_like_email(addr: &str) -> bool {
    match addr.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !addr.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// `YYYY-MM-DD` (UTC) for a Unix timestamp.
pub fn format_date(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    // Civil-from-days, proleptic Gregorian calendar.
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
