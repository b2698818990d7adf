//! Security assistant with canned, keyword-routed answers.

use serde::Serialize;

/// Topic a question was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Links,
    Scams,
    Passwords,
    Email,
    General,
}

/// Trigger words per topic, checked in order; the first topic that matches wins.
const ROUTES: &[(Topic, &[&str])] = &[
    (Topic::Links, &["link", "url", "http"]),
    (Topic::Scams, &["scam", "phishing", "fraud"]),
    (Topic::Passwords, &["password"]),
    (Topic::Email, &["email", "mail"]),
];

pub const GREETING: &str =
    "Hello! I'm your Cyber Copilot. How can I help you with online security today?";

/// Questions offered as starting points.
pub const SUGGESTIONS: &[(&str, &str)] = &[
    ("Check a link", "Is this link safe? https://bit.ly/3xR5tZq"),
    (
        "Identify a scam",
        "I received an email claiming I won a prize. Is this a scam?",
    ),
    ("Password advice", "How can I create stronger passwords?"),
];

pub fn route(question: &str) -> Topic {
    let lower = question.to_lowercase();
    ROUTES
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::General)
}

pub fn answer_for(topic: Topic) -> &'static str {
    match topic {
        Topic::Links => {
            "When checking links for safety, I recommend:\n\n\
             1. Don't click on shortened links (bit.ly, tinyurl, etc.) without inspection\n\
             2. Verify the sender is legitimate\n\
             3. Check for misspellings in the domain (like 'faceb00k.com')\n\
             4. Run `pistasecure link <URL>` to analyze it thoroughly\n\n\
             Would you like me to check a specific link for you?"
        }
        Topic::Scams => {
            "Common signs of scams include:\n\n\
             1. Creating urgency or fear ('Act now!')\n\
             2. Promising unrealistic rewards\n\
             3. Requesting personal information\n\
             4. Poor grammar or spelling\n\
             5. Suspicious sender addresses\n\n\
             If you've encountered a potential scam, `pistasecure report generate` \
             can document it for the right authority."
        }
        Topic::Passwords => {
            "For stronger passwords:\n\n\
             1. Use at least 12 characters\n\
             2. Combine uppercase, lowercase, numbers, and symbols\n\
             3. Avoid common words or phrases\n\
             4. Don't reuse passwords across sites\n\
             5. Consider a password manager"
        }
        Topic::Email => {
            "To protect yourself from email threats:\n\n\
             1. Be wary of unexpected attachments\n\
             2. Verify sender addresses carefully\n\
             3. Don't click suspicious links\n\
             4. Enable two-factor authentication\n\
             5. Paste suspicious messages into `pistasecure email`\n\n\
             Would you like more specific email security advice?"
        }
        Topic::General => {
            "I'm here to help with any cybersecurity questions you have. You can ask me about:\n\n\
             - Checking suspicious links or websites\n\
             - Identifying potential scams or phishing attempts\n\
             - Securing your accounts and passwords\n\
             - Safe browsing practices\n\
             - Protecting personal information online"
        }
    }
}

/// Route a question and return the canned answer.
pub fn respond(question: &str) -> (Topic, &'static str) {
    let topic = route(question);
    (topic, answer_for(topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_take_precedence() {
        assert_eq!(route("Is this phishing link safe?"), Topic::Links);
    }

    #[test]
    fn routes_each_topic() {
        assert_eq!(route("Is this a SCAM?"), Topic::Scams);
        assert_eq!(route("password tips"), Topic::Passwords);
        assert_eq!(route("weird mail from my boss"), Topic::Email);
        assert_eq!(route("hello"), Topic::General);
    }

    #[test]
    fn suggestions_route_to_their_topics() {
        let topics: Vec<Topic> = SUGGESTIONS.iter().map(|(_, q)| route(q)).collect();
        // The scam suggestion mentions an email, but scam words win.
        assert_eq!(topics, vec![Topic::Links, Topic::Scams, Topic::Passwords]);
    }

    #[test]
    fn respond_pairs_topic_and_answer() {
        let (topic, answer) = respond("how do I make a strong password");
        assert_eq!(topic, Topic::Passwords);
        assert!(answer.contains("12 characters"));
    }
}
