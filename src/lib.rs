//! PistaSecure: spot scams before they cost you.
//!
//! Heuristic content-risk scoring for messages, links, emails and social
//! profiles, plus scam report generation, a recorded report log and a
//! canned security assistant.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod detection;
pub mod logging;
pub mod report;
