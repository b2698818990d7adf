//! Ask command: canned answers from the security assistant.

use colored::*;
use std::process::ExitCode;
use tracing::debug;

use crate::assistant::{respond, GREETING, SUGGESTIONS};

pub fn cmd_ask(question: &str) -> anyhow::Result<ExitCode> {
    let question = question.trim();
    if question.is_empty() {
        println!("{}", GREETING);
        println!();
        println!("Try asking:");
        for (label, example) in SUGGESTIONS {
            println!("  {}: {}", label.bold(), example);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (topic, answer) = respond(question);
    debug!(?topic, "Question routed");
    println!("{}", answer);
    Ok(ExitCode::SUCCESS)
}
