//! Yes/no decision resolution.
//!
//! Wherever a step's behavior branches on operator choice it goes through a
//! [`PromptResolver`]. The implementation is picked once at startup:
//! interactive stdin prompting, or a fixed answer for non-interactive runs
//! (`YES_ALL=1`). Answers are never cached; asking the same question twice
//! may legitimately get different answers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Strategy for resolving a yes/no question.
pub trait PromptResolver {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool>;
}

/// Blocks on stdin. Unrecognized input is reprompted, never defaulted.
pub struct InteractivePrompt;

impl PromptResolver for InteractivePrompt {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{question} [y/n] ");
            std::io::stdout().flush().context("flush prompt")?;
            let line = match lines.next() {
                Some(line) => line.context("read prompt answer")?,
                None => {
                    return Err(anyhow!(
                        "stdin closed while waiting for an answer to: {question}"
                    ));
                }
            };
            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => eprintln!("please answer y or n"),
            }
        }
    }
}

/// Resolves every question to the same answer without touching stdin.
pub struct FixedAnswerPrompt {
    answer: bool,
}

impl FixedAnswerPrompt {
    /// Accept-all mode: every prompt resolves affirmatively.
    pub fn yes() -> Self {
        Self { answer: true }
    }

    pub fn no() -> Self {
        Self { answer: false }
    }
}

impl PromptResolver for FixedAnswerPrompt {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        debug!(question, answer = self.answer, "fixed prompt answer");
        Ok(self.answer)
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
