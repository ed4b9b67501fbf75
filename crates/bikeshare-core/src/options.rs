//! Answer validation for interactive prompts.
//!
//! Answers are trimmed and lowercased, may list several values separated by
//! commas, and the keyword `end` ends the whole session from any prompt.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;

/// Typing this at any prompt ends the session.
pub const ABORT_KEYWORD: &str = "end";

/// Allowed set used by plain yes/no questions.
pub const YES_NO: &[&str] = &["y", "n"];

/// Shown instead of the original prompt after an invalid answer.
pub const RETRY_PROMPT: &str =
    "\nSomething is not right. Please mind the formatting and be sure to enter a valid option:\n>";

/// A validated answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// A single allowed value.
    Value(String),
    /// Several allowed values, in the order typed. Repeats are kept.
    Values(Vec<String>),
    /// The user asked to end the session.
    Abort,
}

impl Choice {
    /// Flatten into the list of chosen values; empty for [`Choice::Abort`].
    pub fn into_values(self) -> Vec<String> {
        match self {
            Choice::Value(v) => vec![v],
            Choice::Values(vs) => vs,
            Choice::Abort => Vec::new(),
        }
    }

    /// `true` when this is a single value equal to `value`.
    pub fn is(&self, value: &str) -> bool {
        matches!(self, Choice::Value(v) if v == value)
    }
}

/// Validate one raw answer against `allowed`.
///
/// Returns `None` when the answer is not acceptable and the user should be
/// asked again. A comma-separated answer is only accepted when every part is
/// allowed; no partial result is ever returned.
pub fn parse_choice(raw: &str, allowed: &[&str]) -> Option<Choice> {
    let answer = raw.trim().to_lowercase();

    if answer == ABORT_KEYWORD {
        return Some(Choice::Abort);
    }

    if !answer.contains(',') {
        return allowed
            .contains(&answer.as_str())
            .then_some(Choice::Value(answer));
    }

    let parts: Vec<String> = answer
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .collect();

    parts
        .iter()
        .all(|part| allowed.contains(&part.as_str()))
        .then_some(Choice::Values(parts))
}

// ── LinePrompter ──────────────────────────────────────────────────────────────

/// Line-oriented prompt loop over any reader/writer pair.
///
/// The binary wires it to stdin/stdout; tests script it with
/// [`std::io::Cursor`] and a `Vec<u8>`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `prompt` until the answer is in `allowed` or the user aborts.
    ///
    /// End of input counts as an abort, so a closed stream cannot loop
    /// forever.
    pub fn ask(&mut self, prompt: &str, allowed: &[&str]) -> Result<Choice> {
        let mut prompt = prompt;
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("prompt input closed; treating as abort");
                return Ok(Choice::Abort);
            }

            if let Some(choice) = parse_choice(&line, allowed) {
                return Ok(choice);
            }

            debug!(answer = line.trim(), "rejected answer");
            prompt = RETRY_PROMPT;
        }
    }

    /// Yes/no question with the default allowed set.
    pub fn confirm(&mut self, prompt: &str) -> Result<Choice> {
        self.ask(prompt, YES_NO)
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Direct access to the output stream, for renderers.
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
