//! Per-file confirmation.
//!
//! Interactive mode asks the operator about each expired file. The answer is
//! read through a [`ResponseSource`] so tests can script it.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use tracing::debug;

use gcollect_core::{FileCandidate, RunError, TraversalConfig};

use crate::report::Reporter;

/// Outcome of asking the gate about a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Go ahead and delete.
    Delete,
    /// Leave the file alone.
    Skip,
}

/// Where interactive answers come from.
pub trait ResponseSource {
    /// Show `prompt` and read one answer. `None` means input is exhausted.
    fn respond(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads answers from standard input, prompting on standard output.
#[derive(Debug, Default)]
pub struct StdinResponses;

impl ResponseSource for StdinResponses {
    fn respond(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            // Keep the next report off the prompt line.
            writeln!(stdout)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Canned answers, consumed in order.
#[derive(Debug, Default)]
pub struct ScriptedResponses {
    answers: VecDeque<String>,
    /// Prompts shown so far.
    pub prompts: Vec<String>,
}

impl ScriptedResponses {
    /// Script a sequence of answers.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl ResponseSource for ScriptedResponses {
    fn respond(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Accepts `y` or `yes` in any case, ignoring surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Decides, per candidate, whether deletion proceeds.
#[derive(Debug)]
pub struct ConfirmationGate<R> {
    auto_confirm: bool,
    silent: bool,
    responses: R,
}

impl<R: ResponseSource> ConfirmationGate<R> {
    /// Create a gate from the run configuration.
    pub fn new(config: &TraversalConfig, responses: R) -> Self {
        Self {
            auto_confirm: config.auto_confirm,
            silent: config.silent,
            responses,
        }
    }

    /// Ask about one candidate.
    ///
    /// Fails only if the response source itself fails.
    pub fn approve(
        &mut self,
        candidate: &FileCandidate,
        reporter: &mut dyn Reporter,
    ) -> Result<Decision, RunError> {
        if self.auto_confirm {
            if !self.silent {
                reporter.deleting(candidate.path());
            }
            return Ok(Decision::Delete);
        }

        let prompt = format!("Delete {}? [y/N] ", candidate.path().display());
        let answer = self
            .responses
            .respond(&prompt)
            .map_err(|source| RunError::Prompt { source })?;

        match answer {
            Some(answer) if is_affirmative(&answer) => Ok(Decision::Delete),
            answer => {
                debug!(path = %candidate.path().display(), ?answer, "declined");
                reporter.skipped(candidate.path());
                Ok(Decision::Skip)
            }
        }
    }

    /// Consume the gate, returning its response source.
    pub fn into_responses(self) -> R {
        self.responses
    }
}
