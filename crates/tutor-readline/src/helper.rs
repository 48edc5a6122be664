//! Rustyline helper: slash-command completion, highlighting and hints.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tutor_core::ChatMode;
use tutor_core::backend::QuestionKind;

use crate::commands::SLASH_COMMANDS;

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Candidates for the argument of `command`.
    fn argument_candidates(command: &str) -> Vec<&'static str> {
        match command {
            "/mode" => ChatMode::ALL.iter().map(ChatMode::as_str).collect(),
            "/question" => QuestionKind::ALL.iter().map(QuestionKind::as_str).collect(),
            "/sound" => vec!["on", "off"],
            _ => Vec::new(),
        }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        if !line.starts_with('/') {
            return (0, Vec::new());
        }

        match line.split_once(' ') {
            None => (
                0,
                self.commands
                    .iter()
                    .filter(|cmd| cmd.starts_with(line))
                    .cloned()
                    .collect(),
            ),
            Some((command, arg)) if !arg.contains(' ') => (
                command.len() + 1,
                Self::argument_candidates(command)
                    .into_iter()
                    .filter(|candidate| candidate.starts_with(arg))
                    .map(String::from)
                    .collect(),
            ),
            Some(_) => (0, Vec::new()),
        }
    }
}

impl Default for CliHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, candidates) = self.candidates(line);
        let typed = &line[start..];

        candidates
            .into_iter()
            .find(|candidate| candidate.len() > typed.len())
            .map(|candidate| candidate[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_completion() {
        let helper = CliHelper::new();
        let (start, candidates) = helper.candidates("/s");
        assert_eq!(start, 0);
        assert_eq!(candidates, vec!["/sound", "/speak"]);
    }

    #[test]
    fn test_argument_completion() {
        let helper = CliHelper::new();
        let (start, candidates) = helper.candidates("/mode p");
        assert_eq!(start, 6);
        assert_eq!(candidates, vec!["practice"]);

        let (_, candidates) = helper.candidates("/question ");
        assert_eq!(candidates, vec!["coding", "mcq", "subjective"]);
    }

    #[test]
    fn test_plain_text_has_no_candidates() {
        let helper = CliHelper::new();
        assert!(helper.candidates("hello /mode").1.is_empty());
        assert!(helper.candidates("/speak hello there").1.is_empty());
    }
}
