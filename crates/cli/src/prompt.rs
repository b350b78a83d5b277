//! Terminal implementation of the session prompt
//!
//! On a terminal, lines are read through `console` so basic line editing
//! works. When stdin is a pipe, lines are read directly from it, which lets
//! a session be scripted: `printf '1\n5\n' | bkt`.

use std::io::{BufRead, IsTerminal};

use bkt_core::{Error, Prompt, Result};
use console::{style, Term};

/// Prompt that reads from stdin and writes to the terminal
#[derive(Debug)]
pub struct TerminalPrompt {
    term: Term,
    interactive: bool,
}

impl TerminalPrompt {
    /// Create a prompt writing to stdout, or stderr when stdout carries JSON
    pub fn new(prompts_to_stderr: bool) -> Self {
        let term = if prompts_to_stderr {
            Term::stderr()
        } else {
            Term::stdout()
        };
        let interactive = term.is_term() && std::io::stdin().is_terminal();

        Self { term, interactive }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} {question} ", style("?").cyan()))
            .map_err(prompt_error)?;
        self.term.flush().map_err(prompt_error)?;

        if self.interactive {
            return self.term.read_line().map_err(prompt_error);
        }

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(prompt_error)?;
        if read == 0 {
            return Err(Error::Prompt("end of input".into()));
        }

        // Echo scripted answers so the transcript reads like a real session
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        self.term.write_line(&answer).map_err(prompt_error)?;
        Ok(answer)
    }
}

impl Prompt for TerminalPrompt {
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<usize> {
        loop {
            self.term
                .write_line(&style(prompt).bold().to_string())
                .map_err(prompt_error)?;
            for (i, option) in options.iter().enumerate() {
                self.term
                    .write_line(&format!("  {}) {option}", i + 1))
                    .map_err(prompt_error)?;
            }

            let answer = self.ask("Choice:")?;
            match parse_selection(&answer, options) {
                Some(index) => return Ok(index),
                None => {
                    tracing::debug!(answer = %answer, "unrecognised menu answer");
                    self.term
                        .write_line(&format!(
                            "{} Enter a number from 1 to {} or an option name.",
                            style("!").yellow(),
                            options.len()
                        ))
                        .map_err(prompt_error)?;
                }
            }
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }
}

fn prompt_error(e: std::io::Error) -> Error {
    Error::Prompt(e.to_string())
}

/// Interpret a menu answer
///
/// Accepts a 1-based number, an option name (case-insensitive), or an
/// unambiguous case-insensitive prefix of one.
pub fn parse_selection(answer: &str, options: &[String]) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }

    if let Ok(number) = answer.parse::<usize>() {
        return (1..=options.len()).contains(&number).then(|| number - 1);
    }

    let answer = answer.to_lowercase();
    if let Some(index) = options.iter().position(|o| o.to_lowercase() == answer) {
        return Some(index);
    }

    let mut candidates = options
        .iter()
        .enumerate()
        .filter(|(_, o)| o.to_lowercase().starts_with(&answer));
    match (candidates.next(), candidates.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}
