//! Line-oriented terminal questions.
//!
//! The wizard talks to the user only through [`Prompter`], so a run can be
//! driven from any reader/writer pair. [`TerminalPrompter::stdio`] is the
//! interactive one; tests feed it a `Cursor` of scripted answers.

use std::io::{self, BufRead, Write};

use crate::error::PrError;

const OTHER_LABEL: &str = "Other (enter text)";

/// Answer to a single-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Index into the offered options.
    Index(usize),
    /// Free text typed instead of picking an option.
    Other(String),
}

pub trait Prompter {
    /// Ask for free text. With `required`, blank answers are rejected and
    /// the question is asked again.
    fn text(&mut self, question: &str, required: bool) -> Result<String, PrError>;

    /// Ask the user to pick one of `options`. With `allow_other`, an extra
    /// entry lets them type their own answer.
    fn select(&mut self, question: &str, options: &[&str], allow_other: bool)
    -> Result<Choice, PrError>;

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PrError>;

    /// Show `message` and wait for Enter.
    fn pause(&mut self, message: &str) -> Result<(), PrError>;

    /// Print an informational line.
    fn say(&mut self, message: &str) -> Result<(), PrError>;
}

pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter and return its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str, line: &str) -> Result<String, PrError> {
        write!(self.output, "{line}").map_err(|e| io_err(question, e))?;
        self.output.flush().map_err(|e| io_err(question, e))?;

        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .map_err(|e| io_err(question, e))?;
        if read == 0 {
            return Err(PrError::InputClosed {
                question: question.to_owned(),
            });
        }
        Ok(input.trim_end_matches(['\r', '\n']).to_owned())
    }

    fn println(&mut self, question: &str, line: &str) -> Result<(), PrError> {
        writeln!(self.output, "{line}").map_err(|e| io_err(question, e))
    }
}

fn io_err(question: &str, e: io::Error) -> PrError {
    PrError::InputClosed {
        question: format!("{question} ({e})"),
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn text(&mut self, question: &str, required: bool) -> Result<String, PrError> {
        loop {
            let answer = self.ask(question, &format!("? {question}: "))?;
            if !required || !answer.trim().is_empty() {
                return Ok(answer);
            }
            self.println(question, "  Field cannot be blank.")?;
        }
    }

    fn select(
        &mut self,
        question: &str,
        options: &[&str],
        allow_other: bool,
    ) -> Result<Choice, PrError> {
        self.println(question, &format!("? {question}"))?;
        for (i, option) in options.iter().enumerate() {
            self.println(question, &format!("  {}. {option}", i + 1))?;
        }
        let count = if allow_other {
            self.println(question, &format!("  {}. {OTHER_LABEL}", options.len() + 1))?;
            options.len() + 1
        } else {
            options.len()
        };

        loop {
            let answer = self.ask(question, &format!("Enter choice [1-{count}]: "))?;
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Choice::Index(n - 1)),
                Ok(n) if allow_other && n == count => {
                    let text = self.text(question, true)?;
                    return Ok(Choice::Other(text));
                }
                _ => {
                    self.println(
                        question,
                        &format!("  Please enter a number between 1 and {count}"),
                    )?;
                }
            }
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool, PrError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(question, &format!("? {question} {hint} "))?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.println(question, "  Please answer y or n.")?,
            }
        }
    }

    fn pause(&mut self, message: &str) -> Result<(), PrError> {
        self.ask(message, &format!("{message} "))?;
        Ok(())
    }

    fn say(&mut self, message: &str) -> Result<(), PrError> {
        self.println(message, message)
    }
}
