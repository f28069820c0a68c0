//! Interactive prompting.

use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub trait Prompt {
    /// Ask for a line of text. An empty answer yields `default` when given.
    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool>;
}

/// Prompts on stderr, reads answers from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl Prompt for StdinPrompt {
    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<String> {
        let mut stderr = io::stderr().lock();
        match default {
            Some(d) => write!(stderr, "? {} ({}) ", message, d)?,
            None => write!(stderr, "? {} ", message)?,
        }
        stderr.flush()?;
        drop(stderr);

        let answer = self.read_line()?;
        match (answer.is_empty(), default) {
            (true, Some(d)) => Ok(d.to_string()),
            _ => Ok(answer),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let mut stderr = io::stderr().lock();
            write!(stderr, "? {} ({}) ", message, hint)?;
            stderr.flush()?;
            drop(stderr);

            if let Some(answer) = parse_yes_no(&self.read_line()?, default) {
                return Ok(answer);
            }
        }
    }
}

/// Interpret a yes/no answer; `None` when unrecognised.
pub fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
