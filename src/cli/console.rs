//! Line-based console input and output.
//!
//! Generic over the reader and writer so the interactive menu can be driven
//! from a script in tests.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::library::CandidateChooser;

/// Reads prompted lines and writes menu output.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Show `prompt` and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a non-negative number, asking again until the input parses.
    ///
    /// `None` at end of input.
    pub fn read_number(&mut self, prompt: &str) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => self.say("Please enter a number.")?,
            }
        }
    }

    /// Ask a yes/no question; anything but `y`/`yes` is no.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.read_line(prompt)?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn choose_from(&mut self, candidates: &[String]) -> io::Result<Option<usize>> {
        self.say("Select a song:")?;
        for (i, label) in candidates.iter().enumerate() {
            self.say(format_args!("{}. {}", i + 1, label))?;
        }

        let prompt = format!("Enter a number (1-{}), or leave blank to cancel: ", candidates.len());
        loop {
            let Some(line) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            if line.is_empty() {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(choice) if (1..=candidates.len()).contains(&choice) => return Ok(Some(choice)),
                _ => self.say("Invalid selection.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> CandidateChooser for ConsolePrompt<R, W> {
    fn choose(&mut self, candidates: &[String]) -> Option<usize> {
        match self.choose_from(candidates) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!(target: "cli", error = %e, "Console error while choosing a candidate");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompt: ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    #[test]
    fn test_read_line_trims_and_detects_eof() {
        let mut p = prompt("  hello world  \n");
        assert_eq!(p.read_line("> ").unwrap().as_deref(), Some("hello world"));
        assert_eq!(p.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_read_number_reprompts() {
        let mut p = prompt("abc\n-1\n7\n");
        assert_eq!(p.read_number("Choice: ").unwrap(), Some(7));

        let out = output(p);
        assert_eq!(out.matches("Please enter a number.").count(), 2);
        assert_eq!(out.matches("Choice: ").count(), 3);
    }

    #[test]
    fn test_confirm() {
        let mut p = prompt("Y\nno\n");
        assert!(p.confirm("? ").unwrap());
        assert!(!p.confirm("? ").unwrap());
        assert!(!p.confirm("? ").unwrap());
    }

    #[test]
    fn test_chooser_lists_candidates_and_validates() {
        let mut p = prompt("0\n5\n2\n");
        let candidates = vec!["A - One".to_string(), "B - Two".to_string()];

        assert_eq!(p.choose(&candidates), Some(2));

        let out = output(p);
        assert!(out.contains("1. A - One"));
        assert!(out.contains("2. B - Two"));
        assert_eq!(out.matches("Invalid selection.").count(), 2);
    }

    #[test]
    fn test_chooser_blank_or_eof_cancels() {
        let candidates = vec!["A - One".to_string()];
        assert_eq!(prompt("\n").choose(&candidates), None);
        assert_eq!(prompt("").choose(&candidates), None);
    }
}
