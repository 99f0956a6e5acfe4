//! Line-prompt capability.
//!
//! The editing dialogs consume the terminal through the [`Prompter`] trait so
//! they can be driven by scripted input in tests. The helpers in this module
//! implement the shared validation policy: blank input cancels optional
//! operations (never index 0), bad yes/no or index input re-prompts, and
//! validation never mutates anything.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// A line-oriented prompt source.
pub trait Prompter {
    /// Display `message` and read one line of input, trimmed.
    fn read_line(&mut self, message: &str) -> io::Result<String>;

    /// Display informational text (suggestion lists, menus, errors).
    fn show(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Prompter backed by stdin/stdout.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompter for StdinPrompt {
    fn read_line(&mut self, message: &str) -> io::Result<String> {
        print!("{message}");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Prompter that replays a fixed script of answers. Used in tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    /// Every message shown or prompted, for assertions.
    pub transcript: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Prompter for ScriptedPrompt {
    fn read_line(&mut self, message: &str) -> io::Result<String> {
        self.transcript.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("script exhausted at prompt: {message}"),
            )),
        }
    }

    fn show(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}

// =============================================================================
// Policy helpers
// =============================================================================

/// Read a line; blank input becomes `None`.
pub fn optional(prompt: &mut impl Prompter, message: &str) -> io::Result<Option<String>> {
    let answer = prompt.read_line(message)?;
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer))
    }
}

/// Read a line, substituting `default` for blank input.
pub fn with_default(
    prompt: &mut impl Prompter,
    message: &str,
    default: &str,
) -> io::Result<String> {
    let answer = prompt.read_line(message)?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Yes/no question. Blank input takes the default; anything not starting
/// with y/n (case-insensitive) re-prompts.
pub fn confirm(prompt: &mut impl Prompter, message: &str, default_yes: bool) -> io::Result<bool> {
    let suffix = if default_yes { "[Y/n] " } else { "[y/N] " };
    loop {
        let answer = prompt.read_line(&format!("{message} {suffix}"))?;
        if answer.is_empty() {
            return Ok(default_yes);
        }
        match answer.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => prompt.show("Please answer yes or no."),
        }
    }
}

/// Prompt for an index in `[0, max]`.
///
/// Blank input returns `None` when `allow_blank` is set (cancel), otherwise
/// re-prompts. Non-numeric or out-of-range input re-prompts; nothing is ever
/// coerced to index 0.
pub fn index(
    prompt: &mut impl Prompter,
    message: &str,
    max: usize,
    allow_blank: bool,
) -> io::Result<Option<usize>> {
    loop {
        let answer = prompt.read_line(message)?;
        if answer.is_empty() {
            if allow_blank {
                return Ok(None);
            }
            prompt.show("An index is required.");
            continue;
        }
        match answer.parse::<usize>() {
            Ok(value) if value <= max => return Ok(Some(value)),
            Ok(_) => prompt.show(&format!("Index out of range (0-{max}).")),
            Err(_) => prompt.show("Please enter a number."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_blank_is_none() {
        let mut prompt = ScriptedPrompt::new(["", "alto"]);
        assert_eq!(optional(&mut prompt, "Clef: ").unwrap(), None);
        assert_eq!(optional(&mut prompt, "Clef: ").unwrap(), Some("alto".into()));
    }

    #[test]
    fn test_with_default() {
        let mut prompt = ScriptedPrompt::new(["", "B. Bartok"]);
        assert_eq!(with_default(&mut prompt, "Short name: ", "J.S. Bach").unwrap(), "J.S. Bach");
        assert_eq!(with_default(&mut prompt, "Short name: ", "J.S. Bach").unwrap(), "B. Bartok");
    }

    #[test]
    fn test_confirm_defaults_and_retry() {
        let mut prompt = ScriptedPrompt::new(["", "maybe", "n", "Yes"]);
        assert!(confirm(&mut prompt, "Save?", true).unwrap());
        // "maybe" re-prompts, "n" answers.
        assert!(!confirm(&mut prompt, "Save?", true).unwrap());
        assert!(confirm(&mut prompt, "Save?", false).unwrap());
    }

    #[test]
    fn test_index_blank_cancels_when_optional() {
        let mut prompt = ScriptedPrompt::new([""]);
        assert_eq!(index(&mut prompt, "> ", 4, true).unwrap(), None);
    }

    #[test]
    fn test_index_rejects_bad_input() {
        let mut prompt = ScriptedPrompt::new(["x", "9", "2"]);
        assert_eq!(index(&mut prompt, "> ", 4, true).unwrap(), Some(2));
        assert!(prompt.transcript.iter().any(|t| t.contains("number")));
        assert!(prompt.transcript.iter().any(|t| t.contains("out of range")));
    }

    #[test]
    fn test_index_blank_reprompts_when_required() {
        let mut prompt = ScriptedPrompt::new(["", "0"]);
        assert_eq!(index(&mut prompt, "> ", 4, false).unwrap(), Some(0));
    }
}
