//! The boundary between the quiz logic and whatever drives it.
//!
//! Services never touch stdin/stdout directly. The binary provides a
//! terminal implementation; tests use [`ScriptedConsole`].

use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConsoleError {
    /// Input ended (EOF, or a script ran out of lines).
    #[error("console input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait Console {
    /// Show `message` and read one line of input, without the line ending.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Closed` when no more input is available.
    fn prompt_line(&mut self, message: &str) -> Result<String, ConsoleError>;

    fn display(&mut self, message: &str);
}

/// Console fed from a fixed list of input lines that records everything
/// shown to it.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    #[must_use]
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Messages passed to `display`, in order.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Messages passed to `prompt_line`, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    #[must_use]
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// True if any displayed message contains `needle`.
    #[must_use]
    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn prompt_line(&mut self, message: &str) -> Result<String, ConsoleError> {
        self.prompts.push(message.to_owned());
        self.inputs.pop_front().ok_or(ConsoleError::Closed)
    }

    fn display(&mut self, message: &str) {
        self.output.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_replays_inputs_then_closes() {
        let mut console = ScriptedConsole::new(["1", "alice"]);
        assert_eq!(console.prompt_line("Select: ").unwrap(), "1");
        assert_eq!(console.prompt_line("Name: ").unwrap(), "alice");
        assert!(matches!(
            console.prompt_line("More: "),
            Err(ConsoleError::Closed)
        ));
        assert_eq!(console.prompts(), ["Select: ", "Name: ", "More: "]);
    }

    #[test]
    fn scripted_console_records_output() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        console.display("Hello");
        assert!(console.saw("Hell"));
        assert!(!console.saw("Bye"));
        assert_eq!(console.remaining_inputs(), 0);
    }
}
