use std::io::{self, BufRead, Write};

use services::{Console, ConsoleError};

/// Line-oriented console over a reader and a writer, normally stdin/stdout.
pub struct StdioConsole<R, W> {
    input: R,
    output: W,
}

impl StdioConsole<io::StdinLock<'static>, io::Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdioConsole<R, W> {
    fn prompt_line(&mut self, message: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(line)
    }

    fn display(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            tracing::warn!(error = %err, "failed to write to console");
        }
    }
}
