//! Line-oriented console used for the interactive dialogue.

use std::io::{BufRead, Write};

use crate::error::Result;

/// A prompt/answer console over any buffered reader and writer.
///
/// Prompts go to `output` on their own line; each answer is one line of
/// `input` with its line terminator removed.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap a reader and writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the output cannot be written.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print `prompt` and read the answer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] on a read/write failure or when input is
    /// exhausted before an answer arrives.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        self.say(prompt)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no more input",
            )
            .into());
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Give back the writer, e.g. to inspect a transcript in tests.
    pub fn into_output(self) -> W {
        self.output
    }
}
