use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::app::App;

impl App {
    /// Read commands line by line until end of input.
    ///
    /// Each line is split on whitespace and interpreted as one argument
    /// list; the rendered note is written after every line.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run_repl<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for (line_no, line) in input.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
            let args: Vec<&str> = line.split_whitespace().collect();
            if args.is_empty() {
                continue;
            }
            self.run_args(&args);
            writeln!(output, "{}", self.render()).context("Failed to write note")?;
            output.flush().context("Failed to flush output")?;
        }
        Ok(())
    }
}
