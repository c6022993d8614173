//! Terminal dialogue.
//!
//! Reads answers asynchronously so the top-level Ctrl-C handler stays
//! responsive while waiting for input.

use docgen_core::AppResult;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

const RULE_WIDTH: usize = 60;

/// Line-oriented prompts over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<BufReader<Stdin>, std::io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), std::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl AsRef<str>) -> AppResult<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print a titled section header.
    pub fn section(&mut self, title: &str) -> AppResult<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{}\n{}\n{}", rule, title, rule)?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed answer. End of input reads as empty.
    pub async fn ask(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_trims_and_handles_eof() {
        let mut console = Console::new("  gpt-4o  \n".as_bytes(), Vec::new());
        assert_eq!(console.ask("Model: ").await.unwrap(), "gpt-4o");
        assert_eq!(console.ask("Again: ").await.unwrap(), "");

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Model: Again: ");
    }

    #[test]
    fn test_section() {
        let mut console = Console::new("".as_bytes(), Vec::new());
        console.section("SUMMARY").unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("\nSUMMARY\n"));
        assert!(output.starts_with(&format!("\n{}", "=".repeat(60))));
    }
}
