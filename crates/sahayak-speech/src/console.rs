//! Terminal input and output.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

use crate::{SpeechError, SpeechInput, SpeechOutput};

/// Reads one typed line per turn from stdin.
pub struct ConsoleInput {
    prompt: String,
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl ConsoleInput {
    /// Create a console reader that prints `prompt` before each line.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            lines: BufReader::new(tokio::io::stdin()).lines(),
            stdout: tokio::io::stdout(),
        }
    }
}

#[async_trait]
impl SpeechInput for ConsoleInput {
    async fn listen(&mut self) -> Result<String, SpeechError> {
        if !self.prompt.is_empty() {
            self.stdout.write_all(self.prompt.as_bytes()).await?;
            self.stdout.flush().await?;
        }
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(SpeechError::Closed),
        }
    }
}

/// Prints each response on its own line, with an optional speaker label.
pub struct ConsoleOutput {
    label: Option<String>,
    stdout: Stdout,
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self {
            label: None,
            stdout: tokio::io::stdout(),
        }
    }

    /// Prefix every line with `label: `.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechOutput for ConsoleOutput {
    async fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        let line = match &self.label {
            Some(label) => format!("{}: {}\n", label, text),
            None => format!("{}\n", text),
        };
        self.stdout.write_all(line.as_bytes()).await?;
        self.stdout.flush().await?;
        Ok(())
    }
}
