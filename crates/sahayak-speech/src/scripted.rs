//! In-memory collaborators for scripted runs and tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{SpeechError, SpeechInput, SpeechOutput};

/// Replays a fixed list of utterances, then reports the input as closed.
///
/// Items are `Result`s so tests can inject recognition failures.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Result<String, ScriptedFailure>>,
}

/// A recognition failure queued in a [`ScriptedInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFailure {
    NotUnderstood,
    ServiceUnavailable,
}

impl ScriptedInput {
    /// Build from plain lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: lines.into_iter().map(|l| Ok(l.into())).collect(),
        }
    }

    /// Parse a script: one utterance per line, blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_script(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    /// Append a recognition failure.
    pub fn push_failure(mut self, failure: ScriptedFailure) -> Self {
        self.queue.push_back(Err(failure));
        self
    }

    /// Append an utterance.
    pub fn push(mut self, line: impl Into<String>) -> Self {
        self.queue.push_back(Ok(line.into()));
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[async_trait]
impl SpeechInput for ScriptedInput {
    async fn listen(&mut self) -> Result<String, SpeechError> {
        match self.queue.pop_front() {
            Some(Ok(line)) => Ok(line),
            Some(Err(ScriptedFailure::NotUnderstood)) => Err(SpeechError::NotUnderstood),
            Some(Err(ScriptedFailure::ServiceUnavailable)) => Err(
                SpeechError::ServiceUnavailable("scripted outage".to_string()),
            ),
            None => Err(SpeechError::Closed),
        }
    }
}

/// Collects every response so callers can inspect them afterwards.
///
/// Clones share the same buffer, so one clone can be handed to a session
/// while another is kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    lines: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// An output whose every `say` fails after recording the line.
    pub fn failing() -> Self {
        Self {
            lines: Arc::default(),
            fail: true,
        }
    }

    /// Snapshot of everything said so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechOutput for RecordingOutput {
    async fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        self.lines
            .lock()
            .map_err(|e| SpeechError::ServiceUnavailable(format!("output lock poisoned: {}", e)))?
            .push(text.to_string());
        if self.fail {
            return Err(SpeechError::ServiceUnavailable("speaker offline".to_string()));
        }
        Ok(())
    }
}
