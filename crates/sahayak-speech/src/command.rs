//! External speech-to-text and text-to-speech programs.
//!
//! The assistant does not embed a recognizer or a synthesizer. Instead it
//! runs whatever programs the user configured: a transcriber that records a
//! phrase and prints its transcript, and a speaker that reads text on stdin.
//! Each child is spawned with `kill_on_drop` so the microphone or audio
//! device is released on every exit path, including cancellation.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{SpeechError, SpeechInput, SpeechOutput};

fn build_command(argv: &[String]) -> Result<Command, SpeechError> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        SpeechError::ServiceUnavailable("no command configured".to_string())
    })?;
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);
    Ok(cmd)
}

// =============================================================================
// Transcriber
// =============================================================================

/// Runs a speech-to-text program once per utterance.
///
/// The program's trimmed stdout is the transcript. An empty transcript or a
/// timeout counts as "not understood"; a spawn failure or non-zero exit
/// means the service is unavailable.
pub struct CommandTranscriber {
    argv: Vec<String>,
    timeout: Duration,
}

impl CommandTranscriber {
    pub fn new(argv: Vec<String>, timeout: Duration) -> Self {
        Self { argv, timeout }
    }
}

#[async_trait]
impl SpeechInput for CommandTranscriber {
    async fn listen(&mut self) -> Result<String, SpeechError> {
        let mut cmd = build_command(&self.argv)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .map_err(|e| SpeechError::ServiceUnavailable(format!("{}: {}", self.argv[0], e)))?;

        tracing::debug!(program = %self.argv[0], "Listening");

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::debug!(timeout_secs = self.timeout.as_secs(), "Transcriber timed out");
                return Err(SpeechError::NotUnderstood);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SpeechError::ServiceUnavailable(if stderr.is_empty() {
                format!("transcriber exited with {}", output.status)
            } else {
                stderr
            }));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(SpeechError::NotUnderstood);
        }
        Ok(transcript)
    }
}

// =============================================================================
// Speaker
// =============================================================================

/// Prints each response, then pipes it to a text-to-speech program.
pub struct CommandSpeaker {
    argv: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

#[async_trait]
impl SpeechOutput for CommandSpeaker {
    async fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        println!("{}", text);

        let mut cmd = build_command(&self.argv)?;
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = cmd
            .spawn()
            .map_err(|e| SpeechError::ServiceUnavailable(format!("{}: {}", self.argv[0], e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // The speaker may exit before reading all of its input.
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                tracing::debug!(error = %e, "Speaker closed stdin early");
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(SpeechError::ServiceUnavailable(format!(
                "speaker exited with {}",
                status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_transcriber_empty_command() {
        let mut t = CommandTranscriber::new(vec![], Duration::from_secs(1));
        assert!(matches!(
            t.listen().await,
            Err(SpeechError::ServiceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_transcriber_missing_program() {
        let mut t = CommandTranscriber::new(
            argv(&["sahayak-no-such-transcriber"]),
            Duration::from_secs(1),
        );
        assert!(matches!(
            t.listen().await,
            Err(SpeechError::ServiceUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcriber_reads_stdout() {
        let mut t = CommandTranscriber::new(
            argv(&["sh", "-c", "echo '  what time is it  '"]),
            Duration::from_secs(5),
        );
        assert_eq!(t.listen().await.unwrap(), "what time is it");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcriber_empty_output_not_understood() {
        let mut t = CommandTranscriber::new(argv(&["true"]), Duration::from_secs(5));
        assert!(matches!(t.listen().await, Err(SpeechError::NotUnderstood)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcriber_failure_is_unavailable() {
        let mut t = CommandTranscriber::new(
            argv(&["sh", "-c", "echo 'no microphone' >&2; exit 3"]),
            Duration::from_secs(5),
        );
        match t.listen().await {
            Err(SpeechError::ServiceUnavailable(msg)) => assert_eq!(msg, "no microphone"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcriber_timeout_not_understood() {
        let mut t = CommandTranscriber::new(argv(&["sleep", "5"]), Duration::from_millis(100));
        assert!(matches!(t.listen().await, Err(SpeechError::NotUnderstood)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_speaker_pipes_text() {
        let mut s = CommandSpeaker::new(argv(&["cat"]));
        assert!(s.say("hello").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_speaker_failure() {
        let mut s = CommandSpeaker::new(argv(&["false"]));
        assert!(matches!(
            s.say("hello").await,
            Err(SpeechError::ServiceUnavailable(_))
        ));
    }
}
