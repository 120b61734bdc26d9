//! Web search and video playback launching.
//!
//! Opens URLs in the default browser with scheme validation. Only
//! `http://` and `https://` are allowed.

use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Url;
use tokio::process::Command;

use crate::error::LaunchError;

/// Search results page on YouTube for `query`.
pub fn youtube_search_url(query: &str) -> Result<Url, LaunchError> {
    Url::parse_with_params(
        "https://www.youtube.com/results",
        &[("search_query", query.trim())],
    )
    .map_err(|e| LaunchError::InvalidUrl(e.to_string()))
}

/// Web search results page for `query`.
pub fn web_search_url(query: &str) -> Result<Url, LaunchError> {
    Url::parse_with_params("https://www.google.com/search", &[("q", query.trim())])
        .map_err(|e| LaunchError::InvalidUrl(e.to_string()))
}

fn check_scheme(url: &Url) -> Result<(), LaunchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(LaunchError::UnsupportedScheme(other.to_string())),
    }
}

/// Something that can show a URL to the user.
#[async_trait]
pub trait WebLauncher: Send + Sync {
    async fn open(&self, url: &Url) -> Result<(), LaunchError>;
}

// =============================================================================
// BrowserLauncher
// =============================================================================

/// Opens URLs with the platform opener or a configured command.
pub struct BrowserLauncher {
    argv: Vec<String>,
}

impl BrowserLauncher {
    /// Use `argv` as the opener; the URL is appended as the last argument.
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// The platform's default URL opener.
    pub fn platform_default() -> Self {
        #[cfg(target_os = "windows")]
        let argv = ["cmd", "/C", "start", ""];
        #[cfg(target_os = "macos")]
        let argv = ["open"];
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        let argv = ["xdg-open"];
        Self::new(argv.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl WebLauncher for BrowserLauncher {
    async fn open(&self, url: &Url) -> Result<(), LaunchError> {
        check_scheme(url)?;

        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| LaunchError::Failed("no opener configured".to_string()))?;

        let status = Command::new(program)
            .args(args)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| LaunchError::Failed(format!("{}: {}", program, e)))?;

        if !status.success() {
            return Err(LaunchError::Failed(format!("{} exited with {}", program, status)));
        }

        tracing::info!(url = %url, "Opened URL");
        Ok(())
    }
}

// =============================================================================
// NullLauncher
// =============================================================================

/// Records URLs instead of opening them.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct NullLauncher {
    opened: Arc<Mutex<Vec<String>>>,
}

impl NullLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs passed to `open` so far.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl WebLauncher for NullLauncher {
    async fn open(&self, url: &Url) -> Result<(), LaunchError> {
        check_scheme(url)?;
        tracing::info!(url = %url, "Would open URL");
        self.opened
            .lock()
            .map_err(|e| LaunchError::Failed(format!("launcher lock poisoned: {}", e)))?
            .push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_search_url() {
        let url = youtube_search_url(" shape of you ").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/results?search_query=shape+of+you"
        );
    }

    #[test]
    fn test_web_search_url_escapes() {
        let url = web_search_url("rust & tokio").unwrap();
        assert_eq!(url.as_str(), "https://www.google.com/search?q=rust+%26+tokio");
    }

    #[test]
    fn test_web_search_url_bengali() {
        let url = web_search_url("ঢাকা").unwrap();
        let q: Vec<_> = url.query_pairs().collect();
        assert_eq!(q[0].1, "ঢাকা");
    }

    #[tokio::test]
    async fn test_null_launcher_records() {
        let launcher = NullLauncher::new();
        let handle = launcher.clone();
        handle
            .open(&web_search_url("weather").unwrap())
            .await
            .unwrap();
        assert_eq!(
            launcher.opened(),
            vec!["https://www.google.com/search?q=weather"]
        );
    }

    #[tokio::test]
    async fn test_rejects_file_scheme() {
        let launcher = NullLauncher::new();
        let url = Url::parse("file:///etc/passwd").unwrap();
        let err = launcher.open(&url).await.unwrap_err();
        assert!(matches!(err, LaunchError::UnsupportedScheme(s) if s == "file"));
        assert!(launcher.opened().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_javascript_scheme() {
        let launcher = BrowserLauncher::new(vec!["true".to_string()]);
        let url = Url::parse("javascript:alert(1)").unwrap();
        assert!(matches!(
            launcher.open(&url).await,
            Err(LaunchError::UnsupportedScheme(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_opener_fails() {
        let launcher = BrowserLauncher::new(vec![]);
        let url = web_search_url("x").unwrap();
        assert!(matches!(launcher.open(&url).await, Err(LaunchError::Failed(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_browser_launcher_runs_command() {
        let launcher = BrowserLauncher::new(vec!["true".to_string()]);
        assert!(launcher.open(&web_search_url("x").unwrap()).await.is_ok());

        let launcher = BrowserLauncher::new(vec!["false".to_string()]);
        assert!(matches!(
            launcher.open(&web_search_url("x").unwrap()).await,
            Err(LaunchError::Failed(_))
        ));
    }

    #[test]
    fn test_platform_default_not_empty() {
        assert!(!BrowserLauncher::platform_default().argv.is_empty());
    }
}
