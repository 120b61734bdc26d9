//! Wikipedia client - topic summaries over the REST API.
//!
//! Fetches `/api/rest_v1/page/summary/{title}`. A disambiguation page is
//! reported as [`LookupError::Ambiguous`] with candidate titles taken from
//! the `opensearch` API. A missing page gets one retry with the best
//! `opensearch` suggestion, which mirrors auto-suggest in the usual
//! Wikipedia client libraries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::encyclopedia::{first_sentences, Encyclopedia};
use crate::error::LookupError;

/// Summary payload returned by the REST endpoint.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
}

/// Outcome of parsing one summary response.
#[derive(Debug, PartialEq, Eq)]
enum SummaryOutcome {
    Found(String),
    Disambiguation(String),
    Missing,
}

/// HTTP-backed encyclopedia.
pub struct WikipediaClient {
    base_url: String,
    sentences: usize,
    max_options: usize,
    http: reqwest::Client,
}

impl WikipediaClient {
    /// Create a client for a wiki rooted at `base_url`
    /// (e.g. `https://en.wikipedia.org`).
    pub fn new(
        base_url: impl Into<String>,
        sentences: usize,
        max_options: usize,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sahayak/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            sentences,
            max_options,
            http,
        })
    }

    fn summary_url(&self, topic: &str) -> Result<Url, LookupError> {
        let title = page_title(topic);
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::Service(format!("bad base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Service("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "summary", title.as_str()]);
        Ok(url)
    }

    fn opensearch_url(&self, topic: &str, limit: usize) -> Result<Url, LookupError> {
        let base = format!("{}/w/api.php", self.base_url.trim_end_matches('/'));
        let limit = limit.to_string();
        Url::parse_with_params(
            &base,
            &[
                ("action", "opensearch"),
                ("search", topic.trim()),
                ("limit", limit.as_str()),
                ("namespace", "0"),
                ("format", "json"),
            ],
        )
        .map_err(|e| LookupError::Service(format!("bad base URL: {}", e)))
    }

    async fn fetch_summary(&self, topic: &str) -> Result<SummaryOutcome, LookupError> {
        let url = self.summary_url(topic)?;
        debug!(url = %url, "Fetching summary");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_summary(status, &body)
    }

    async fn search_titles(&self, topic: &str, limit: usize) -> Result<Vec<String>, LookupError> {
        let url = self.opensearch_url(topic, limit)?;
        debug!(url = %url, "Searching titles");
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LookupError::Service(format!(
                "search returned {}",
                response.status()
            )));
        }
        let body = response.text().await?;
        parse_opensearch(&body)
    }

    async fn disambiguation_options(&self, topic: &str, page: &str) -> Vec<String> {
        match self.search_titles(topic, self.max_options.saturating_add(2)).await {
            Ok(titles) => pick_options(titles, page, self.max_options),
            Err(e) => {
                debug!(error = %e, "Could not list disambiguation options");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn summary(&self, topic: &str) -> Result<String, LookupError> {
        if topic.trim().is_empty() {
            return Err(LookupError::NotFound);
        }

        let mut outcome = self.fetch_summary(topic).await?;

        if outcome == SummaryOutcome::Missing {
            let suggestion = self.search_titles(topic, 1).await?.into_iter().next();
            match retry_title(topic, suggestion) {
                Some(title) => {
                    debug!(topic = %topic, suggestion = %title, "Retrying with suggestion");
                    outcome = self.fetch_summary(&title).await?;
                }
                None => return Err(LookupError::NotFound),
            }
        }

        match outcome {
            SummaryOutcome::Found(extract) => Ok(first_sentences(&extract, self.sentences)),
            SummaryOutcome::Disambiguation(title) => Err(LookupError::Ambiguous(
                self.disambiguation_options(topic, &title).await,
            )),
            SummaryOutcome::Missing => Err(LookupError::NotFound),
        }
    }
}

// =============================================================================
// Title handling
// =============================================================================

/// Path form of a title as the REST API sees it. Case is significant.
fn page_title(topic: &str) -> String {
    topic.trim().replace(' ', "_")
}

/// The suggested title worth a second request, if it names another page
/// than the one already requested.
fn retry_title(requested: &str, suggestion: Option<String>) -> Option<String> {
    suggestion
        .filter(|title| !title.trim().is_empty() && page_title(title) != page_title(requested))
}

/// Candidate titles for a disambiguation page, without the page itself.
fn pick_options(titles: Vec<String>, page: &str, max: usize) -> Vec<String> {
    titles
        .into_iter()
        .filter(|t| t != page && !t.contains("(disambiguation)"))
        .take(max)
        .collect()
}

// =============================================================================
// Response parsing
// =============================================================================

fn parse_summary(status: StatusCode, body: &str) -> Result<SummaryOutcome, LookupError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(SummaryOutcome::Missing);
    }
    if !status.is_success() {
        return Err(LookupError::Service(format!("summary returned {}", status)));
    }
    let summary: SummaryResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Service(format!("malformed summary: {}", e)))?;
    if summary.kind == "disambiguation" {
        return Ok(SummaryOutcome::Disambiguation(summary.title));
    }
    if summary.extract.trim().is_empty() {
        return Ok(SummaryOutcome::Missing);
    }
    Ok(SummaryOutcome::Found(summary.extract))
}

/// `opensearch` answers `[query, [titles], [descriptions], [urls]]`.
fn parse_opensearch(body: &str) -> Result<Vec<String>, LookupError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LookupError::Service(format!("malformed search result: {}", e)))?;
    Ok(value
        .get(1)
        .and_then(|v| v.as_array())
        .map(|titles| {
            titles
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default())
}
