//! Encyclopedia collaborator trait and an in-memory implementation.

use async_trait::async_trait;

use crate::error::LookupError;

/// Source of short topic summaries.
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Summarize `topic` in a few sentences.
    async fn summary(&self, topic: &str) -> Result<String, LookupError>;
}

/// Keep the first `n` sentences of `text`.
///
/// A sentence ends at `.`, `!`, `?` or the Bengali danda `।` when followed
/// by whitespace or the end of the text. Returns the whole text trimmed if
/// it has `n` sentences or fewer.
pub fn first_sentences(text: &str, n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    let mut count = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?' | '।') {
            let at_boundary = match chars.peek() {
                Some((_, next)) => next.is_whitespace(),
                None => true,
            };
            if at_boundary {
                count += 1;
                if count == n {
                    return text[..idx + c.len_utf8()].trim().to_string();
                }
            }
        }
    }
    text.trim().to_string()
}

/// Encyclopedia backed by a fixed list of entries.
///
/// Topics match case-insensitively. An entry with several pages models a
/// disambiguation. Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEncyclopedia {
    entries: Vec<(String, StaticPage)>,
}

#[derive(Debug, Clone)]
enum StaticPage {
    Summary(String),
    Ambiguous(Vec<String>),
    Unavailable,
}

impl StaticEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self, topic: &str, summary: &str) -> Self {
        self.entries
            .push((topic.to_lowercase(), StaticPage::Summary(summary.to_string())));
        self
    }

    pub fn with_ambiguous(mut self, topic: &str, options: &[&str]) -> Self {
        self.entries.push((
            topic.to_lowercase(),
            StaticPage::Ambiguous(options.iter().map(|s| s.to_string()).collect()),
        ));
        self
    }

    /// Make lookups for `topic` fail as if the service were down.
    pub fn with_outage(mut self, topic: &str) -> Self {
        self.entries
            .push((topic.to_lowercase(), StaticPage::Unavailable));
        self
    }
}

#[async_trait]
impl Encyclopedia for StaticEncyclopedia {
    async fn summary(&self, topic: &str) -> Result<String, LookupError> {
        let key = topic.trim().to_lowercase();
        match self.entries.iter().find(|(t, _)| *t == key) {
            Some((_, StaticPage::Summary(s))) => Ok(s.clone()),
            Some((_, StaticPage::Ambiguous(options))) => {
                Err(LookupError::Ambiguous(options.clone()))
            }
            Some((_, StaticPage::Unavailable)) => {
                Err(LookupError::Service("encyclopedia offline".to_string()))
            }
            None => Err(LookupError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentences_two() {
        let text = "Rust is a language. It is fast. It is safe.";
        assert_eq!(first_sentences(text, 2), "Rust is a language. It is fast.");
    }

    #[test]
    fn test_first_sentences_fewer_than_n() {
        assert_eq!(first_sentences("  Only one.  ", 2), "Only one.");
        assert_eq!(first_sentences("No terminator", 2), "No terminator");
    }

    #[test]
    fn test_first_sentences_ignores_inner_dots() {
        let text = "Version 1.5 shipped in 2020. Next sentence. Third.";
        assert_eq!(
            first_sentences(text, 2),
            "Version 1.5 shipped in 2020. Next sentence."
        );
    }

    #[test]
    fn test_first_sentences_bengali_danda() {
        let text = "ঢাকা বাংলাদেশের রাজধানী। এটি একটি বড় শহর। তৃতীয় বাক্য।";
        assert_eq!(
            first_sentences(text, 2),
            "ঢাকা বাংলাদেশের রাজধানী। এটি একটি বড় শহর।"
        );
    }

    #[test]
    fn test_first_sentences_zero() {
        assert_eq!(first_sentences("Anything.", 0), "");
    }

    #[tokio::test]
    async fn test_static_encyclopedia() {
        let enc = StaticEncyclopedia::new()
            .with_summary("Dhaka", "Dhaka is the capital of Bangladesh.")
            .with_ambiguous("mercury", &["Mercury (planet)", "Mercury (element)"])
            .with_outage("atlantis");

        assert_eq!(
            enc.summary("  DHAKA ").await.unwrap(),
            "Dhaka is the capital of Bangladesh."
        );
        assert_eq!(
            enc.summary("Mercury").await.unwrap_err(),
            LookupError::Ambiguous(vec!["Mercury (planet)".into(), "Mercury (element)".into()])
        );
        assert!(matches!(
            enc.summary("atlantis").await,
            Err(LookupError::Service(_))
        ));
        assert_eq!(enc.summary("mars").await.unwrap_err(), LookupError::NotFound);
    }
}
