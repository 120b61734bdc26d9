//! Wake-word gate for voice mode.

/// Accepts a transcript only if it mentions one of the wake words.
#[derive(Debug, Clone)]
pub struct WakeWordGate {
    words: Vec<String>,
}

impl WakeWordGate {
    /// Build a gate from the configured words. Returns `None` when the list
    /// has no usable word, meaning every transcript is accepted.
    pub fn new<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    /// Case-insensitive containment of any wake word.
    pub fn matches(&self, transcript: &str) -> bool {
        let lower = transcript.to_lowercase();
        self.words.iter().any(|w| lower.contains(w.as_str()))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
