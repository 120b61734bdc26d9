//! Delegation planning: turning an utterance into a collaborator request.

use sahayak_core::types::{Intent, Locale, Utterance};

use crate::classifier::cue_phrases;

/// A request for an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegation {
    /// Fetch an encyclopedia summary.
    Lookup(String),
    /// Play a song or video.
    Play(String),
    /// Run a web search.
    Search(String),
}

impl Delegation {
    /// The delegation an intent calls for, or `None` if it needs none.
    pub fn for_intent(intent: Intent, topic: impl Into<String>) -> Option<Self> {
        let topic = topic.into();
        match intent {
            Intent::GetWikiInfo => Some(Delegation::Lookup(topic)),
            Intent::PlaySong => Some(Delegation::Play(topic)),
            Intent::SearchWeb => Some(Delegation::Search(topic)),
            _ => None,
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            Delegation::Lookup(_) => Intent::GetWikiInfo,
            Delegation::Play(_) => Intent::PlaySong,
            Delegation::Search(_) => Intent::SearchWeb,
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            Delegation::Lookup(t) | Delegation::Play(t) | Delegation::Search(t) => t,
        }
    }

    /// Same request with a different topic.
    pub fn with_topic(self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        match self {
            Delegation::Lookup(_) => Delegation::Lookup(topic),
            Delegation::Play(_) => Delegation::Play(topic),
            Delegation::Search(_) => Delegation::Search(topic),
        }
    }

    /// True when the user still has to say what the request is about.
    pub fn needs_topic(&self) -> bool {
        self.topic().trim().is_empty()
    }
}

const ENGLISH_FILLERS: &[&str] = &[
    "a", "about", "an", "for", "me", "on", "please", "song", "some", "up", "youtube",
];

const BENGALI_FILLERS: &[&str] = &[
    "আমাকে", "একটা", "একটি", "কি", "কী", "করো", "জানাও", "দাও", "বলো", "বলুন", "থেকে",
];

/// Endings that turn a cue word into an inflected form of the same cue.
const ENGLISH_CUE_SUFFIXES: &[&str] = &["s", "ing", "ed"];

const BENGALI_CUE_SUFFIXES: &[&str] = &["ে", "টি", "টা", "তে", "য়"];

fn fillers(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => ENGLISH_FILLERS,
        Locale::Bn => BENGALI_FILLERS,
    }
}

fn cue_suffixes(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => ENGLISH_CUE_SUFFIXES,
        Locale::Bn => BENGALI_CUE_SUFFIXES,
    }
}

/// True when `token` is `cue` itself or `cue` plus one known ending.
fn is_cue_form(locale: Locale, token: &str, cue: &str) -> bool {
    match token.strip_prefix(cue) {
        Some("") => true,
        Some(rest) => cue_suffixes(locale).contains(&rest),
        None => false,
    }
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation() || c == '।')
}

/// Clean free text into a topic: lowercase, punctuation trimmed.
pub fn clean_topic(text: &str) -> String {
    text.split_whitespace()
        .map(trim_token)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// What the utterance is about once the intent's cue words are removed.
///
/// Multi-word cues are removed as phrases. Single-word cues are dropped as
/// whole tokens, along with their inflected forms such as "গুগলে".
/// Filler words are then trimmed from both ends.
pub fn extract_topic(locale: Locale, intent: Intent, utterance: &Utterance) -> String {
    let mut text = utterance.normalized();

    let mut cues = cue_phrases(locale, intent);
    cues.sort_by_key(|c| std::cmp::Reverse(c.chars().count()));
    let (phrases, words): (Vec<&str>, Vec<&str>) =
        cues.into_iter().partition(|c| c.contains(' '));

    for phrase in phrases {
        text = text.replace(phrase, " ");
    }

    let tokens: Vec<&str> = text
        .split_whitespace()
        .map(trim_token)
        .filter(|t| !t.is_empty())
        .filter(|t| !words.iter().any(|w| is_cue_form(locale, t, w)))
        .collect();

    let fillers = fillers(locale);
    let start = tokens
        .iter()
        .position(|t| !fillers.contains(t))
        .unwrap_or(tokens.len());
    let end = tokens
        .iter()
        .rposition(|t| !fillers.contains(t))
        .map_or(start, |i| i + 1);

    tokens[start..end.max(start)].join(" ")
}

/// The collaborator request for `intent`, if it needs one.
pub fn plan(locale: Locale, intent: Intent, utterance: &Utterance) -> Option<Delegation> {
    if !intent.is_delegated() {
        return None;
    }
    Delegation::for_intent(intent, extract_topic(locale, intent, utterance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(locale: Locale, intent: Intent, text: &str) -> String {
        extract_topic(locale, intent, &Utterance::new(text))
    }

    #[test]
    fn test_english_topics() {
        assert_eq!(topic(Locale::En, Intent::PlaySong, "Play Shape of You"), "shape of you");
        assert_eq!(
            topic(Locale::En, Intent::PlaySong, "play despacito on youtube"),
            "despacito"
        );
        assert_eq!(
            topic(Locale::En, Intent::SearchWeb, "search for rust async"),
            "rust async"
        );
        assert_eq!(
            topic(Locale::En, Intent::SearchWeb, "google the weather please"),
            "the weather"
        );
        assert_eq!(
            topic(Locale::En, Intent::GetWikiInfo, "tell me about Albert Einstein."),
            "albert einstein"
        );
        assert_eq!(
            topic(Locale::En, Intent::GetWikiInfo, "what is a black hole?"),
            "black hole"
        );
    }

    #[test]
    fn test_empty_topics() {
        assert_eq!(topic(Locale::En, Intent::PlaySong, "play"), "");
        assert_eq!(topic(Locale::En, Intent::PlaySong, "play a song"), "");
        assert_eq!(topic(Locale::En, Intent::SearchWeb, "search"), "");
        assert_eq!(topic(Locale::En, Intent::GetWikiInfo, "tell me about"), "");
    }

    #[test]
    fn test_bengali_topics() {
        assert_eq!(
            topic(Locale::Bn, Intent::PlaySong, "আমার সোনার বাংলা গান চালাও"),
            "আমার সোনার বাংলা"
        );
        assert_eq!(
            topic(Locale::Bn, Intent::GetWikiInfo, "ঢাকা সম্পর্কে বলো"),
            "ঢাকা"
        );
        assert_eq!(topic(Locale::Bn, Intent::SearchWeb, "গুগলে খোঁজো"), "");
        assert_eq!(topic(Locale::Bn, Intent::PlaySong, "একটা গান চালাও"), "");
        assert_eq!(
            topic(Locale::Bn, Intent::PlaySong, "আমার সোনার বাংলা গানটি চালাও"),
            "আমার সোনার বাংলা"
        );
    }

    #[test]
    fn test_cue_prefixed_words_survive() {
        assert_eq!(
            topic(Locale::En, Intent::PlaySong, "play playboi carti"),
            "playboi carti"
        );
        assert_eq!(
            topic(Locale::En, Intent::PlaySong, "play the playlist"),
            "the playlist"
        );
        assert_eq!(
            topic(Locale::En, Intent::SearchWeb, "searching for googled answers"),
            "googled answers"
        );
        assert_eq!(topic(Locale::En, Intent::PlaySong, "playing thunderstruck"), "thunderstruck");
    }

    #[test]
    fn test_plan() {
        let d = plan(Locale::En, Intent::PlaySong, &"play hey jude".into()).unwrap();
        assert_eq!(d, Delegation::Play("hey jude".into()));
        assert_eq!(d.intent(), Intent::PlaySong);
        assert!(!d.needs_topic());

        assert!(plan(Locale::En, Intent::GetTime, &"time".into()).is_none());
        assert!(plan(Locale::En, Intent::SearchWeb, &"search".into())
            .unwrap()
            .needs_topic());
    }

    #[test]
    fn test_with_topic_keeps_kind() {
        let d = Delegation::Lookup(String::new()).with_topic("dhaka");
        assert_eq!(d, Delegation::Lookup("dhaka".into()));
        assert_eq!(d.topic(), "dhaka");
    }

    #[test]
    fn test_for_intent_only_delegated() {
        for intent in Intent::ALL {
            assert_eq!(
                Delegation::for_intent(intent, "x").is_some(),
                intent.is_delegated()
            );
        }
    }

    #[test]
    fn test_clean_topic() {
        assert_eq!(clean_topic("  The Beatles! "), "the beatles");
        assert_eq!(clean_topic("ঢাকা।"), "ঢাকা");
        assert_eq!(clean_topic("?!"), "");
    }
}
