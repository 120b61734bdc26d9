//! Response generation.
//!
//! Turns an intent, the utterance that produced it and the fact store into
//! the line the assistant says. Never fails: a missing fact is answered with
//! the locale's "don't know" phrasing.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use sahayak_core::error::AssistError;
use sahayak_core::types::{FactCategory, Intent, Locale, Utterance};

use crate::delegate::{extract_topic, Delegation};
use crate::facts::{FactStore, CREATOR_KEY, NAME_KEY, STATUS_KEY};
use crate::locale::{fill, phrases, Phrases};

/// Source of the current local time.
pub type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

// =============================================================================
// ResponseGenerator
// =============================================================================

/// Produces response text for one locale.
pub struct ResponseGenerator {
    locale: Locale,
    phrases: &'static Phrases,
    rng: StdRng,
    clock: Clock,
}

impl std::fmt::Debug for ResponseGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGenerator")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl ResponseGenerator {
    /// Generator seeded from the OS, reading the system clock.
    pub fn new(locale: Locale) -> Self {
        Self::with_rng(locale, StdRng::from_os_rng())
    }

    /// Generator with a fixed seed, for reproducible choices.
    pub fn with_seed(locale: Locale, seed: u64) -> Self {
        Self::with_rng(locale, StdRng::seed_from_u64(seed))
    }

    fn with_rng(locale: Locale, rng: StdRng) -> Self {
        Self {
            locale,
            phrases: phrases(locale),
            rng,
            clock: Box::new(Local::now),
        }
    }

    /// Replace the time source.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn phrases(&self) -> &'static Phrases {
        self.phrases
    }

    fn pick(&mut self, options: &'static [&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// Response for `intent`.
    pub fn respond(&mut self, intent: Intent, utterance: &Utterance, facts: &FactStore) -> String {
        let p = self.phrases;
        match intent {
            Intent::Greet => {
                let template = self.pick(p.greetings);
                fill(
                    template,
                    &[
                        ("name", general(facts, NAME_KEY)),
                        ("status", general(facts, STATUS_KEY)),
                    ],
                )
            }
            Intent::StateName => fill(p.state_name, &[("name", general(facts, NAME_KEY))]),
            Intent::AnswerFact => match facts.lookup(FactCategory::Fact, utterance) {
                Some(entry) => fill(
                    p.fact_answer,
                    &[("topic", entry.topic.as_str()), ("answer", entry.answer.as_str())],
                ),
                None => p.unknown_fact.to_string(),
            },
            Intent::AnswerMath => match facts.lookup(FactCategory::Math, utterance) {
                Some(entry) => fill(
                    p.math_answer,
                    &[("topic", entry.topic.as_str()), ("answer", entry.answer.as_str())],
                ),
                None => p.unknown_math.to_string(),
            },
            Intent::AcknowledgeThanks => p.thanks.to_string(),
            Intent::ContinueConversation => self.pick(p.continue_prompts).to_string(),
            Intent::GetTime => {
                let prefix = self.pick(p.time_prefixes);
                format!("{}{}", prefix, (self.clock)().format("%I:%M %p"))
            }
            Intent::PlaySong | Intent::SearchWeb | Intent::GetWikiInfo => {
                let topic = extract_topic(self.locale, intent, utterance);
                match Delegation::for_intent(intent, topic) {
                    Some(delegation) => self.announce(&delegation),
                    None => p.clarify.to_string(),
                }
            }
            Intent::Exit => p.farewell.to_string(),
            Intent::Unknown => p.clarify.to_string(),
        }
    }

    /// What to say before carrying out `delegation`, or the follow-up
    /// question when it has no topic yet.
    pub fn announce(&self, delegation: &Delegation) -> String {
        let p = self.phrases;
        let topic = delegation.topic().trim();
        let template = match (delegation, topic.is_empty()) {
            (Delegation::Lookup(_), true) => p.lookup_prompt,
            (Delegation::Play(_), true) => p.play_prompt,
            (Delegation::Search(_), true) => p.search_prompt,
            (Delegation::Lookup(_), false) => p.looking_up,
            (Delegation::Play(_), false) => p.playing,
            (Delegation::Search(_), false) => p.searching,
        };
        fill(template, &[("topic", topic)])
    }

    /// Apology for a recoverable turn error. At most `max_options`
    /// candidates are listed for an ambiguous topic.
    pub fn apology(&self, err: &AssistError, max_options: usize) -> String {
        let p = self.phrases;
        match err.clone().truncate_options(max_options) {
            AssistError::InputUnrecognized => p.not_understood.to_string(),
            AssistError::TopicNotFound => p.topic_not_found.to_string(),
            AssistError::TopicAmbiguous(options) if options.is_empty() => {
                p.topic_not_found.to_string()
            }
            AssistError::TopicAmbiguous(options) => {
                fill(p.topic_ambiguous, &[("options", options.join(", ").as_str())])
            }
            AssistError::ServiceUnavailable(_) => p.service_unavailable.to_string(),
            AssistError::Unclassifiable => p.clarify.to_string(),
        }
    }

    /// Opening line of a session, unless `custom` replaces it.
    pub fn intro(&self, facts: &FactStore, custom: Option<&str>) -> String {
        match custom {
            Some(line) => line.to_string(),
            None => fill(
                self.phrases.intro,
                &[
                    ("name", general(facts, NAME_KEY)),
                    ("creator", general(facts, CREATOR_KEY)),
                ],
            ),
        }
    }

    /// Extra prompt spoken after telling the time, for locales that use one.
    pub fn idle_prompt(&mut self) -> Option<String> {
        self.phrases
            .prompt_after_time
            .then(|| self.pick(self.phrases.continue_prompts).to_string())
    }

    pub fn wake_ack(&self) -> &'static str {
        self.phrases.wake_ack
    }
}

fn general<'a>(facts: &'a FactStore, key: &str) -> &'a str {
    facts.get(FactCategory::General, key).unwrap_or_default()
}
