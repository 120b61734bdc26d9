//! Keyword intent classifier.
//!
//! Each locale has an ordered rule list. A rule fires when any of its cues
//! occurs in the lowercased utterance; the first rule to fire decides the
//! intent. Exit is always the first rule.

use std::sync::LazyLock;

use regex::Regex;

use sahayak_core::types::{Fallback, Intent, Locale, Utterance};

// =============================================================================
// Rule tables
// =============================================================================

/// One keyword cue.
#[derive(Debug, Clone, Copy)]
enum Cue {
    /// Matches anywhere, including inside a longer word.
    Sub(&'static str),
    /// Matches only as a whole token.
    Word(&'static str),
}

impl Cue {
    fn phrase(self) -> &'static str {
        match self {
            Cue::Sub(p) | Cue::Word(p) => p,
        }
    }
}

struct RuleSpec {
    intent: Intent,
    cues: &'static [Cue],
}

use Cue::{Sub, Word};

static ENGLISH_RULES: &[RuleSpec] = &[
    RuleSpec {
        intent: Intent::Exit,
        cues: &[Word("exit"), Word("quit"), Word("stop"), Sub("goodbye"), Word("bye")],
    },
    RuleSpec {
        intent: Intent::StateName,
        cues: &[Sub("your name"), Sub("who are you")],
    },
    RuleSpec {
        intent: Intent::AnswerFact,
        cues: &[Sub("capital"), Sub("currency"), Sub("population")],
    },
    RuleSpec {
        intent: Intent::AnswerMath,
        cues: &[Sub("+"), Word("add"), Sub("plus"), Sub("how much")],
    },
    RuleSpec {
        intent: Intent::Greet,
        cues: &[
            Sub("hello"),
            Word("hi"),
            Word("hey"),
            Sub("good morning"),
            Sub("how are you"),
        ],
    },
    RuleSpec {
        intent: Intent::AcknowledgeThanks,
        cues: &[Sub("thank")],
    },
    RuleSpec {
        intent: Intent::GetTime,
        cues: &[Word("time")],
    },
    RuleSpec {
        intent: Intent::GetWikiInfo,
        cues: &[Sub("tell me about"), Sub("what is"), Sub("who is"), Sub("wikipedia")],
    },
    RuleSpec {
        intent: Intent::PlaySong,
        cues: &[Word("play")],
    },
    RuleSpec {
        intent: Intent::SearchWeb,
        cues: &[Word("search"), Sub("google")],
    },
];

static BENGALI_RULES: &[RuleSpec] = &[
    RuleSpec {
        intent: Intent::Exit,
        cues: &[Sub("বিদায়"), Sub("বন্ধ করো"), Sub("প্রস্থান"), Word("exit")],
    },
    RuleSpec {
        intent: Intent::StateName,
        cues: &[Sub("নাম কি"), Sub("কে তুমি"), Sub("তোমার নাম")],
    },
    RuleSpec {
        intent: Intent::AnswerFact,
        cues: &[Sub("রাজধানী"), Sub("মুদ্রা"), Sub("জনসংখ্যা")],
    },
    RuleSpec {
        intent: Intent::AnswerMath,
        // "ও" also ends verb forms like "চালাও".
        cues: &[Sub("+"), Word("ও"), Sub("যোগ"), Sub("কতো")],
    },
    RuleSpec {
        intent: Intent::Greet,
        cues: &[Sub("হ্যালো"), Sub("হাই"), Sub("কেমন আছ")],
    },
    RuleSpec {
        intent: Intent::AcknowledgeThanks,
        cues: &[Sub("ধন্যবাদ")],
    },
    RuleSpec {
        intent: Intent::GetTime,
        cues: &[Sub("সময়"), Sub("কটা"), Word("বাজে")],
    },
    RuleSpec {
        intent: Intent::GetWikiInfo,
        cues: &[Sub("উইকিপিডিয়া"), Sub("সম্পর্কে")],
    },
    RuleSpec {
        intent: Intent::PlaySong,
        cues: &[Sub("গান"), Sub("চালাও")],
    },
    RuleSpec {
        intent: Intent::SearchWeb,
        cues: &[Sub("গুগল"), Sub("খোঁজো"), Sub("সার্চ")],
    },
];

fn rule_specs(locale: Locale) -> &'static [RuleSpec] {
    match locale {
        Locale::En => ENGLISH_RULES,
        Locale::Bn => BENGALI_RULES,
    }
}

/// Cue phrases that select `intent` in `locale`, in declaration order.
pub fn cue_phrases(locale: Locale, intent: Intent) -> Vec<&'static str> {
    rule_specs(locale)
        .iter()
        .filter(|r| r.intent == intent)
        .flat_map(|r| r.cues.iter().map(|c| c.phrase()))
        .collect()
}

// =============================================================================
// Compiled rules (compiled once, reused across calls)
// =============================================================================

struct Rule {
    intent: Intent,
    substrings: Vec<&'static str>,
    words: Option<Regex>,
}

impl Rule {
    fn compile(spec: &RuleSpec) -> Self {
        let mut substrings = Vec::new();
        let mut words = Vec::new();
        for cue in spec.cues {
            match *cue {
                Cue::Sub(p) => substrings.push(p),
                Cue::Word(p) => words.push(regex::escape(p)),
            }
        }
        let words = (!words.is_empty()).then(|| {
            Regex::new(&format!(r"\b(?:{})\b", words.join("|"))).expect("Invalid cue regex")
        });
        Self {
            intent: spec.intent,
            substrings,
            words,
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.substrings.iter().any(|p| text.contains(p))
            || self.words.as_ref().is_some_and(|re| re.is_match(text))
    }
}

static ENGLISH: LazyLock<Vec<Rule>> =
    LazyLock::new(|| ENGLISH_RULES.iter().map(Rule::compile).collect());

static BENGALI: LazyLock<Vec<Rule>> =
    LazyLock::new(|| BENGALI_RULES.iter().map(Rule::compile).collect());

// =============================================================================
// IntentClassifier
// =============================================================================

/// Maps an utterance to exactly one [`Intent`].
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier {
    locale: Locale,
    fallback: Fallback,
}

impl IntentClassifier {
    pub fn new(locale: Locale, fallback: Fallback) -> Self {
        Self { locale, fallback }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn rules(&self) -> &'static [Rule] {
        match self.locale {
            Locale::En => &ENGLISH,
            Locale::Bn => &BENGALI,
        }
    }

    /// Classify one utterance. Blank input is [`Intent::Unknown`]; input no
    /// rule matches gets the configured fallback.
    pub fn classify(&self, utterance: &Utterance) -> Intent {
        if utterance.is_blank() {
            return Intent::Unknown;
        }
        let text = utterance.normalized();
        self.rules()
            .iter()
            .find(|rule| rule.matches(&text))
            .map(|rule| rule.intent)
            .unwrap_or_else(|| self.fallback.intent())
    }
}
