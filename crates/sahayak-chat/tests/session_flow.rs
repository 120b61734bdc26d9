//! End-to-end conversations through the session loop.
//!
//! Each test scripts the user's side with `ScriptedInput`, records what the
//! assistant says with `RecordingOutput`, and replaces the network and the
//! browser with `StaticEncyclopedia` and `NullLauncher`.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};

use sahayak_chat::{
    phrases, Agent, Environment, ExitReason, FactStore, ResponseGenerator, Session,
};
use sahayak_core::types::{Fallback, Locale};
use sahayak_lookup::{NullLauncher, StaticEncyclopedia};
use sahayak_speech::{RecordingOutput, ScriptedFailure, ScriptedInput, WakeWordGate};

// =============================================================================
// Helpers
// =============================================================================

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
}

fn environment(locale: Locale, name: &str) -> Environment {
    let agent = Agent::new(name, locale, FactStore::builtin(locale), Fallback::Continue)
        .unwrap()
        .with_generator(ResponseGenerator::with_seed(locale, 5).with_clock(noon));
    let mut env = Environment::new();
    env.add_agent(agent);
    env
}

fn wiki() -> StaticEncyclopedia {
    StaticEncyclopedia::new()
        .with_summary("albert einstein", "Albert Einstein was a physicist.")
        .with_ambiguous(
            "mercury",
            &[
                "Mercury (planet)",
                "Mercury (element)",
                "Freddie Mercury",
                "Mercury Records",
            ],
        )
        .with_outage("atlantis")
}

struct Harness {
    out: RecordingOutput,
    launcher: NullLauncher,
}

impl Harness {
    fn new() -> Self {
        Self {
            out: RecordingOutput::new(),
            launcher: NullLauncher::new(),
        }
    }

    fn english(&self, input: ScriptedInput) -> Session {
        Session::new(
            environment(Locale::En, "R.T."),
            "R.T.",
            Box::new(input),
            Box::new(self.out.clone()),
        )
        .with_encyclopedia(Arc::new(wiki()))
        .with_launcher(Arc::new(self.launcher.clone()))
    }

    fn bengali(&self, input: ScriptedInput) -> Session {
        Session::new(
            environment(Locale::Bn, "সহায়ক"),
            "সহায়ক",
            Box::new(input),
            Box::new(self.out.clone()),
        )
        .with_encyclopedia(Arc::new(wiki()))
        .with_launcher(Arc::new(self.launcher.clone()))
    }
}

// =============================================================================
// English
// =============================================================================

#[tokio::test]
async fn test_english_conversation() {
    let h = Harness::new();
    let input = ScriptedInput::new([
        "What is your name?",
        "what is the capital of Bangladesh",
        "what is 2+2",
        "capital of Mars",
        "thanks",
        "exit",
    ]);
    let summary = h.english(input).run().await.unwrap();

    assert_eq!(summary.turns, 6);
    assert_eq!(summary.exit, ExitReason::ExitIntent);
    assert_eq!(
        h.out.lines(),
        vec![
            "I'm an AI, made by Ariq Azmain. My name is R.T.",
            "My name is R.T.",
            "capital of bangladesh is Dhaka",
            "2+2 is 4",
            "I don't know that fact. Is there anything else you'd like to know?",
            phrases(Locale::En).thanks,
            "Goodbye. Have a nice day.",
        ]
    );
}

#[tokio::test]
async fn test_time_is_followed_by_idle_prompt() {
    let h = Harness::new();
    h.english(ScriptedInput::new(["what time is it"]))
        .run()
        .await
        .unwrap();

    let lines = h.out.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("12:30 PM"), "{}", lines[1]);
    assert!(phrases(Locale::En)
        .continue_prompts
        .contains(&lines[2].as_str()));
}

#[tokio::test]
async fn test_lookup_and_ambiguity() {
    let h = Harness::new();
    let input = ScriptedInput::new([
        "tell me about Albert Einstein",
        "what is mercury",
        "who is nobody in particular",
        "tell me about atlantis",
    ]);
    let summary = h.english(input).run().await.unwrap();
    assert_eq!(summary.exit, ExitReason::InputClosed);

    assert_eq!(
        &h.out.lines()[1..],
        &[
            "From Wikipedia, about albert einstein:",
            "Albert Einstein was a physicist.",
            "There are multiple results for that. Please be more specific. Options include: \
             Mercury (planet), Mercury (element), Freddie Mercury",
            "Sorry, I couldn't find any information on that topic.",
            "Sorry, the service is not available right now. Please try again.",
        ]
    );
}

#[tokio::test]
async fn test_play_and_search_open_urls() {
    let h = Harness::new();
    let input = ScriptedInput::new(["play despacito on youtube", "search for rust tokio"]);
    h.english(input).run().await.unwrap();

    assert_eq!(
        h.launcher.opened(),
        vec![
            "https://www.youtube.com/results?search_query=despacito",
            "https://www.google.com/search?q=rust+tokio",
        ]
    );
    assert_eq!(
        &h.out.lines()[1..],
        &["Playing despacito on YouTube", "Searching for rust tokio"]
    );
}

#[tokio::test]
async fn test_follow_up_prompt_collects_topic() {
    let h = Harness::new();
    let input = ScriptedInput::new(["play", "Hey Jude", "search", "quit"]);
    let summary = h.english(input).run().await.unwrap();

    assert_eq!(summary.exit, ExitReason::ExitIntent);
    assert_eq!(summary.turns, 4);
    assert_eq!(
        h.launcher.opened(),
        vec!["https://www.youtube.com/results?search_query=hey+jude"]
    );
    assert_eq!(
        &h.out.lines()[1..],
        &[
            "What would you like me to play?",
            "Playing hey jude on YouTube",
            "What would you like me to search for?",
            "Goodbye. Have a nice day.",
        ]
    );
}

#[tokio::test]
async fn test_recognition_failures_do_not_end_session() {
    let h = Harness::new();
    let input = ScriptedInput::default()
        .push_failure(ScriptedFailure::NotUnderstood)
        .push_failure(ScriptedFailure::ServiceUnavailable)
        .push("hello")
        .push("bye");
    let summary = h.english(input).run().await.unwrap();

    assert_eq!(summary.turns, 2);
    let lines = h.out.lines();
    assert_eq!(lines[1], "Sorry, I didn't understand that.");
    assert_eq!(
        lines[2],
        "Sorry, the service is not available right now. Please try again."
    );
    assert_eq!(lines.last().map(String::as_str), Some("Goodbye. Have a nice day."));
}

#[tokio::test]
async fn test_wake_word_voice_mode() {
    let h = Harness::new();
    let input = ScriptedInput::new([
        "background noise",
        "okay artie",
        "play",
        // A follow-up answer does not need the wake word.
        "thunderstruck",
        "artie",
        "stop",
    ]);
    let summary = h
        .english(input)
        .with_wake_gate(WakeWordGate::new(["rt", "r.t", "artie"]))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.exit, ExitReason::ExitIntent);
    assert_eq!(summary.turns, 3);
    assert_eq!(
        &h.out.lines()[1..],
        &[
            "Yes, how can I help you?",
            "What would you like me to play?",
            "Playing thunderstruck on YouTube",
            "Yes, how can I help you?",
            "Goodbye. Have a nice day.",
        ]
    );
}

// =============================================================================
// Bengali
// =============================================================================

#[tokio::test]
async fn test_bengali_conversation() {
    let h = Harness::new();
    let input = ScriptedInput::new([
        "তোমার নাম কি?",
        "বাংলাদেশের রাজধানী কি?",
        "দুই ও দুই কতো?",
        "ধন্যবাদ",
        "এখন কটা বাজে",
        "বিদায়",
    ]);
    let summary = h.bengali(input).run().await.unwrap();

    assert_eq!(summary.exit, ExitReason::ExitIntent);
    assert_eq!(
        &h.out.lines()[1..],
        &[
            "আমার নাম সহায়ক",
            "বাংলাদেশের রাজধানী হল ঢাকা",
            "দুই ও দুই এর উত্তর হল ৪ (চার)",
            "আপনাকে ধন্যবাদ! আর কিছু জানার থাকলে আমাকে বলুন।",
            "এখন সময় হলো 12:30 PM",
            "বিদায়, ভালো থাকবেন।",
        ]
    );
}

#[tokio::test]
async fn test_bengali_play_song() {
    let h = Harness::new();
    h.bengali(ScriptedInput::new(["আমার সোনার বাংলা গান চালাও"]))
        .run()
        .await
        .unwrap();

    assert_eq!(h.out.lines()[1], "আমার সোনার বাংলা গানটি চালাচ্ছি");
    assert_eq!(h.launcher.opened().len(), 1);
}

#[tokio::test]
async fn test_agent_not_found() {
    let out = RecordingOutput::new();
    let result = Session::new(
        environment(Locale::Bn, "সহায়ক"),
        "অন্য কেউ",
        Box::new(ScriptedInput::new(["হ্যালো"])),
        Box::new(out.clone()),
    )
    .run()
    .await;

    assert!(result.is_err());
    assert_eq!(
        phrases(Locale::Bn).agent_not_found,
        "এজেন্ট খুঁজে পাওয়া যায়নি"
    );
}
