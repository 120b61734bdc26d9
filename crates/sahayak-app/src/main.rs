//! Sahayak application binary - composition root.
//!
//! 1. Parse the command line and load configuration from TOML
//! 2. Build the fact store and the agent for the configured locale
//! 3. Pick input/output collaborators (terminal, script or speech commands)
//! 4. Wire in the encyclopedia and the URL launcher
//! 5. Run the session loop until the user says goodbye

mod cli;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use sahayak_chat::facts::NAME_KEY;
use sahayak_chat::{phrases, Agent, ChatError, Environment, FactStore, Session};
use sahayak_core::config::SahayakConfig;
use sahayak_core::types::{FactCategory, Locale};
use sahayak_lookup::{BrowserLauncher, Encyclopedia, NullLauncher, WebLauncher, WikipediaClient};
use sahayak_speech::{
    CommandSpeaker, CommandTranscriber, ConsoleInput, ConsoleOutput, ScriptedInput, SpeechInput,
    SpeechOutput, WakeWordGate,
};

use crate::cli::CliArgs;

/// Built-in tables for the locale, plus the configured facts file and
/// identity overrides.
fn build_facts(config: &SahayakConfig) -> Result<FactStore, ChatError> {
    let locale = config.general.locale;
    let mut facts = if config.facts.include_builtin {
        FactStore::builtin(locale)
    } else {
        FactStore::new()
    };
    if let Some(ref path) = config.facts.path {
        facts.load_file(Path::new(path))?;
    }
    facts.set_identity(
        config.assistant.name.as_deref(),
        config.assistant.creator.as_deref(),
        config.assistant.status.as_deref(),
    );
    tracing::info!(facts = facts.len(), "Fact store ready");
    Ok(facts)
}

fn build_input(
    args: &CliArgs,
    config: &SahayakConfig,
) -> Result<Box<dyn SpeechInput>, Box<dyn std::error::Error>> {
    if let Some(ref script) = args.script {
        let text = std::fs::read_to_string(script)?;
        let input = ScriptedInput::from_script(&text);
        tracing::info!(path = %script.display(), lines = input.remaining(), "Reading script");
        return Ok(Box::new(input));
    }
    if config.voice.enabled {
        if config.voice.transcribe_command.is_empty() {
            return Err("voice mode needs voice.transcribe_command in the configuration".into());
        }
        tracing::info!(command = ?config.voice.transcribe_command, "Listening through transcriber");
        return Ok(Box::new(CommandTranscriber::new(
            config.voice.transcribe_command.clone(),
            Duration::from_secs(config.voice.listen_timeout_secs),
        )));
    }
    Ok(Box::new(ConsoleInput::new(
        phrases(config.general.locale).input_prompt,
    )))
}

fn build_output(config: &SahayakConfig, agent_name: &str) -> Box<dyn SpeechOutput> {
    if config.voice.enabled && !config.voice.speak_command.is_empty() {
        tracing::info!(command = ?config.voice.speak_command, "Speaking through synthesizer");
        Box::new(CommandSpeaker::new(config.voice.speak_command.clone()))
    } else {
        Box::new(ConsoleOutput::new().with_label(agent_name))
    }
}

fn build_encyclopedia(
    config: &SahayakConfig,
) -> Result<Option<Arc<dyn Encyclopedia>>, Box<dyn std::error::Error>> {
    if !config.lookup.enabled {
        tracing::info!("Encyclopedia lookups disabled");
        return Ok(None);
    }
    let base_url = config.lookup.base_url_for(config.general.locale);
    let client = WikipediaClient::new(
        base_url.clone(),
        config.lookup.summary_sentences,
        config.lookup.max_options,
        Duration::from_secs(config.lookup.timeout_secs),
    )?;
    tracing::info!(base_url = %base_url, "Encyclopedia ready");
    Ok(Some(Arc::new(client)))
}

fn build_launcher(config: &SahayakConfig) -> Arc<dyn WebLauncher> {
    if !config.web.enabled {
        tracing::info!("Web launching disabled, URLs are only logged");
        return Arc::new(NullLauncher::new());
    }
    match config.web.open_command {
        Some(ref argv) => Arc::new(BrowserLauncher::new(argv.clone())),
        None => Arc::new(BrowserLauncher::platform_default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing starts so its log level applies.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = match SahayakConfig::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (SahayakConfig::default(), Some(e)),
    };
    args.apply(&mut config);

    // Tracing goes to stderr; stdout is the conversation.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Sahayak v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Using default configuration"
        ),
    }

    let locale: Locale = config.general.locale;
    let facts = build_facts(&config)?;
    let agent_name = facts
        .get(FactCategory::General, NAME_KEY)
        .unwrap_or("sahayak")
        .to_string();

    let agent = Agent::new(agent_name.as_str(), locale, facts, config.assistant.fallback)?;
    let mut env = Environment::new();
    env.add_agent(agent);

    // Scripted runs have no microphone, so there is nothing to wake.
    let wake = if config.voice.enabled && args.script.is_none() {
        WakeWordGate::new(&config.voice.wake_words)
    } else {
        None
    };

    let mut session = Session::new(
        env,
        agent_name.as_str(),
        build_input(&args, &config)?,
        build_output(&config, &agent_name),
    )
    .with_launcher(build_launcher(&config))
    .with_wake_gate(wake)
    .with_max_options(config.lookup.max_options)
    .with_intro(config.assistant.intro.clone());
    if let Some(encyclopedia) = build_encyclopedia(&config)? {
        session = session.with_encyclopedia(encyclopedia);
    }

    tracing::info!(locale = %locale, agent = %agent_name, "Session starting");
    match session.run().await {
        Ok(summary) => {
            tracing::info!(
                session_id = %summary.session_id,
                turns = summary.turns,
                exit = ?summary.exit,
                "Goodbye"
            );
            Ok(())
        }
        Err(ChatError::AgentNotFound(name)) => {
            eprintln!("{}: {}", phrases(locale).agent_not_found, name);
            Err(ChatError::AgentNotFound(name).into())
        }
        Err(e) => Err(e.into()),
    }
}
