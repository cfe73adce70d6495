// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutor` command-line entry point.

mod chat;
mod commands;
mod doctor;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use clap::{Parser, Subcommand};
use tutor_config::TutorConfig;
use tutor_core::{KeyValueStore, TutorError};
use tutor_groq::GroqProvider;
use tutor_security::{RedactingWriter, SecretList, redact, register_secret};
use tutor_storage::{Preferences, SqliteStore};

/// Traditional-Chinese AI tutor in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tutor", version, about = "AI tutor chat client backed by Groq")]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive chat (default).
    Chat {
        /// Model id to use for this session.
        #[arg(long)]
        model: Option<String>,
    },
    /// Ask one question in batch mode and print the reply.
    Ask {
        /// The question.
        text: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Inspect or manage the stored conversation.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List the available models.
    Models,
    /// Run diagnostic checks.
    Doctor,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Print the stored conversation.
    Show,
    /// Delete the stored conversation.
    Clear,
    /// Write the conversation to a dated JSON file.
    Export {
        /// Target directory (defaults to `storage.export_dir`).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tutor_config::load_and_validate_path(path),
        None => tutor_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tutor_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let secrets: SecretList = Arc::new(RwLock::new(Vec::new()));
    if let Some(key) = config.groq.resolve_api_key() {
        register_secret(&secrets, &key);
    }
    init_tracing(&config.agent.log_level, secrets.clone());

    if let Err(e) = run(cli.command, config).await {
        let message = secrets
            .read()
            .map(|s| redact(&e.to_string(), &s))
            .unwrap_or_else(|_| redact(&e.to_string(), &[]));
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(command: Option<Commands>, config: TutorConfig) -> Result<(), TutorError> {
    match command.unwrap_or(Commands::Chat { model: None }) {
        Commands::Chat { model } => {
            let (provider, prefs) = open_session_parts(&config)?;
            chat::run_chat(&config, provider, prefs, model.as_deref()).await
        }
        Commands::Ask { text, model } => {
            let (provider, prefs) = open_session_parts(&config)?;
            commands::run_ask(&config, provider, prefs, &text, model.as_deref()).await
        }
        Commands::History { action } => {
            let prefs = open_preferences(&config)?;
            match action {
                HistoryAction::Show => commands::show_history(&prefs),
                HistoryAction::Clear => commands::clear_history(&prefs),
                HistoryAction::Export { out } => {
                    let dir = out.unwrap_or_else(|| PathBuf::from(&config.storage.export_dir));
                    commands::export_history(&prefs, &dir)
                }
            }
        }
        Commands::Models => {
            let prefs = open_preferences(&config)?;
            commands::list_models(&config, &prefs);
            Ok(())
        }
        Commands::Doctor => doctor::run_doctor(&config).await,
    }
}

fn open_preferences(config: &TutorConfig) -> Result<Preferences, TutorError> {
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&config.storage)?);
    Ok(Preferences::new(store))
}

fn open_session_parts(config: &TutorConfig) -> Result<(Arc<GroqProvider>, Preferences), TutorError> {
    let provider = Arc::new(GroqProvider::from_config(&config.groq)?);
    Ok((provider, open_preferences(config)?))
}

/// Initializes the tracing subscriber on stderr, masking registered secrets.
fn init_tracing(log_level: &str, secrets: SecretList) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tutor={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .with_target(true)
        .with_thread_names(false)
        .init();
}
