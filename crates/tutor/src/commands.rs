// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot subcommands: `ask`, `history`, and `models`.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tutor_config::TutorConfig;
use tutor_core::{CompletionProvider, Role, TutorError};
use tutor_groq::available_models;
use tutor_storage::Preferences;

use tutor::{TutorSession, resolve_model};

/// Asks one question in batch mode on top of the stored history.
pub async fn run_ask(
    config: &TutorConfig,
    provider: Arc<dyn CompletionProvider>,
    prefs: Preferences,
    text: &str,
    model_flag: Option<&str>,
) -> Result<(), TutorError> {
    let model = resolve_model(model_flag, &prefs, &config.groq.default_model);
    let mut session = TutorSession::new(provider, prefs, model);
    let reply = session.send(text).await?;
    println!("{reply}");
    Ok(())
}

pub fn show_history(prefs: &Preferences) -> Result<(), TutorError> {
    let history = prefs.load_chat_history();
    if history.is_empty() {
        println!("{}", "(沒有對話紀錄)".dimmed());
        return Ok(());
    }
    for message in &history {
        let label = match message.role {
            Role::User => "你".cyan().bold(),
            Role::Assistant => "老師".green().bold(),
            Role::System => "系統".dimmed(),
        };
        println!("{label}: {}\n", message.content);
    }
    Ok(())
}

pub fn clear_history(prefs: &Preferences) -> Result<(), TutorError> {
    prefs.clear_chat_history();
    println!("對話紀錄已清除。");
    Ok(())
}

pub fn export_history(prefs: &Preferences, dir: &Path) -> Result<(), TutorError> {
    let path = prefs.export_history(dir)?;
    println!("{}", path.display());
    Ok(())
}

/// Prints the model catalog, marking the default (`*`) and the saved selection (`>`).
pub fn list_models(config: &TutorConfig, prefs: &Preferences) {
    let selected = prefs.load_selected_model();
    for model in available_models() {
        let default_mark = if model.id == config.groq.default_model { "*" } else { " " };
        let selected_mark = if selected.as_deref() == Some(model.id) { ">" } else { " " };
        println!(
            "{selected_mark}{default_mark} {:<24} {}  [{}]",
            model.id, model.name, model.category
        );
    }
}
