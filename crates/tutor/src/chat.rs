// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutor chat` command implementation.
//!
//! Interactive REPL with a colored prompt, streamed replies, and readline
//! history. One turn is in flight at a time; Ctrl-C during a reply cancels
//! the request and discards the partial text.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tutor_config::TutorConfig;
use tutor_core::{CompletionProvider, TutorError};
use tutor_storage::Preferences;

use tutor::{TutorSession, resolve_model};

const WELCOME: &str = "歡迎使用 AI 家教！直接輸入你的問題，我會一步一步陪你弄懂。\n輸入 /help 查看可用指令。";
const CANCELLED_NOTICE: &str = "請求已取消";

const HELP: &str = "\
/clear        清除對話紀錄
/export       匯出對話紀錄為 JSON
/model <id>   切換模型
/level        顯示目前的問題類型、理解程度與參數
/quit, /exit  離開";

/// What the REPL does after a slash command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the `tutor chat` interactive REPL.
pub async fn run_chat(
    config: &TutorConfig,
    provider: Arc<dyn CompletionProvider>,
    prefs: Preferences,
    model_flag: Option<&str>,
) -> Result<(), TutorError> {
    let model = resolve_model(model_flag, &prefs, &config.groq.default_model);
    let mut session = TutorSession::new(provider, prefs, model);

    let mut rl = DefaultEditor::new()
        .map_err(|e| TutorError::Internal(format!("failed to initialize readline: {e}")))?;

    println!(
        "{} ({})",
        format!("{} chat", config.agent.name).bold().green(),
        session.model().dimmed()
    );
    if !session.preferences().welcome_shown() {
        println!("{WELCOME}");
        session.preferences().mark_welcome_shown();
    }
    if !session.history().is_empty() {
        println!(
            "{}",
            format!("已載入 {} 則先前的對話。", session.history().len()).dimmed()
        );
    }
    println!();

    let prompt = format!("{}> ", config.agent.name.green());
    let export_dir = Path::new(&config.storage.export_dir);

    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(TutorError::Internal(format!("readline error: {e}")));
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(input);

        if let Some(command) = input.strip_prefix('/') {
            if handle_command(&mut session, command, export_dir) == Flow::Quit {
                break;
            }
            continue;
        }

        stream_turn(&mut session, input).await;
    }

    info!(messages = session.history().len(), "chat ended");
    Ok(())
}

fn handle_command(session: &mut TutorSession, command: &str, export_dir: &Path) -> Flow {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    debug!(command = name, "slash command");

    match name {
        "quit" | "exit" => return Flow::Quit,
        "help" => println!("{HELP}"),
        "clear" => {
            session.clear();
            println!("{}", "對話紀錄已清除。".dimmed());
        }
        "export" => match session.export(export_dir) {
            Ok(path) => println!("{}", format!("已匯出至 {}", path.display()).dimmed()),
            Err(e) => println!("{}", format!("匯出失敗：{e}").red()),
        },
        "model" => match parts.next() {
            Some(id) => match session.select_model(id) {
                Ok(()) => println!("{}", format!("已切換至 {id}").dimmed()),
                Err(e) => println!("{}", e.to_string().red()),
            },
            None => println!("{}", session.model()),
        },
        "level" => {
            let plan = session.current_plan();
            println!(
                "問題類型: {}  理解程度: {}  temperature: {}  max_tokens: {}",
                plan.question_type,
                plan.level,
                plan.parameters.temperature,
                plan.parameters.max_tokens
            );
        }
        other => println!("{}", format!("未知指令：/{other}（輸入 /help 查看指令）").yellow()),
    }
    Flow::Continue
}

/// Streams one reply to stdout, cancelling on Ctrl-C.
async fn stream_turn(session: &mut TutorSession, input: &str) {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let mut stdout = std::io::stdout();
    let result = session
        .send_streaming(
            input,
            |chunk| {
                let _ = write!(stdout, "{chunk}");
                let _ = stdout.flush();
            },
            &cancel,
        )
        .await;
    watcher.abort();
    println!();

    match result {
        Ok(_) => {}
        Err(e) if e.is_cancelled() => println!("{}", CANCELLED_NOTICE.yellow()),
        Err(e) => println!("{}", e.to_string().red()),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use tutor_storage::MemoryStore;
    use tutor_test_utils::{MockProvider, alternating};

    use super::*;

    fn session() -> TutorSession {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        prefs.save_chat_history(&alternating(2, "問", "答"));
        TutorSession::new(Arc::new(MockProvider::new()), prefs, "m".into())
    }

    #[test]
    fn quit_and_exit_stop_the_loop() {
        let mut s = session();
        let dir = Path::new(".");
        assert_eq!(handle_command(&mut s, "quit", dir), Flow::Quit);
        assert_eq!(handle_command(&mut s, "exit", dir), Flow::Quit);
        assert_eq!(handle_command(&mut s, "bogus", dir), Flow::Continue);
    }

    #[test]
    fn clear_empties_history_and_store() {
        let mut s = session();
        assert_eq!(s.history().len(), 4);
        handle_command(&mut s, "clear", Path::new("."));
        assert!(s.history().is_empty());
        assert!(s.preferences().load_chat_history().is_empty());
    }

    #[test]
    fn unknown_model_keeps_current() {
        let mut s = session();
        handle_command(&mut s, "model nope", Path::new("."));
        assert_eq!(s.model(), "m");
    }

    #[test]
    fn export_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        handle_command(&mut s, "export", dir.path());
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
