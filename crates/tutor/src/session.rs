// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One student's conversation: history, model choice, and turn submission.
//!
//! A turn sends `history + [user]` to the provider. Only a completed reply
//! commits both messages to the history and the store; on any failure,
//! cancellation included, the history is left exactly as it was.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tutor_core::{CompletionProvider, Message, TutorError};
use tutor_groq::find_model;
use tutor_pedagogy::{RequestPlan, plan_request};
use tutor_storage::{Preferences, export_chat_history};

/// Picks the model: explicit flag, then a persisted choice still in the
/// catalog, then the configured default.
pub fn resolve_model(flag: Option<&str>, prefs: &Preferences, configured: &str) -> String {
    if let Some(model) = flag {
        return model.to_string();
    }
    prefs
        .load_selected_model()
        .filter(|m| find_model(m).is_some())
        .unwrap_or_else(|| configured.to_string())
}

pub struct TutorSession {
    provider: Arc<dyn CompletionProvider>,
    prefs: Preferences,
    history: Vec<Message>,
    model: String,
}

impl TutorSession {
    /// Starts a session from the persisted history.
    pub fn new(provider: Arc<dyn CompletionProvider>, prefs: Preferences, model: String) -> Self {
        let history = prefs.load_chat_history();
        debug!(messages = history.len(), %model, "session started");
        Self {
            provider,
            prefs,
            history,
            model,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Derived intent, level, and parameters for the current history.
    pub fn current_plan(&self) -> RequestPlan {
        plan_request(&self.history)
    }

    /// Switches to a catalog model and persists the choice.
    pub fn select_model(&mut self, id: &str) -> Result<(), TutorError> {
        if find_model(id).is_none() {
            return Err(TutorError::Config(format!("unknown model: {id}")));
        }
        self.model = id.to_string();
        self.prefs.save_selected_model(id);
        info!(model = id, "model selected");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.prefs.clear_chat_history();
    }

    /// Writes the in-memory history as a dated JSON file in `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, TutorError> {
        export_chat_history(&self.history, dir)
    }

    fn snapshot_with(&self, input: &str) -> Vec<Message> {
        let mut snapshot = Vec::with_capacity(self.history.len() + 1);
        snapshot.extend_from_slice(&self.history);
        snapshot.push(Message::user(input));
        snapshot
    }

    fn commit(&mut self, mut snapshot: Vec<Message>, reply: String) {
        snapshot.push(Message::assistant(reply));
        self.history = snapshot;
        self.prefs.save_chat_history(&self.history);
    }

    /// Streams the reply to `input`, forwarding each chunk to `on_chunk`.
    pub async fn send_streaming<F>(
        &mut self,
        input: &str,
        mut on_chunk: F,
        cancel: &CancellationToken,
    ) -> Result<String, TutorError>
    where
        F: FnMut(&str) + Send,
    {
        let snapshot = self.snapshot_with(input);
        let mut reply = String::new();
        {
            let mut sink = |chunk: &str| {
                reply.push_str(chunk);
                on_chunk(chunk);
            };
            self.provider
                .stream_completion(&snapshot, &self.model, &mut sink, cancel)
                .await?;
        }
        self.commit(snapshot, reply.clone());
        Ok(reply)
    }

    /// Requests the whole reply to `input` at once.
    pub async fn send(&mut self, input: &str) -> Result<String, TutorError> {
        let snapshot = self.snapshot_with(input);
        let reply = self
            .provider
            .get_completion(&snapshot, &self.model)
            .await?;
        self.commit(snapshot, reply.clone());
        Ok(reply)
    }
}
