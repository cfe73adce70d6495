// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed, fail-soft accessors for history and user preferences.
//!
//! Every accessor swallows backend failures: reads degrade to "absent" or
//! the documented default and writes become no-ops, with the failure logged.
//! Only [`Preferences::export_history`] surfaces errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, warn};
use tutor_core::{KeyValueStore, Message, TutorError};

use crate::export;

pub const CHAT_HISTORY_KEY: &str = "ai-teacher-chat-history";
pub const SELECTED_MODEL_KEY: &str = "ai-teacher-selected-model";
pub const TOUR_COMPLETED_KEY: &str = "ai-teacher-tour-completed";
pub const FONT_SIZE_KEY: &str = "ai-teacher-font-size";
pub const WELCOME_SHOWN_KEY: &str = "ai-teacher-welcome-shown";
pub const INSTALL_PROMPT_DISMISSED_KEY: &str = "ai-teacher-install-prompt-dismissed";

pub const DEFAULT_FONT_SIZE: &str = "medium";

const FLAG_SET: &str = "true";

/// Preference and history facade over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    fn save(&self, key: &str, value: &str, what: &str) {
        if let Err(e) = self.store.save(key, value) {
            error!(key, error = %e, "failed to save {what}");
        }
    }

    fn load(&self, key: &str, what: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(e) => {
                error!(key, error = %e, "failed to load {what}");
                None
            }
        }
    }

    fn remove(&self, key: &str, what: &str) {
        if let Err(e) = self.store.remove(key) {
            error!(key, error = %e, "failed to remove {what}");
        }
    }

    fn flag(&self, key: &str, what: &str) -> bool {
        self.load(key, what).is_some_and(|v| !v.is_empty())
    }

    // --- chat history ---

    pub fn save_chat_history(&self, messages: &[Message]) {
        match serde_json::to_string(messages) {
            Ok(json) => self.save(CHAT_HISTORY_KEY, &json, "chat history"),
            Err(e) => error!(error = %e, "failed to encode chat history"),
        }
    }

    /// Stored history; absent or undecodable data yields an empty history.
    pub fn load_chat_history(&self) -> Vec<Message> {
        let Some(json) = self.load(CHAT_HISTORY_KEY, "chat history") else {
            return Vec::new();
        };
        if json.is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&json) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, "stored chat history is corrupt, starting fresh");
                Vec::new()
            }
        }
    }

    pub fn clear_chat_history(&self) {
        self.remove(CHAT_HISTORY_KEY, "chat history");
    }

    /// Writes the stored history as a dated JSON file in `dir`.
    pub fn export_history(&self, dir: &Path) -> Result<PathBuf, TutorError> {
        export::export_chat_history(&self.load_chat_history(), dir)
    }

    // --- model selection ---

    pub fn save_selected_model(&self, model: &str) {
        self.save(SELECTED_MODEL_KEY, model, "selected model");
    }

    pub fn load_selected_model(&self) -> Option<String> {
        self.load(SELECTED_MODEL_KEY, "selected model")
            .filter(|m| !m.is_empty())
    }

    // --- onboarding tour ---

    /// True until the tour has been completed, and whenever the store fails.
    pub fn is_first_visit(&self) -> bool {
        match self.store.load(TOUR_COMPLETED_KEY) {
            Ok(value) => value.is_none_or(|v| v.is_empty()),
            Err(e) => {
                error!(error = %e, "failed to check first visit");
                true
            }
        }
    }

    pub fn mark_tour_completed(&self) {
        self.save(TOUR_COMPLETED_KEY, FLAG_SET, "tour completion");
    }

    pub fn reset_tour(&self) {
        self.remove(TOUR_COMPLETED_KEY, "tour completion");
    }

    // --- display ---

    pub fn save_font_size(&self, size: &str) {
        self.save(FONT_SIZE_KEY, size, "font size");
    }

    pub fn load_font_size(&self) -> String {
        self.load(FONT_SIZE_KEY, "font size")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_SIZE.to_string())
    }

    // --- one-time notices ---

    pub fn welcome_shown(&self) -> bool {
        self.flag(WELCOME_SHOWN_KEY, "welcome flag")
    }

    pub fn mark_welcome_shown(&self) {
        self.save(WELCOME_SHOWN_KEY, FLAG_SET, "welcome flag");
    }

    pub fn install_prompt_dismissed(&self) -> bool {
        self.flag(INSTALL_PROMPT_DISMISSED_KEY, "install prompt flag")
    }

    pub fn dismiss_install_prompt(&self) {
        self.save(INSTALL_PROMPT_DISMISSED_KEY, FLAG_SET, "install prompt flag");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn prefs() -> Preferences {
        Preferences::new(Arc::new(MemoryStore::new()))
    }

    fn broken() -> Preferences {
        Preferences::new(Arc::new(MemoryStore::unavailable()))
    }

    #[test]
    fn history_round_trip_and_clear() {
        let p = prefs();
        assert!(p.load_chat_history().is_empty());
        let history = vec![Message::user("你好"), Message::assistant("你好！")];
        p.save_chat_history(&history);
        assert_eq!(p.load_chat_history(), history);
        p.clear_chat_history();
        assert!(p.load_chat_history().is_empty());
    }

    #[test]
    fn corrupt_history_loads_empty() {
        let p = prefs();
        p.store().save(CHAT_HISTORY_KEY, "{not json").unwrap();
        assert!(p.load_chat_history().is_empty());
    }

    #[test]
    fn history_with_extra_ui_fields_is_accepted() {
        let p = prefs();
        p.store()
            .save(
                CHAT_HISTORY_KEY,
                r#"[{"role":"user","content":"hi","timestamp":1},{"role":"assistant"}]"#,
            )
            .unwrap();
        let history = p.load_chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content, "");
    }

    #[test]
    fn selected_model_absent_then_present() {
        let p = prefs();
        assert_eq!(p.load_selected_model(), None);
        p.save_selected_model("llama-3.1-8b-instant");
        assert_eq!(p.load_selected_model().as_deref(), Some("llama-3.1-8b-instant"));
    }

    #[test]
    fn tour_flag_lifecycle() {
        let p = prefs();
        assert!(p.is_first_visit());
        p.mark_tour_completed();
        assert!(!p.is_first_visit());
        p.reset_tour();
        assert!(p.is_first_visit());
    }

    #[test]
    fn font_size_defaults_to_medium() {
        let p = prefs();
        assert_eq!(p.load_font_size(), "medium");
        p.save_font_size("large");
        assert_eq!(p.load_font_size(), "large");
    }

    #[test]
    fn notice_flags() {
        let p = prefs();
        assert!(!p.welcome_shown());
        p.mark_welcome_shown();
        assert!(p.welcome_shown());
        assert!(!p.install_prompt_dismissed());
        p.dismiss_install_prompt();
        assert!(p.install_prompt_dismissed());
    }

    #[test]
    fn failing_store_degrades_softly() {
        let p = broken();
        p.save_chat_history(&[Message::user("lost")]);
        assert!(p.load_chat_history().is_empty());
        p.clear_chat_history();
        p.save_selected_model("m");
        assert_eq!(p.load_selected_model(), None);
        assert!(p.is_first_visit());
        p.mark_tour_completed();
        assert_eq!(p.load_font_size(), DEFAULT_FONT_SIZE);
        assert!(!p.welcome_shown());
    }
}
