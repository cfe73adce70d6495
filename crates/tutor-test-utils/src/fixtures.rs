// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation and stream-body builders.

use tutor_core::{Message, Role};

/// Builds a conversation from `(role, content)` pairs.
pub fn conversation(turns: &[(Role, &str)]) -> Vec<Message> {
    turns
        .iter()
        .map(|(role, content)| Message::new(*role, *content))
        .collect()
}

/// `pairs` user/assistant exchanges with fixed texts.
pub fn alternating(pairs: usize, user: &str, assistant: &str) -> Vec<Message> {
    (0..pairs)
        .flat_map(|_| [Message::user(user), Message::assistant(assistant)])
        .collect()
}

/// A streaming response body delivering `deltas` and then the sentinel.
pub fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    for delta in deltas {
        let fragment = serde_json::json!({"choices": [{"delta": {"content": delta}}]});
        body.push_str(&format!("data: {fragment}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}
