// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for the hosted chat-completion endpoint.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TutorError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Message;

/// Callback receiving each decoded text delta, in byte order of the response.
pub type ChunkSink<'a> = &'a mut (dyn FnMut(&str) + Send);

/// A chat-completion backend.
///
/// Implementations derive the system prompt and sampling parameters from the
/// conversation snapshot themselves; callers pass the history exactly as the
/// UI holds it and the slice is never mutated.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Streams the reply, invoking `on_chunk` once per text delta.
    ///
    /// Resolves when the provider signals end of stream. Cancelling `cancel`
    /// terminates the read loop with [`TutorError::Cancelled`].
    async fn stream_completion(
        &self,
        conversation: &[Message],
        model: &str,
        on_chunk: ChunkSink<'_>,
        cancel: &CancellationToken,
    ) -> Result<(), TutorError>;

    /// Requests the full reply in a single response.
    async fn get_completion(
        &self,
        conversation: &[Message],
        model: &str,
    ) -> Result<String, TutorError>;
}
