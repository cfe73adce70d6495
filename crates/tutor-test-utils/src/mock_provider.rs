// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured replies,
//! enabling fast, CI-runnable tests without calls to the hosted endpoint.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tutor_core::{
    AdapterType, ChunkSink, CompletionProvider, HealthStatus, Message, PluginAdapter, TutorError,
};
use tutor_pedagogy::{RequestPlan, plan_request};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Streamed as the given chunks, returned joined in batch mode.
    Chunks(Vec<String>),
    /// Fails like a non-success HTTP status.
    ProviderError { status: u16, message: String },
    /// Never answers; only cancellation ends a streaming call.
    Hang,
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Chunks(vec![text.into()])
    }
}

/// A call the provider received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub conversation: Vec<Message>,
    pub plan: RequestPlan,
    pub streamed: bool,
}

/// A mock provider returning replies from a FIFO queue.
///
/// When the queue is empty, the text "mock response" is returned.
#[derive(Clone, Default)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            calls: Arc::default(),
        }
    }

    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, conversation: &[Message], model: &str, streamed: bool) -> MockReply {
        self.calls.lock().await.push(RecordedCall {
            model: model.to_string(),
            conversation: conversation.to_vec(),
            plan: plan_request(conversation),
            streamed,
        });
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::text("mock response"))
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, TutorError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn stream_completion(
        &self,
        conversation: &[Message],
        model: &str,
        on_chunk: ChunkSink<'_>,
        cancel: &CancellationToken,
    ) -> Result<(), TutorError> {
        match self.record(conversation, model, true).await {
            MockReply::Chunks(chunks) => {
                for chunk in chunks {
                    if cancel.is_cancelled() {
                        return Err(TutorError::Cancelled);
                    }
                    on_chunk(&chunk);
                    tokio::task::yield_now().await;
                }
                Ok(())
            }
            MockReply::ProviderError { status, message } => Err(TutorError::Provider {
                status: Some(status),
                message,
            }),
            MockReply::Hang => {
                cancel.cancelled().await;
                Err(TutorError::Cancelled)
            }
        }
    }

    async fn get_completion(
        &self,
        conversation: &[Message],
        model: &str,
    ) -> Result<String, TutorError> {
        match self.record(conversation, model, false).await {
            MockReply::Chunks(chunks) => Ok(chunks.concat()),
            MockReply::ProviderError { status, message } => Err(TutorError::Provider {
                status: Some(status),
                message,
            }),
            MockReply::Hang => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_reply_when_queue_empty() {
        let provider = MockProvider::new();
        let text = provider
            .get_completion(&[Message::user("hi")], "m")
            .await
            .unwrap();
        assert_eq!(text, "mock response");
    }

    #[tokio::test]
    async fn replies_in_order_and_calls_recorded() {
        let provider = MockProvider::with_replies(vec![
            MockReply::Chunks(vec!["a".into(), "b".into()]),
            MockReply::text("second"),
        ]);

        let cancel = CancellationToken::new();
        let mut out = String::new();
        {
            let mut sink = |t: &str| out.push_str(t);
            provider
                .stream_completion(&[Message::user("舉個例子")], "m1", &mut sink, &cancel)
                .await
                .unwrap();
        }
        assert_eq!(out, "ab");

        let second = provider.get_completion(&[], "m2").await.unwrap();
        assert_eq!(second, "second");

        let calls = provider.calls().await;
        assert_eq!(calls.len(), 2);
        assert!(calls[0].streamed);
        assert_eq!(calls[0].model, "m1");
        assert_eq!(calls[0].plan.question_type, tutor_core::QuestionType::General);
        assert!(!calls[1].streamed);
    }

    #[tokio::test]
    async fn hang_ends_on_cancel() {
        let provider = MockProvider::with_replies(vec![MockReply::Hang]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });
        let mut sink = |_: &str| {};
        let err = provider
            .stream_completion(&[], "m", &mut sink, &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
