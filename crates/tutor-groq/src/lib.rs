// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq completion provider for the tutor.
//!
//! [`GroqProvider`] implements [`CompletionProvider`] in streaming and batch
//! modes. Each call derives the system prompt and sampling parameters from
//! the conversation snapshot via [`tutor_pedagogy::plan_request`], so the
//! outgoing request is always `[system, ...conversation]`.

pub mod client;
pub mod models;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tutor_config::model::GroqConfig;
use tutor_core::{
    AdapterType, ChunkSink, CompletionProvider, HealthStatus, Message, PluginAdapter, TutorError,
};
use tutor_pedagogy::plan_request;

use crate::client::GroqClient;
use crate::types::ChatRequest;

pub use models::{DEFAULT_MODEL, ModelInfo, available_models, default_model, find_model};

/// Completion provider backed by the Groq chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct GroqProvider {
    client: GroqClient,
}

impl GroqProvider {
    /// Builds a provider from configuration.
    ///
    /// A missing credential is not an error here; it surfaces on first use.
    pub fn from_config(config: &GroqConfig) -> Result<Self, TutorError> {
        let api_key = config.resolve_api_key().map(SecretString::from);
        let provider = Self::new(
            api_key,
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(
            endpoint = %config.endpoint,
            has_key = provider.client.has_api_key(),
            "Groq provider initialized"
        );
        Ok(provider)
    }

    pub fn new(
        api_key: Option<SecretString>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TutorError> {
        Ok(Self {
            client: GroqClient::new(api_key, endpoint, timeout)?,
        })
    }

    /// Overrides the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.client = self.client.with_endpoint(endpoint);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.client.has_api_key()
    }
}

#[async_trait]
impl PluginAdapter for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, TutorError> {
        // No network check: a completion call would consume tokens.
        if self.client.has_api_key() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded("GROQ_API_KEY is not set".into()))
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn stream_completion(
        &self,
        conversation: &[Message],
        model: &str,
        on_chunk: ChunkSink<'_>,
        cancel: &CancellationToken,
    ) -> Result<(), TutorError> {
        let plan = plan_request(conversation);
        let messages = plan.messages(conversation);
        let request = ChatRequest::new(model, &messages, plan.parameters, true);
        debug!(model, messages = messages.len(), "starting streaming completion");

        // Credential problems are reported even when the token is already cancelled.
        let prepared = self.client.prepare(&request)?;
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TutorError::Cancelled),
            response = self.client.dispatch(prepared, request.stream) => response?,
        };

        let secrets = self.client.secrets();
        sse::pump_stream(response.bytes_stream(), on_chunk, cancel, &secrets).await
    }

    async fn get_completion(
        &self,
        conversation: &[Message],
        model: &str,
    ) -> Result<String, TutorError> {
        let plan = plan_request(conversation);
        let messages = plan.messages(conversation);
        let request = ChatRequest::new(model, &messages, plan.parameters, false);
        debug!(model, messages = messages.len(), "starting batch completion");

        self.client.complete(&request).await
    }
}
