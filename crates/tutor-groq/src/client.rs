// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Groq chat-completions endpoint.
//!
//! Provides [`GroqClient`], which handles request construction, bearer
//! authentication, and mapping of HTTP failures onto [`TutorError`]. There is
//! no retry loop: every failure is surfaced to the caller as-is.

use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use tutor_core::TutorError;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Groq's OpenAI-compatible chat-completions URL.
pub const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// HTTP client for chat-completion requests.
///
/// The credential is optional at construction; its absence is reported as a
/// configuration error on the first call, before any network I/O.
///
/// The configured timeout bounds connecting and each individual read, not the
/// whole exchange, so a long stream stays alive while fragments keep arriving.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl GroqClient {
    pub fn new(
        api_key: Option<SecretString>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TutorError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| TutorError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.expose_secret().trim().is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Overrides the endpoint URL (for pointing at a mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn authorization(&self) -> Result<HeaderValue, TutorError> {
        let key = self.api_key.as_ref().ok_or_else(|| {
            TutorError::Config(
                "Groq API key is not set; set groq.api_key in tutor.toml or the GROQ_API_KEY \
                 environment variable"
                    .into(),
            )
        })?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", key.expose_secret()))
            .map_err(|e| TutorError::Config(format!("invalid API key header value: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Values that must never appear in error messages or logs.
    pub fn secrets(&self) -> Vec<String> {
        self.api_key
            .iter()
            .map(|k| k.expose_secret().to_string())
            .collect()
    }

    fn redact(&self, text: &str) -> String {
        tutor_security::redact(text, &self.secrets())
    }

    /// Builds the authenticated POST for `request` without sending it.
    ///
    /// Fails with [`TutorError::Config`] when no API key is configured.
    pub fn prepare(&self, request: &ChatRequest<'_>) -> Result<RequestBuilder, TutorError> {
        let authorization = self.authorization()?;
        Ok(self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .json(request))
    }

    /// Sends `request` and returns the response once a success status arrived.
    pub async fn send(&self, request: &ChatRequest<'_>) -> Result<reqwest::Response, TutorError> {
        let prepared = self.prepare(request)?;
        self.dispatch(prepared, request.stream).await
    }

    /// Sends a request built by [`prepare`](Self::prepare).
    pub async fn dispatch(
        &self,
        prepared: RequestBuilder,
        stream: bool,
    ) -> Result<reqwest::Response, TutorError> {
        let response = prepared
            .send()
            .await
            .map_err(|e| TutorError::Transport {
                message: self.redact(&format!("HTTP request failed: {e}")),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, stream, "completion response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %self.redact(&body), "completion request rejected");

        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()));

        Err(TutorError::Provider {
            status: Some(status.as_u16()),
            message: self.redact(&message),
        })
    }

    /// Sends a non-streaming request and returns the first choice's text.
    pub async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, TutorError> {
        let response = self.send(request).await?;

        let body = response.text().await.map_err(|e| TutorError::Transport {
            message: self.redact(&format!("failed to read response body: {e}")),
            source: Some(Box::new(e)),
        })?;

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| TutorError::MalformedResponse(format!("failed to parse API response: {e}")))?;

        parsed.first_content().ok_or_else(|| {
            TutorError::MalformedResponse("response has no choices[0].message.content".into())
        })
    }
}
