// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handling against the network and the current cache generation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};
use tutor_config::model::OfflineConfig;
use tutor_core::TutorError;

use crate::cache::{CacheStorage, CachedResponse, generation_name};
use crate::strategy::{CachePolicy, RequestRoute, route};

/// Network access used by the worker.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<CachedResponse, TutorError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, path: &str) -> Result<CachedResponse, TutorError> {
        (**self).fetch(path).await
    }
}

/// [`Fetcher`] issuing GET requests against a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TutorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TutorError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, path: &str) -> Result<CachedResponse, TutorError> {
        let url = format!("{}{path}", self.base_url);
        let transport = |e: reqwest::Error| TutorError::Transport {
            message: format!("fetch {path} failed: {e}"),
            source: Some(Box::new(e)),
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport)?.to_vec();

        Ok(CachedResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Where a served response came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served {
    /// Request was not intercepted.
    Bypass,
    Network(CachedResponse),
    Cache(CachedResponse),
}

/// Offline request handler bound to one cache generation.
pub struct OfflineWorker<F> {
    fetcher: F,
    cache: Arc<CacheStorage>,
    generation: String,
    fallback_page: String,
    policy: CachePolicy,
}

impl<F: Fetcher> OfflineWorker<F> {
    pub fn new(config: &OfflineConfig, version: &str, fetcher: F, cache: Arc<CacheStorage>) -> Self {
        Self {
            fetcher,
            cache,
            generation: generation_name(&config.cache_prefix, version),
            fallback_page: config.fallback_page.clone(),
            policy: CachePolicy::NetworkFirst,
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Drops every generation but the current one.
    pub fn activate(&self) -> usize {
        let removed = self.cache.purge_except(&self.generation);
        info!(generation = %self.generation, removed, "offline cache activated");
        removed
    }

    pub async fn handle(&self, method: &str, path: &str) -> Result<Served, TutorError> {
        let route = route(method, path);
        debug!(method, path, %route, policy = %self.policy, "routing request");

        match route {
            RequestRoute::Bypass => Ok(Served::Bypass),
            RequestRoute::Network => self.fetcher.fetch(path).await.map(Served::Network),
            RequestRoute::Navigation | RequestRoute::Asset => {
                if self.policy == CachePolicy::CacheFirst {
                    if let Some(hit) = self.cache.match_any(path) {
                        return Ok(Served::Cache(hit));
                    }
                }
                self.network_first(route, path).await
            }
        }
    }

    async fn network_first(&self, route: RequestRoute, path: &str) -> Result<Served, TutorError> {
        match self.fetcher.fetch(path).await {
            Ok(response) => {
                if route == RequestRoute::Asset && response.status == 200 {
                    self.cache.put(&self.generation, path, response.clone());
                }
                Ok(Served::Network(response))
            }
            Err(e) => {
                let key = match route {
                    RequestRoute::Navigation => self.fallback_page.as_str(),
                    _ => path,
                };
                match self.cache.match_any(key) {
                    Some(hit) => {
                        warn!(path, served = key, error = %e, "network unavailable, serving cached copy");
                        Ok(Served::Cache(hit))
                    }
                    None => Err(e),
                }
            }
        }
    }
}
