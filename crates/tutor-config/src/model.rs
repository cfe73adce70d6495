// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level tutor configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to working values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TutorConfig {
    /// Identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion endpoint settings.
    #[serde(default)]
    pub groq: GroqConfig,

    /// Persistence store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Offline cache settings.
    #[serde(default)]
    pub offline: OfflineConfig,
}

/// Identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name shown in the chat prompt.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "tutor".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Completion endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqConfig {
    /// API key. `None` falls back to the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used when neither the CLI nor the store selects one.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            default_model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GroqConfig {
    /// Resolves the API key: config value first, then `GROQ_API_KEY`.
    ///
    /// Returns `None` when neither is set; the completion client turns that
    /// into a configuration error at call time.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var("GROQ_API_KEY")
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

/// Persistence store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file holding history and preferences.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory that chat-history exports are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            export_dir: default_export_dir(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("tutor").join("tutor.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("tutor.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_export_dir() -> String {
    ".".to_string()
}

/// Offline cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OfflineConfig {
    /// Prefix of cache generation names; the version is appended.
    #[serde(default = "default_cache_prefix")]
    pub cache_prefix: String,

    /// Page served for navigations while the network is unreachable.
    #[serde(default = "default_fallback_page")]
    pub fallback_page: String,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            cache_prefix: default_cache_prefix(),
            fallback_page: default_fallback_page(),
        }
    }
}

fn default_cache_prefix() -> String {
    "ai-teacher-v".to_string()
}

fn default_fallback_page() -> String {
    "/index.html".to_string()
}
