// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tutor.toml` > `~/.config/tutor/tutor.toml` > `/etc/tutor/tutor.toml`
//! with environment variable overrides via `TUTOR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::diagnostic::SECTION_NAMES;
use crate::model::TutorConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tutor/tutor.toml` (system-wide)
/// 3. `~/.config/tutor/tutor.toml` (user XDG config)
/// 4. `./tutor.toml` (local directory)
/// 5. `TUTOR_*` environment variables
pub fn load_config() -> Result<TutorConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TutorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TutorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TutorConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TutorConfig::default()))
        .merge(Toml::file("/etc/tutor/tutor.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tutor/tutor.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tutor.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `TUTOR_<SECTION>_<FIELD>` onto `section.field`.
///
/// Figment hands the closure the name with the prefix stripped but its case
/// intact, so the name is lowercased before the section prefix is matched.
/// Only the leading section is split off: `TUTOR_GROQ_API_KEY` becomes
/// `groq.api_key`, not `groq.api.key`.
fn env_provider() -> Env {
    Env::prefixed("TUTOR_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Maps an env name (prefix already stripped) onto a config key path.
pub fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    SECTION_NAMES
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or(key)
}
