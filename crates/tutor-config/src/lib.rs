// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the tutor client.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use tutor_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("model: {}", config.groq.default_model);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TutorConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// On Figment errors, converts to miette diagnostics with typo suggestions.
pub fn load_and_validate() -> Result<TutorConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validate_located(&config, &collect_toml_sources())?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a specific TOML file and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<TutorConfig, Vec<ConfigError>> {
    let sources = std::fs::read_to_string(path)
        .map(|c| vec![(path.display().to_string(), c)])
        .unwrap_or_default();
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validate_located(&config, &sources)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources)),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TutorConfig, Vec<ConfigError>> {
    let sources = vec![("<inline>".to_string(), toml_content.to_string())];
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validate_located(&config, &sources)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources)),
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("tutor.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("tutor.toml").display().to_string())
            .unwrap_or_else(|_| "tutor.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("tutor/tutor.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = std::path::Path::new("/etc/tutor/tutor.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}

fn validate_located(
    config: &TutorConfig,
    sources: &[(String, String)],
) -> Result<(), Vec<ConfigError>> {
    validation::validate_config(config).map_err(|errors| {
        errors
            .into_iter()
            .map(|e| e.with_location(sources))
            .collect()
    })
}
