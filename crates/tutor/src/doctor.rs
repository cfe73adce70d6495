// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tutor doctor` command implementation.
//!
//! Reports configuration, credential presence (never the value), store
//! health, and the offline cache generation.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;
use tutor_config::TutorConfig;
use tutor_core::{HealthStatus, PluginAdapter, TutorError};
use tutor_groq::GroqProvider;
use tutor_offline::generation_name;
use tutor_storage::SqliteStore;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }

    fn from_health(name: &str, health: Result<HealthStatus, TutorError>, start: Instant) -> Self {
        match health {
            Ok(HealthStatus::Healthy) => Self::new(name, CheckStatus::Pass, "healthy", start),
            Ok(HealthStatus::Degraded(why)) => Self::new(name, CheckStatus::Warn, why, start),
            Ok(HealthStatus::Unhealthy(why)) => Self::new(name, CheckStatus::Fail, why, start),
            Err(e) => Self::new(name, CheckStatus::Fail, e.to_string(), start),
        }
    }
}

/// Runs the `tutor doctor` command.
pub async fn run_doctor(config: &TutorConfig) -> Result<(), TutorError> {
    let use_color = std::io::stdout().is_terminal();
    let results = vec![
        check_config(config),
        check_credential(config).await,
        check_store(&config.storage.database_path).await,
        check_offline(config),
    ];

    println!();
    println!("  tutor doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        let word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {word} found.");
    }
    println!();
    Ok(())
}

fn render(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        );
    }
    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), result.message.normal()),
        CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("✗".red(), result.message.red()),
    };
    format!(
        "    {symbol} {:<20} {message} ({duration_ms}ms)",
        result.name
    )
}

fn check_config(config: &TutorConfig) -> CheckResult {
    let start = Instant::now();
    CheckResult::new(
        "Configuration",
        CheckStatus::Pass,
        format!("valid (agent.name={})", config.agent.name),
        start,
    )
}

async fn check_credential(config: &TutorConfig) -> CheckResult {
    let start = Instant::now();
    match GroqProvider::from_config(&config.groq) {
        Ok(provider) => CheckResult::from_health("Groq API key", provider.health_check().await, start),
        Err(e) => CheckResult::new("Groq API key", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_store(db_path: &str) -> CheckResult {
    let start = Instant::now();
    if !Path::new(db_path).exists() {
        return CheckResult::new(
            "Store",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first run)"),
            start,
        );
    }
    match SqliteStore::open_path(db_path) {
        Ok(store) => CheckResult::from_health("Store", store.health_check().await, start),
        Err(e) => CheckResult::new("Store", CheckStatus::Fail, format!("open failed: {e}"), start),
    }
}

fn check_offline(config: &TutorConfig) -> CheckResult {
    let start = Instant::now();
    let generation = generation_name(&config.offline.cache_prefix, env!("CARGO_PKG_VERSION"));
    CheckResult::new(
        "Offline cache",
        CheckStatus::Pass,
        format!("generation {generation}, fallback {}", config.offline.fallback_page),
        start,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_uses_tags() {
        let result = CheckResult {
            name: "Store".into(),
            status: CheckStatus::Warn,
            message: "not found".into(),
            duration: Duration::from_millis(3),
        };
        let line = render(&result, false);
        assert!(line.contains("[WARN]"));
        assert!(line.contains("not found (3ms)"));
    }

    #[test]
    fn health_maps_to_status() {
        let start = Instant::now();
        let degraded = CheckResult::from_health("x", Ok(HealthStatus::Degraded("no key".into())), start);
        assert_eq!(degraded.status, CheckStatus::Warn);
        assert_eq!(degraded.message, "no key");
        let failed = CheckResult::from_health("x", Err(TutorError::Internal("boom".into())), start);
        assert_eq!(failed.status, CheckStatus::Fail);
    }

    #[tokio::test]
    async fn missing_database_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let result = check_store(path.to_str().unwrap()).await;
        assert_eq!(result.status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn existing_database_is_healthy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tutor.db");
        let path = path.to_str().unwrap();
        drop(SqliteStore::open_path(path).unwrap());
        assert_eq!(check_store(path).await.status, CheckStatus::Pass);
    }

    #[test]
    fn offline_check_reports_generation() {
        let config = TutorConfig::default();
        let result = check_offline(&config);
        assert!(result.message.starts_with("generation ai-teacher-v"));
    }
}
