// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics rendered through miette.
//!
//! Both Figment extraction failures and semantic validation failures end up
//! as [`ConfigError`]s. Each one names the dotted key it is about
//! (`groq.endpoint`) and, when the key can be found in one of the loaded
//! `tutor.toml` files, carries a labelled span into that file.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Section names of `tutor.toml`, in file order.
pub const SECTION_NAMES: &[&str] = &["agent", "groq", "storage", "offline"];

/// Fields accepted by each section.
pub const SECTION_FIELDS: &[(&str, &[&str])] = &[
    ("agent", &["name", "log_level"]),
    ("groq", &["api_key", "endpoint", "default_model", "timeout_secs"]),
    ("storage", &["database_path", "export_dir"]),
    ("offline", &["cache_prefix", "fallback_page"]),
];

/// Jaro-Winkler score a candidate needs before it is offered as a correction.
const SIMILARITY: f64 = 0.8;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section accepts, or a key placed in the wrong section.
    #[error("unknown configuration key `{path}`")]
    #[diagnostic(code(tutor::config::unknown_key), help("{hint}"))]
    UnknownKey {
        /// The offending field name as written.
        key: String,
        /// Dotted path including the section, e.g. `groq.endpont`.
        path: String,
        /// Replacement to offer, as a dotted path when it lives elsewhere.
        suggestion: Option<String>,
        hint: String,
        #[label("not a tutor setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for `{path}`: found {found}")]
    #[diagnostic(code(tutor::config::invalid_type), help("`{path}` expects {expected}"))]
    InvalidType {
        path: String,
        found: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(tutor::config::missing_key),
        help("add `{key} = <value>` to your tutor.toml")
    )]
    MissingKey { key: String },

    /// A value that parsed but is not usable.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(tutor::config::validation))]
    Validation {
        /// Dotted path of the offending key.
        key: String,
        message: String,
        #[label("{message}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("configuration error: {0}")]
    #[diagnostic(code(tutor::config::other))]
    Other(String),
}

impl ConfigError {
    /// A validation failure for `key`, without source location yet.
    pub fn validation(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            key: key.to_string(),
            message: message.into(),
            span: None,
            src: None,
        }
    }

    /// Dotted key this diagnostic is about, when it has a location slot.
    fn located_key(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownKey { path, .. } | ConfigError::InvalidType { path, .. } => {
                Some(path)
            }
            ConfigError::Validation { key, .. } => Some(key),
            ConfigError::MissingKey { .. } | ConfigError::Other(_) => None,
        }
    }

    /// Points the diagnostic at its key in the first of `sources` that sets it.
    ///
    /// `sources` are `(display path, content)` pairs in priority order.
    pub fn with_location(mut self, sources: &[(String, String)]) -> Self {
        let Some(key) = self.located_key() else {
            return self;
        };
        let Some((name, content, offset, len)) = sources.iter().find_map(|(name, content)| {
            key_location(content, key).map(|(offset, len)| (name, content, offset, len))
        }) else {
            return self;
        };

        match &mut self {
            ConfigError::UnknownKey { span, src, .. }
            | ConfigError::InvalidType { span, src, .. }
            | ConfigError::Validation { span, src, .. }
                if span.is_none() =>
            {
                *span = Some(SourceSpan::new(offset.into(), len));
                *src = Some(NamedSource::new(name, content.clone()));
            }
            _ => {}
        }
        self
    }
}

/// Section that declares `field`, if any.
pub fn section_of(field: &str) -> Option<&'static str> {
    SECTION_FIELDS
        .iter()
        .find(|(_, fields)| fields.contains(&field))
        .map(|(section, _)| *section)
}

/// Closest candidate to `unknown` by Jaro-Winkler similarity.
pub fn closest<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (*c, strsim::jaro_winkler(unknown, c)))
        .filter(|(_, score)| *score >= SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Builds the `UnknownKey` diagnostic for `key` found in `section` (`None` at top level).
pub fn unknown_key(section: Option<&str>, key: &str, expected: &[&str]) -> ConfigError {
    let path = match section {
        Some(section) => format!("{section}.{key}"),
        None => key.to_string(),
    };
    let scope = match section {
        Some(section) => format!("[{section}] accepts"),
        None => "sections are".to_string(),
    };

    let misplaced = section_of(key).filter(|home| Some(*home) != section);
    let (suggestion, hint) = match (misplaced, closest(key, expected)) {
        (Some(home), _) => (
            Some(format!("{home}.{key}")),
            format!("`{key}` belongs in the [{home}] section"),
        ),
        (None, Some(near)) => (
            Some(near.to_string()),
            format!("did you mean `{near}`? {scope}: {}", expected.join(", ")),
        ),
        (None, None) => (None, format!("{scope}: {}", expected.join(", "))),
    };

    ConfigError::UnknownKey {
        key: key.to_string(),
        path,
        suggestion,
        hint,
        span: None,
        src: None,
    }
}

/// Converts a Figment error into located diagnostics.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let origin = origin_file(&error);
            let sources: Vec<(String, String)> = match &origin {
                Some(file) => toml_sources
                    .iter()
                    .filter(|(name, _)| name == file)
                    .cloned()
                    .collect(),
                None => toml_sources.to_vec(),
            };
            let section = error.path.first().map(String::as_str);

            let diagnostic = match &error.kind {
                Kind::UnknownField(field, expected) => unknown_key(section, field, expected),
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.to_string(),
                },
                Kind::InvalidType(found, expected) => ConfigError::InvalidType {
                    path: error.path.join("."),
                    found: found.to_string(),
                    expected: expected.clone(),
                    span: None,
                    src: None,
                },
                _ => ConfigError::Other(error.to_string()),
            };
            diagnostic.with_location(&sources)
        })
        .collect()
}

fn origin_file(error: &figment::Error) -> Option<String> {
    match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(path) => Some(path.display().to_string()),
        _ => None,
    }
}

/// Byte offset and length of the key named by the dotted `path` in TOML `content`.
///
/// A one-segment path matches a section header or a top-level key; a
/// two-segment path matches `field = ...` inside `[section]`.
pub fn key_location(content: &str, path: &str) -> Option<(usize, usize)> {
    let (want_section, want_field) = match path.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, path),
    };

    let mut section: Option<&str> = None;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let indent = line.len() - line.trim_start().len();
        let body = line.trim();

        if let Some(header) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
            let name = header.trim();
            if want_section.is_none() && name == want_field {
                let at = start + indent + 1 + (header.len() - header.trim_start().len());
                return Some((at, name.len()));
            }
            section = Some(name);
            continue;
        }

        let Some((name, _)) = body.split_once('=') else {
            continue;
        };
        if name.trim_end() == want_field && section == want_section {
            return Some((start + indent, want_field.len()));
        }
    }
    None
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
