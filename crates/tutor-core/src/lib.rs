// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the tutor client.
//!
//! Holds the conversation data model, the tags derived from it, the shared
//! error type, and the traits through which the UI layer talks to the
//! completion endpoint and the persistence store.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TutorError;
pub use traits::{ChunkSink, CompletionProvider, KeyValueStore, PluginAdapter};
pub use types::{
    AdapterType, ComprehensionLevel, GenerationParameters, HealthStatus, Message, QuestionType,
    ResponseAnalysis, Role, Understanding,
};
