// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The completion client and the persistence store are consumed through
//! these traits so the UI layer can be driven by fakes in tests.

pub mod adapter;
pub mod provider;
pub mod store;

pub use adapter::PluginAdapter;
pub use provider::{ChunkSink, CompletionProvider};
pub use store::KeyValueStore;
