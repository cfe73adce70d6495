// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value persistence contract for history and preferences.

use crate::error::TutorError;

/// A string-keyed, string-valued store.
///
/// Backends report failures as errors; the typed helpers layered on top
/// decide whether a failure is swallowed (fail-soft) or surfaced.
pub trait KeyValueStore: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), TutorError>;

    /// Returns the value under `key`, or `None` when absent.
    fn load(&self, key: &str) -> Result<Option<String>, TutorError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), TutorError>;
}
