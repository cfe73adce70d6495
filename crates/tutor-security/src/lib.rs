// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keeps the bearer credential out of logs and chat notices.

pub mod redact;

pub use redact::{redact, register_secret, RedactingWriter, SecretList, REDACTED};
