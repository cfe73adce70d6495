// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation session shared by the `tutor` subcommands.

pub mod session;

pub use session::{TutorSession, resolve_model};
