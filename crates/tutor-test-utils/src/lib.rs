// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for tutor integration tests.

pub mod fixtures;
pub mod mock_provider;

pub use fixtures::{alternating, conversation, sse_body};
pub use mock_provider::{MockProvider, MockReply, RecordedCall};
