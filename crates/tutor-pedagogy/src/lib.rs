// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure conversation analysis for the tutor client.
//!
//! Every function here is deterministic and performs no I/O: intent
//! classification of the latest question, comprehension-level estimation
//! over a trailing window, system prompt composition, and sampling
//! parameter selection. [`plan_request`] combines all four.

pub mod comprehension;
pub mod composer;
pub mod intent;
pub mod params;
pub mod plan;

pub use comprehension::{LevelAssessment, LevelSignals, analyze_response, assess, estimate_level};
pub use composer::compose_prompt;
pub use intent::{classify, latest_user_text};
pub use params::{DEFAULT_PARAMETERS, select_parameters};
pub use plan::{RequestPlan, plan_request};
