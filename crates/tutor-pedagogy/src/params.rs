// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sampling-parameter selection from conversation size.

use tutor_core::{GenerationParameters, Message};

pub const DEFAULT_PARAMETERS: GenerationParameters = GenerationParameters {
    temperature: 0.7,
    max_tokens: 2048,
};

/// Long conversations get cooler, shorter replies.
const LONG_CONVERSATION: GenerationParameters = GenerationParameters {
    temperature: 0.6,
    max_tokens: 1536,
};

const LARGE_CONTEXT: GenerationParameters = GenerationParameters {
    temperature: 0.65,
    max_tokens: 1792,
};

/// Opening turns get the warmest, longest replies.
const OPENING: GenerationParameters = GenerationParameters {
    temperature: 0.75,
    max_tokens: 2560,
};

const LONG_CONVERSATION_COUNT: usize = 10;
const LARGE_CONTEXT_UNITS: usize = 2000;
const OPENING_COUNT: usize = 3;

/// Choose temperature and token budget for the next request.
///
/// The opening-turn rule applies last and overrides the others.
pub fn select_parameters(conversation: &[Message]) -> GenerationParameters {
    let count = conversation.len();
    let total_len: usize = conversation.iter().map(Message::utf16_len).sum();

    let selected = if count > LONG_CONVERSATION_COUNT {
        LONG_CONVERSATION
    } else if total_len > LARGE_CONTEXT_UNITS {
        LARGE_CONTEXT
    } else {
        DEFAULT_PARAMETERS
    };

    if count < OPENING_COUNT {
        OPENING
    } else {
        selected
    }
}
