// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request derivation of prompt and parameters from a conversation.

use tracing::debug;
use tutor_core::{ComprehensionLevel, GenerationParameters, Message, QuestionType};

use crate::comprehension::estimate_level;
use crate::composer::compose_prompt;
use crate::intent::{classify, latest_user_text};
use crate::params::select_parameters;

/// Everything derived from a conversation snapshot for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub question_type: QuestionType,
    pub level: ComprehensionLevel,
    pub system_prompt: String,
    pub parameters: GenerationParameters,
}

impl RequestPlan {
    /// Outgoing message list: the system prompt followed by the conversation.
    pub fn messages(&self, conversation: &[Message]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::system(self.system_prompt.clone()));
        messages.extend_from_slice(conversation);
        messages
    }
}

pub fn plan_request(conversation: &[Message]) -> RequestPlan {
    let question_type = classify(latest_user_text(conversation));
    let level = estimate_level(conversation);
    let parameters = select_parameters(conversation);

    debug!(
        %question_type,
        %level,
        temperature = parameters.temperature,
        max_tokens = parameters.max_tokens,
        messages = conversation.len(),
        "planned completion request"
    );

    RequestPlan {
        question_type,
        level,
        system_prompt: compose_prompt(question_type, level),
        parameters,
    }
}
