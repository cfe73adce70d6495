// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question-intent classification of the latest user message.
//!
//! Ordered keyword-membership rules, first match wins. No model, no
//! network, no latency.

use tutor_core::{Message, QuestionType, Role};

/// Phrases asking the tutor to introduce itself. Checked before anything else.
pub const IDENTITY_PHRASES: &[&str] = &[
    "你是誰", "你是", "介紹自己", "介紹一下", "自我介紹", "你的身份", "你的角色",
    "你是什麼", "what are you", "who are you", "介紹你", "關於你",
];

/// What/why/how/explain family. Gates the nested categories below.
pub const QUESTION_WORDS: &[&str] = &[
    "什麼", "為何", "為什麼", "如何", "怎麼", "怎樣", "解釋", "說明", "介紹",
];

pub const EXAMPLE_WORDS: &[&str] = &["例子", "範例", "舉例", "例如", "像是"];
pub const COMPARE_WORDS: &[&str] = &["比較", "差異", "區別", "不同", "vs", "對比"];
pub const STEP_WORDS: &[&str] = &["步驟", "流程", "方法", "做法", "如何做"];
pub const CONCEPT_WORDS: &[&str] = &["概念", "定義", "原理", "理論", "基礎"];

/// Half-width and full-width question marks.
const QUESTION_MARKS: &[&str] = &["?", "？"];

/// One entry of a keyword rule table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub tag: QuestionType,
    pub keywords: &'static [&'static str],
}

/// Categories refined from a question-word match, in priority order.
/// A question-word match that hits none of them is `Explain`.
pub const QUESTION_RULES: &[KeywordRule] = &[
    KeywordRule { tag: QuestionType::Example, keywords: EXAMPLE_WORDS },
    KeywordRule { tag: QuestionType::Compare, keywords: COMPARE_WORDS },
    KeywordRule { tag: QuestionType::Step, keywords: STEP_WORDS },
    KeywordRule { tag: QuestionType::Concept, keywords: CONCEPT_WORDS },
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Classify a user utterance into a [`QuestionType`].
///
/// Total and deterministic: every input maps to exactly one tag.
pub fn classify(text: &str) -> QuestionType {
    let lower = text.to_lowercase();

    if contains_any(&lower, IDENTITY_PHRASES) {
        return QuestionType::Identity;
    }

    if contains_any(&lower, QUESTION_WORDS) {
        return QUESTION_RULES
            .iter()
            .find(|rule| contains_any(&lower, rule.keywords))
            .map(|rule| rule.tag)
            .unwrap_or(QuestionType::Explain);
    }

    if contains_any(&lower, QUESTION_MARKS) {
        return QuestionType::Question;
    }

    QuestionType::General
}

/// Content of the most recent user-authored message, or `""` when there is none.
pub fn latest_user_text(conversation: &[Message]) -> &str {
    conversation
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or("")
}
