// SPDX-FileCopyrightText: 2026 Tutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comprehension-level estimation from the recent conversation window.
//!
//! Each user message in the trailing window is scored for complexity,
//! confidence, follow-up questioning, and acknowledgment. The aggregates
//! are then matched against an ordered tier-rule table; the first rule
//! that applies decides the level and `Beginner` is the fallback.

use std::sync::LazyLock;

use regex::Regex;
use tutor_core::{ComprehensionLevel, Message, ResponseAnalysis, Role, Understanding};

/// Number of trailing messages inspected.
pub const WINDOW: usize = 6;

/// Message count above which a window without user turns counts as intermediate.
const NO_USER_FALLBACK_COUNT: usize = 10;

static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)懂了|明白了|理解了|清楚了|知道了|了解|我懂|我明白|原來如此|對對對|沒錯|是的|對的")
        .unwrap()
});

static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)不懂|不明白|不理解|不清楚|不知道|還是不懂|還是不明白|不太懂|不太明白|有點難|不太清楚|困惑|疑惑")
        .unwrap()
});

static FOLLOW_UP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)為什麼|為何|怎麼|如何|什麼|為什麼會|怎麼會|如何做|什麼是|為什麼是").unwrap()
});

static ADVANCED_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)原理|機制|理論|系統|架構|演算法|資料結構|抽象|封裝|繼承|多型|設計模式|框架|架構模式|最佳實踐|優化|效能|擴展性|可維護性")
        .unwrap()
});

static INTERMEDIATE_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)功能|方法|步驟|流程|概念|定義|類型|變數|函數|類別|物件|介面").unwrap()
});

static BASIC_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)這個|那個|什麼|怎麼|如何|為什麼|可以|不能|會|不會|是|不是").unwrap()
});

/// Terminology tier of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminology {
    Advanced,
    Intermediate,
    Basic,
    None,
}

fn terminology(text: &str) -> Terminology {
    if ADVANCED_TERMS.is_match(text) {
        Terminology::Advanced
    } else if INTERMEDIATE_TERMS.is_match(text) {
        Terminology::Intermediate
    } else if BASIC_TERMS.is_match(text) {
        Terminology::Basic
    } else {
        Terminology::None
    }
}

/// Score a single student message.
pub fn analyze_response(message: &Message) -> ResponseAnalysis {
    let content = message.content.as_str();
    if content.is_empty() {
        return ResponseAnalysis::EMPTY;
    }

    let length = message.utf16_len();
    let terms = terminology(content);

    let mut complexity = match length {
        n if n > 300 => 3,
        n if n > 150 => 2,
        n if n > 50 => 1,
        _ => 0,
    };
    complexity += match terms {
        Terminology::Advanced => 3,
        Terminology::Intermediate => 2,
        Terminology::Basic => 1,
        Terminology::None => 0,
    };

    let has_questions = FOLLOW_UP.is_match(content);

    let understanding = if POSITIVE.is_match(content) {
        Understanding::Positive
    } else if NEGATIVE.is_match(content) {
        Understanding::Negative
    } else {
        Understanding::Unknown
    };

    let mut confidence = match length {
        n if n > 100 => 2,
        n if n > 30 => 1,
        _ => 0,
    };
    confidence += match terms {
        Terminology::Advanced => 2,
        Terminology::Intermediate => 1,
        Terminology::Basic | Terminology::None => 0,
    };
    if understanding == Understanding::Positive {
        confidence += 1;
    }
    if has_questions && understanding != Understanding::Negative {
        confidence += 1;
    }

    ResponseAnalysis {
        complexity,
        confidence,
        has_questions,
        understanding,
    }
}

/// Aggregated window signals the tier rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSignals {
    /// Size of the whole conversation, not just the window.
    pub message_count: usize,
    pub avg_complexity: f64,
    pub avg_confidence: f64,
    pub has_negative: bool,
    pub has_positive: bool,
    pub has_active_questions: bool,
    /// Advanced terminology anywhere in the window, any author.
    pub has_advanced_terms: bool,
    /// Intermediate terminology anywhere in the window, any author.
    pub has_intermediate_terms: bool,
}

/// One row of the tier-rule table.
#[derive(Debug, Clone, Copy)]
pub struct TierRule {
    pub level: ComprehensionLevel,
    pub reason: &'static str,
    pub applies: fn(&LevelSignals) -> bool,
}

fn confused_and_simple(s: &LevelSignals) -> bool {
    s.has_negative && s.avg_complexity < 2.0 && !s.has_active_questions
}

fn advanced_vocabulary_with_high_scores(s: &LevelSignals) -> bool {
    s.has_advanced_terms && s.avg_complexity >= 4.0 && s.avg_confidence >= 3.0
}

fn intermediate_vocabulary_with_moderate_scores(s: &LevelSignals) -> bool {
    s.has_intermediate_terms && s.avg_complexity >= 2.0 && s.avg_confidence >= 2.0
}

fn long_and_engaged(s: &LevelSignals) -> bool {
    s.message_count > 10 && (s.has_active_questions || s.has_positive) && s.avg_complexity >= 1.5
}

fn medium_length_with_substance(s: &LevelSignals) -> bool {
    s.message_count > 5 && s.avg_complexity >= 2.0 && s.avg_confidence >= 1.5
}

fn very_long_with_advanced_vocabulary(s: &LevelSignals) -> bool {
    s.message_count > 15 && s.has_advanced_terms && s.avg_complexity >= 2.5
}

fn actively_questioning(s: &LevelSignals) -> bool {
    s.has_active_questions && s.avg_complexity >= 2.0 && s.message_count > 3
}

/// Tier rules in strict priority order; the first applicable row wins.
pub const TIER_RULES: &[TierRule] = &[
    TierRule {
        level: ComprehensionLevel::Beginner,
        reason: "student reports confusion and answers are simple",
        applies: confused_and_simple,
    },
    TierRule {
        level: ComprehensionLevel::Advanced,
        reason: "advanced terminology with high complexity and confidence",
        applies: advanced_vocabulary_with_high_scores,
    },
    TierRule {
        level: ComprehensionLevel::Intermediate,
        reason: "intermediate terminology with moderate complexity and confidence",
        applies: intermediate_vocabulary_with_moderate_scores,
    },
    TierRule {
        level: ComprehensionLevel::Intermediate,
        reason: "long conversation with active questions or acknowledgments",
        applies: long_and_engaged,
    },
    TierRule {
        level: ComprehensionLevel::Intermediate,
        reason: "medium-length conversation with substantive answers",
        applies: medium_length_with_substance,
    },
    TierRule {
        level: ComprehensionLevel::Advanced,
        reason: "very long conversation using advanced terminology",
        applies: very_long_with_advanced_vocabulary,
    },
    TierRule {
        level: ComprehensionLevel::Intermediate,
        reason: "active follow-up questions with some complexity",
        applies: actively_questioning,
    },
];

/// Outcome of a level estimation, with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelAssessment {
    pub level: ComprehensionLevel,
    pub reason: &'static str,
    /// `None` when the decision was made before any message was analyzed.
    pub signals: Option<LevelSignals>,
}

/// Compute window aggregates, or `None` when the window has no user turns.
pub fn window_signals(conversation: &[Message]) -> Option<LevelSignals> {
    let window = &conversation[conversation.len().saturating_sub(WINDOW)..];
    let analyses: Vec<ResponseAnalysis> = window
        .iter()
        .filter(|m| m.role == Role::User)
        .map(analyze_response)
        .collect();

    if analyses.is_empty() {
        return None;
    }

    let n = analyses.len() as f64;
    let avg_complexity = analyses.iter().map(|a| f64::from(a.complexity)).sum::<f64>() / n;
    let avg_confidence = analyses.iter().map(|a| f64::from(a.confidence)).sum::<f64>() / n;

    let window_text = window
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Some(LevelSignals {
        message_count: conversation.len(),
        avg_complexity,
        avg_confidence,
        has_negative: analyses
            .iter()
            .any(|a| a.understanding == Understanding::Negative),
        has_positive: analyses
            .iter()
            .any(|a| a.understanding == Understanding::Positive),
        has_active_questions: analyses.iter().any(|a| a.has_questions),
        has_advanced_terms: ADVANCED_TERMS.is_match(&window_text),
        has_intermediate_terms: INTERMEDIATE_TERMS.is_match(&window_text),
    })
}

/// Estimate the level and report which rule decided it.
pub fn assess(conversation: &[Message]) -> LevelAssessment {
    if conversation.is_empty() {
        return LevelAssessment {
            level: ComprehensionLevel::Beginner,
            reason: "empty conversation",
            signals: None,
        };
    }

    let Some(signals) = window_signals(conversation) else {
        let level = if conversation.len() > NO_USER_FALLBACK_COUNT {
            ComprehensionLevel::Intermediate
        } else {
            ComprehensionLevel::Beginner
        };
        return LevelAssessment {
            level,
            reason: "no user turns in window, decided by message count",
            signals: None,
        };
    };

    TIER_RULES
        .iter()
        .find(|rule| (rule.applies)(&signals))
        .map(|rule| LevelAssessment {
            level: rule.level,
            reason: rule.reason,
            signals: Some(signals),
        })
        .unwrap_or(LevelAssessment {
            level: ComprehensionLevel::Beginner,
            reason: "no tier rule matched",
            signals: Some(signals),
        })
}

/// Estimate the student's comprehension level from the conversation.
pub fn estimate_level(conversation: &[Message]) -> ComprehensionLevel {
    assess(conversation).level
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(s: &str, n: usize) -> String {
        s.repeat(n)
    }

    #[test]
    fn empty_message_scores_zero() {
        assert_eq!(analyze_response(&Message::user("")), ResponseAnalysis::EMPTY);
    }

    #[test]
    fn short_positive_acknowledgment() {
        let a = analyze_response(&Message::user("懂了"));
        assert_eq!(a.understanding, Understanding::Positive);
        assert_eq!(a.complexity, 0);
        assert_eq!(a.confidence, 1);
        assert!(!a.has_questions);
    }

    #[test]
    fn negative_acknowledgment_blocks_question_bonus() {
        // "怎麼" is a follow-up marker and a basic term; "不懂" is negative.
        let a = analyze_response(&Message::user("我還是不懂怎麼做"));
        assert_eq!(a.understanding, Understanding::Negative);
        assert!(a.has_questions);
        assert_eq!(a.complexity, 1);
        assert_eq!(a.confidence, 0);
    }

    #[test]
    fn long_advanced_message_scores_high() {
        let text = format!("我想了解演算法的效能{}", repeat("細節", 160));
        let a = analyze_response(&Message::user(text));
        // >300 chars (+3) and advanced terms (+3).
        assert_eq!(a.complexity, 6);
        // >100 chars (+2), advanced (+2), positive via 了解 (+1).
        assert_eq!(a.confidence, 5);
        assert_eq!(a.understanding, Understanding::Positive);
    }

    #[test]
    fn length_buckets_use_utf16_units() {
        // 60 CJK characters: >50 but well under 150 even though it is 180 bytes.
        let a = analyze_response(&Message::user(repeat("字", 60)));
        assert_eq!(a.complexity, 1);
        assert_eq!(a.confidence, 1);
    }

    #[test]
    fn astral_characters_count_as_two_units() {
        // 26 chars but 52 UTF-16 units: over both the 50 and 30 buckets.
        let a = analyze_response(&Message::user(repeat("😀", 26)));
        assert_eq!(a.complexity, 1);
        assert_eq!(a.confidence, 1);
    }

    #[test]
    fn empty_conversation_is_beginner() {
        let r = assess(&[]);
        assert_eq!(r.level, ComprehensionLevel::Beginner);
        assert!(r.signals.is_none());
    }

    #[test]
    fn no_user_turns_uses_message_count() {
        let few: Vec<Message> = (0..4).map(|_| Message::assistant("說明")).collect();
        assert_eq!(estimate_level(&few), ComprehensionLevel::Beginner);

        let mut many: Vec<Message> = (0..5)
            .flat_map(|_| [Message::user("嗯"), Message::assistant("好")])
            .collect();
        many.extend((0..6).map(|_| Message::assistant("長篇說明")));
        assert_eq!(many.len(), 16);
        assert_eq!(estimate_level(&many), ComprehensionLevel::Intermediate);
    }

    #[test]
    fn confusion_overrides_advanced_vocabulary() {
        let conversation = vec![
            Message::assistant("這涉及演算法與資料結構的原理"),
            Message::user("不懂"),
        ];
        let r = assess(&conversation);
        assert_eq!(r.level, ComprehensionLevel::Beginner);
        assert_eq!(r.reason, TIER_RULES[0].reason);
    }

    #[test]
    fn advanced_student_reaches_advanced() {
        let answer = format!(
            "我認為這個架構的效能瓶頸在於資料結構選擇，{}",
            repeat("因為快取命中率與記憶體配置會互相影響", 12)
        );
        let conversation = vec![
            Message::user(answer.clone()),
            Message::assistant("很好的觀察"),
            Message::user(answer),
        ];
        let r = assess(&conversation);
        assert_eq!(r.level, ComprehensionLevel::Advanced);
        assert_eq!(r.reason, TIER_RULES[1].reason);
    }

    #[test]
    fn intermediate_vocabulary_reaches_intermediate() {
        // 41 chars: >30 (+1 confidence), intermediate term (+2 complexity, +1 confidence).
        let text = format!("這個函數的功能{}", repeat("是", 34));
        let conversation = vec![Message::user(text)];
        let r = assess(&conversation);
        assert_eq!(r.level, ComprehensionLevel::Intermediate);
        assert_eq!(r.reason, TIER_RULES[2].reason);
    }

    #[test]
    fn tier_rules_have_fixed_priority() {
        let levels: Vec<ComprehensionLevel> = TIER_RULES.iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                ComprehensionLevel::Beginner,
                ComprehensionLevel::Advanced,
                ComprehensionLevel::Intermediate,
                ComprehensionLevel::Intermediate,
                ComprehensionLevel::Intermediate,
                ComprehensionLevel::Advanced,
                ComprehensionLevel::Intermediate,
            ]
        );
    }

    #[test]
    fn rule_predicates_in_isolation() {
        let base = LevelSignals {
            message_count: 4,
            avg_complexity: 2.0,
            avg_confidence: 1.0,
            has_negative: false,
            has_positive: false,
            has_active_questions: true,
            has_advanced_terms: false,
            has_intermediate_terms: false,
        };
        assert!(!confused_and_simple(&base));
        assert!(actively_questioning(&base));
        assert!(!medium_length_with_substance(&base));

        let long = LevelSignals {
            message_count: 16,
            avg_complexity: 2.5,
            has_advanced_terms: true,
            ..base
        };
        assert!(very_long_with_advanced_vocabulary(&long));
        assert!(!advanced_vocabulary_with_high_scores(&long));
    }

    #[test]
    fn twelve_short_turns_without_terms_are_not_advanced() {
        let conversation: Vec<Message> = (0..6)
            .flat_map(|i| {
                [
                    Message::user(format!("好{i}")),
                    Message::assistant("嗯嗯，繼續"),
                ]
            })
            .collect();
        assert_eq!(conversation.len(), 12);
        assert_ne!(estimate_level(&conversation), ComprehensionLevel::Advanced);
    }
}
