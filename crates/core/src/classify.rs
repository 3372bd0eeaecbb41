//! Utterance Classification
//!
//! This module decides which of the home agent's two request paths an
//! utterance belongs to. Classification is policy, never failure: ambiguous
//! input and internal errors resolve to the complex path rather than
//! surfacing an error to the dialog loop.

use crate::turn::Utterance;
use async_trait::async_trait;
use std::fmt;

/// The two routing paths offered by the home agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClassification {
    /// A direct device command or state query, served by the low-latency path.
    Simple,
    /// A multi-step, scene/rule, or ambiguous request, served by the
    /// higher-capability path.
    Complex,
}

impl fmt::Display for RequestClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestClassification::Simple => write!(f, "simple"),
            RequestClassification::Complex => write!(f, "complex"),
        }
    }
}

/// Defines the contract for anything that can classify an utterance.
///
/// This abstraction allows the router to swap between classification
/// approaches (deterministic rules, an LLM verdict) while keeping the
/// dispatch logic identical. Implementations must be total: every utterance
/// maps to exactly one classification.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifies one utterance. Never fails; when in doubt, implementations
    /// return [`RequestClassification::Complex`].
    async fn classify(&self, utterance: &Utterance) -> RequestClassification;
}

/// Word stems that signal scene, rule, or schedule authoring.
const AUTOMATION_STEMS: &[&str] = &["routine", "scene", "schedul", "automat", "rule", "remind"];

/// Function words that signal triggers or conditional logic.
const TRIGGER_WORDS: &[&str] = &[
    "when", "whenever", "if", "then", "every", "until", "after", "before", "later", "tonight",
    "tomorrow", "morning", "evening",
];

/// Leading words of device state questions.
const QUERY_STARTERS: &[&str] = &[
    "is", "are", "was", "were", "do", "does", "did", "what", "which", "how", "who", "where",
];

/// Imperative stems of direct device actions.
const ACTION_STEMS: &[&str] = &[
    "turn", "switch", "dim", "brighten", "open", "close", "lock", "unlock", "start", "stop",
    "play", "pause", "set", "raise", "lower", "mute", "unmute",
];

/// A deterministic, rule-based implementation of [`IntentClassifier`].
///
/// The rules approximate the routing policy the system prompt spells out for
/// a model-driven host: automation and trigger vocabulary means complex,
/// state questions and single device commands mean simple, and anything
/// unrecognized falls through to complex.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IntentClassifier for HeuristicClassifier {
    async fn classify(&self, utterance: &Utterance) -> RequestClassification {
        classify_text(utterance.as_str())
    }
}

fn classify_text(text: &str) -> RequestClassification {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .collect();

    if words.iter().any(|word| is_automation_word(word)) {
        return RequestClassification::Complex;
    }

    if words
        .first()
        .is_some_and(|word| QUERY_STARTERS.contains(word))
    {
        return RequestClassification::Simple;
    }

    let action_count = words.iter().filter(|word| is_action_word(word)).count();
    if action_count == 1 {
        RequestClassification::Simple
    } else {
        // Zero recognized actions means the intent is ambiguous; two or more
        // means a multi-step request. Both take the complex path.
        RequestClassification::Complex
    }
}

fn is_automation_word(word: &str) -> bool {
    if AUTOMATION_STEMS.iter().any(|stem| word.starts_with(stem)) {
        return true;
    }
    if TRIGGER_WORDS.contains(&word) {
        return true;
    }
    // Clock words like "7am" or "10pm" are schedule triggers.
    (word.ends_with("am") || word.ends_with("pm"))
        && word.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn is_action_word(word: &str) -> bool {
    ACTION_STEMS.iter().any(|stem| {
        word.strip_prefix(stem)
            .is_some_and(|rest| matches!(rest, "" | "s" | "ed" | "ing"))
    })
}
