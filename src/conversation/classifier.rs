//! Keyword classification of the user's answers
//!
//! Each field is read from one fixed answer position with case-insensitive
//! substring checks. The first matching rule wins. A missing answer leaves
//! that field at its default.

use crate::session::{Message, Role};
use serde::Serialize;

/// Answer positions read by the classifier
const PROBLEM_ANSWER: usize = 0;
const DURATION_ANSWER: usize = 2;
const IMPACT_ANSWER: usize = 3;
const EMOTION_ANSWER: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    Career,
    Relationship,
    Financial,
    Health,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Duration {
    Recent,
    #[default]
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Work,
    Relationships,
    Health,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Angry,
    Sad,
    Anxious,
    #[default]
    Stressed,
}

/// Classification tuple used to pick a remedy template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Classification {
    pub problem: ProblemType,
    pub duration: Duration,
    pub impact: Impact,
    pub emotion: Emotion,
}

#[cfg(test)]
impl Classification {
    pub fn new(problem: ProblemType, duration: Duration, impact: Impact, emotion: Emotion) -> Self {
        Self {
            problem,
            duration,
            impact,
            emotion,
        }
    }
}

const PROBLEM_RULES: &[(&[&str], ProblemType)] = &[
    (&["career", "job", "work", "business"], ProblemType::Career),
    (
        &["relationship", "marriage", "love", "partner", "family"],
        ProblemType::Relationship,
    ),
    (
        &["financial", "money", "wealth", "income", "debt"],
        ProblemType::Financial,
    ),
    (
        &["health", "sick", "disease", "pain", "medical"],
        ProblemType::Health,
    ),
];

const DURATION_RULES: &[(&[&str], Duration)] = &[
    (&["days", "week", "recent"], Duration::Recent),
    (&["months", "year", "long"], Duration::Long),
];

const IMPACT_RULES: &[(&[&str], Impact)] = &[
    (&["work", "job", "career"], Impact::Work),
    (&["relationship", "family", "marriage"], Impact::Relationships),
    (&["health", "sleep", "physical"], Impact::Health),
];

const EMOTION_RULES: &[(&[&str], Emotion)] = &[
    (&["angry", "frustrated", "irritated"], Emotion::Angry),
    (&["sad", "depressed", "hopeless"], Emotion::Sad),
    (&["anxious", "worried", "fear"], Emotion::Anxious),
];

/// First rule with a keyword contained in the answer at `index`
fn scan<T: Copy + Default, S: AsRef<str>>(answers: &[S], index: usize, rules: &[(&[&str], T)]) -> T {
    let Some(answer) = answers.get(index) else {
        return T::default();
    };
    let answer = answer.as_ref().to_lowercase();

    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| answer.contains(k)))
        .map_or_else(T::default, |(_, value)| *value)
}

/// Classify user answers, one entry per user message in order
pub fn classify<S: AsRef<str>>(answers: &[S]) -> Classification {
    Classification {
        problem: scan(answers, PROBLEM_ANSWER, PROBLEM_RULES),
        duration: scan(answers, DURATION_ANSWER, DURATION_RULES),
        impact: scan(answers, IMPACT_ANSWER, IMPACT_RULES),
        emotion: scan(answers, EMOTION_ANSWER, EMOTION_RULES),
    }
}

/// Lowercased user answers extracted from a history
pub fn user_answers(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.to_lowercase())
        .collect()
}

/// Classify the user answers found in a history
pub fn classify_history(messages: &[Message]) -> Classification {
    classify(&user_answers(messages))
}
