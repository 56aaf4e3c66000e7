//! Conversation stages
//!
//! The stage is never stored as independent truth: it is a pure function of
//! how many user messages the session holds.

use crate::session::{Message, Role};
use serde::{Deserialize, Serialize};

/// Number of scripted questions asked between greeting and analysis
#[cfg(test)]
pub const QUESTION_COUNT: usize = 5;

/// Position in the consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
    #[serde(rename = "question_1")]
    Question1,
    #[serde(rename = "question_2")]
    Question2,
    #[serde(rename = "question_3")]
    Question3,
    #[serde(rename = "question_4")]
    Question4,
    #[serde(rename = "question_5")]
    Question5,
    Analysis,
    /// Absorbing stage once remedies have been delivered
    Ongoing,
}

impl Stage {
    #[cfg(test)]
    pub const ALL: [Stage; 8] = [
        Stage::Greeting,
        Stage::Question1,
        Stage::Question2,
        Stage::Question3,
        Stage::Question4,
        Stage::Question5,
        Stage::Analysis,
        Stage::Ongoing,
    ];

    /// Stage reached after `user_turns` user messages
    pub fn from_user_turns(user_turns: usize) -> Self {
        match user_turns {
            0 | 1 => Stage::Greeting,
            2 => Stage::Question1,
            3 => Stage::Question2,
            4 => Stage::Question3,
            5 => Stage::Question4,
            6 => Stage::Question5,
            7 => Stage::Analysis,
            _ => Stage::Ongoing,
        }
    }

    /// Wire label, e.g. `question_3`
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::Question1 => "question_1",
            Stage::Question2 => "question_2",
            Stage::Question3 => "question_3",
            Stage::Question4 => "question_4",
            Stage::Question5 => "question_5",
            Stage::Analysis => "analysis",
            Stage::Ongoing => "ongoing",
        }
    }

    /// 1-based question number for question stages
    pub fn question_number(self) -> Option<usize> {
        match self {
            Stage::Question1 => Some(1),
            Stage::Question2 => Some(2),
            Stage::Question3 => Some(3),
            Stage::Question4 => Some(4),
            Stage::Question5 => Some(5),
            _ => None,
        }
    }

    pub fn is_question(self) -> bool {
        self.question_number().is_some()
    }

    /// Stages whose reply is always scripted, never generated
    pub fn is_scripted(self) -> bool {
        self.is_question() || self == Stage::Analysis
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count the user-authored messages in a history
pub fn user_turns(messages: &[Message]) -> usize {
    messages.iter().filter(|m| m.role == Role::User).count()
}

/// Resolve the stage for a history
pub fn resolve_stage(messages: &[Message]) -> Stage {
    Stage::from_user_turns(user_turns(messages))
}
