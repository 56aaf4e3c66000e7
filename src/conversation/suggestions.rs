//! Suggested replies shown to the user after each assistant turn

use super::Stage;

/// Upper bound on suggestions returned to the caller
pub const MAX_SUGGESTIONS: usize = 4;

/// Suggested replies for a stage, at most [`MAX_SUGGESTIONS`]
pub fn suggestions_for(stage: Stage) -> &'static [&'static str] {
    let all: &'static [&'static str] = match stage {
        Stage::Greeting => &[
            "I'm having career-related issues",
            "I'm facing problems in my relationships",
            "I'm experiencing financial difficulties",
            "I have health concerns",
        ],
        Stage::Question1 => &[
            "A few weeks",
            "Several months",
            "Over a year",
            "Just recently started",
        ],
        Stage::Question2 => &[
            "Affects my work performance",
            "Impacts my relationships",
            "Affects my health",
            "Affects my sleep",
        ],
        Stage::Question3 => &[
            "I've tried meditation",
            "I've prayed and done puja",
            "I've consulted doctors",
            "I've tried changing my routine",
        ],
        Stage::Question4 => &[
            "I feel stressed and anxious",
            "I feel frustrated and angry",
            "I feel hopeless",
            "I feel confused",
        ],
        Stage::Question5 => &[
            "Recurring arguments",
            "Sleep problems",
            "Loss of appetite",
            "Difficulty concentrating",
        ],
        Stage::Analysis => &[
            "Thank you for the remedies",
            "How long should I follow these?",
            "Can you explain more about the mantras?",
            "Thank you, I'll start following these",
        ],
        Stage::Ongoing => &[
            "Thank you for your guidance",
            "I have another question",
            "Can you help with something else?",
            "Thank you, that's all I needed",
        ],
    };
    &all[..all.len().min(MAX_SUGGESTIONS)]
}
