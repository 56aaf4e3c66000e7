//! Property-based tests for the consultation flow
//!
//! These tests verify key invariants hold across arbitrary histories:
//! - The stage depends only on the number of user messages
//! - Stages never move backwards as user turns accumulate
//! - The classifier never panics and only reads its fixed answer slots
//! - Scripted replies are always one of the stage's options

use super::classifier::{classify, Classification};
use super::picker::Rotation;
use super::remedies::{template_for, RemedyTemplate};
use super::selector::{ReplySource, ResponseSelector};
use super::stage::user_turns;
use super::suggestions::MAX_SUGGESTIONS;
use super::*;
use crate::session::Message;
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Strategies
// ============================================================================

fn arb_message() -> impl Strategy<Value = Message> {
    (any::<bool>(), "[a-zA-Z ]{0,40}").prop_map(|(is_user, text)| {
        if is_user {
            Message::user(text)
        } else {
            Message::assistant(text)
        }
    })
}

fn arb_history() -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..24)
}

/// Answers drawn partly from the classifier's keyword vocabulary
fn arb_answer() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,30}",
        prop::sample::select(vec![
            "career", "love", "debt", "pain", "days", "months", "sleep", "family", "angry",
            "hopeless", "worried", "nothing",
        ])
        .prop_map(str::to_string),
    ]
}

fn stage_rank(stage: Stage) -> usize {
    Stage::ALL.iter().position(|s| *s == stage).unwrap_or(usize::MAX)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn stage_depends_only_on_user_count(history in arb_history()) {
        let n = user_turns(&history);
        let stage = resolve_stage(&history);
        prop_assert_eq!(stage, Stage::from_user_turns(n));
        // Idempotent
        prop_assert_eq!(stage, resolve_stage(&history));

        // Dropping assistant messages changes nothing
        let users_only: Vec<Message> = history
            .iter()
            .filter(|m| m.role == crate::session::Role::User)
            .cloned()
            .collect();
        prop_assert_eq!(stage, resolve_stage(&users_only));
    }

    #[test]
    fn stages_are_monotonic(n in 0usize..64) {
        prop_assert!(stage_rank(Stage::from_user_turns(n)) <= stage_rank(Stage::from_user_turns(n + 1)));
        if n >= 8 {
            prop_assert_eq!(Stage::from_user_turns(n), Stage::Ongoing);
        }
    }

    #[test]
    fn classifier_is_total(answers in prop::collection::vec(arb_answer(), 0..10)) {
        let c = classify(&answers);
        // Only slots 0, 2, 3 and 5 are read
        let mut masked = answers.clone();
        for (i, answer) in masked.iter_mut().enumerate() {
            if ![0, 2, 3, 5].contains(&i) {
                *answer = "career love months work angry".to_string();
            }
        }
        prop_assert_eq!(c, classify(&masked));
        if answers.len() <= 2 {
            prop_assert_eq!(c.duration, Classification::default().duration);
            prop_assert_eq!(c.impact, Classification::default().impact);
            prop_assert_eq!(c.emotion, Classification::default().emotion);
        }
    }

    #[test]
    fn every_classification_has_a_template(answers in prop::collection::vec(arb_answer(), 0..8)) {
        let template = template_for(&classify(&answers));
        prop_assert!(RemedyTemplate::ALL.contains(&template));
    }

    #[test]
    fn scripted_fallback_is_a_stage_option(history in arb_history()) {
        let selector = ResponseSelector::new(None, Box::new(Rotation), Duration::from_secs(1));
        let stage = resolve_stage(&history);
        let reply = selector.fallback(&history, stage);
        match reply.source {
            ReplySource::Scripted => {
                prop_assert!(canned::candidates(stage).iter().any(|c| *c == reply.text));
            }
            ReplySource::Remedy(template) => {
                prop_assert_eq!(stage, Stage::Analysis);
                prop_assert_eq!(reply.text.as_str(), template.text());
            }
            ReplySource::Provider => prop_assert!(false, "fallback never reports the provider"),
        }
        prop_assert!(suggestions_for(stage).len() <= MAX_SUGGESTIONS);
    }
}
