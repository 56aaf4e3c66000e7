//! Strategies for choosing among a stage's canned candidates
//!
//! Which candidate is returned is not load-bearing: any of the stage's
//! options is a valid reply. Tests inject a deterministic picker.

use super::Stage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Chooses an index into a non-empty candidate list
pub trait TemplatePicker: Send + Sync {
    /// Return an index in `0..count`. `count` is never zero.
    fn pick(&self, stage: Stage, user_turns: usize, count: usize) -> usize;
}

/// Always the first candidate
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl TemplatePicker for FirstCandidate {
    fn pick(&self, _stage: Stage, _user_turns: usize, _count: usize) -> usize {
        0
    }
}

/// Rotate through candidates by user-turn count
#[derive(Debug, Default, Clone, Copy)]
pub struct Rotation;

impl TemplatePicker for Rotation {
    fn pick(&self, _stage: Stage, user_turns: usize, count: usize) -> usize {
        user_turns % count
    }
}

/// Pseudo-random choice from an explicitly seeded generator
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl TemplatePicker for SeededRandom {
    fn pick(&self, _stage: Stage, _user_turns: usize, count: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..count),
            // A poisoned generator still yields a valid candidate
            Err(_) => 0,
        }
    }
}

/// Picker selection from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerKind {
    #[default]
    Random,
    Rotation,
    First,
}

impl PickerKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Some(Self::Random),
            "rotation" => Some(Self::Rotation),
            "first" => Some(Self::First),
            _ => None,
        }
    }

    /// Build the picker; `seed` only applies to `Random`
    pub fn build(self, seed: Option<u64>) -> Box<dyn TemplatePicker> {
        match self {
            Self::Random => Box::new(seed.map_or_else(SeededRandom::from_entropy, SeededRandom::new)),
            Self::Rotation => Box::new(Rotation),
            Self::First => Box::new(FirstCandidate),
        }
    }
}
