//! Consultation flow
//!
//! Pure stage resolution plus the reply selection built on top of it. The
//! stage is derived from the history on every turn; nothing here owns
//! session state.

mod canned;
pub mod classifier;
pub mod picker;
pub mod remedies;
pub mod selector;
mod stage;
mod suggestions;

#[cfg(test)]
mod proptests;

pub use picker::PickerKind;
pub use selector::{ReplySource, ResponseSelector};
pub use stage::{resolve_stage, Stage};
pub use suggestions::suggestions_for;
