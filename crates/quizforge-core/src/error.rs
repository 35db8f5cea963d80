//! Session and evaluation error types.
//!
//! Defined here so the session state machine and its callers can classify
//! failures without string matching: a *refusal* leaves the session in
//! Playing with no record written, while everything else is a hard error.

use thiserror::Error;

use crate::model::QuestionKind;
use crate::session::GameState;

/// Errors raised while evaluating a raw answer against a question.
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// The payload variant does not match the question's type.
    #[error("answer payload is {got}, but the question is {expected}")]
    PayloadMismatch {
        expected: QuestionKind,
        got: QuestionKind,
    },

    /// A fillBlanks slot was left empty. Evaluation is refused until every
    /// blank is filled.
    #[error("blank {index} is empty")]
    EmptyBlank { index: usize },

    /// A classify item has not been placed into any category. Evaluation
    /// is refused until every item is placed.
    #[error("item '{item_id}' has not been placed into a category")]
    UnplacedItem { item_id: String },

    /// The answer arrived with the wrong number of blank entries.
    #[error("expected {expected} blank entries, got {got}")]
    BlankCountMismatch { expected: usize, got: usize },

    /// The selected option index is outside the question's options.
    #[error("selected option {selected} out of range (question has {options} options)")]
    ChoiceOutOfRange { selected: usize, options: usize },

    /// A matching answer that is not a permutation of the pair indices.
    #[error("right-column ordering is not a permutation of 0..{pairs}")]
    InvalidOrdering { pairs: usize },

    /// A classify placement referenced an unknown item or category.
    #[error("placement references unknown {what} '{name}'")]
    UnknownPlacement { what: &'static str, name: String },

    /// The question data itself is inconsistent. This indicates a
    /// content-authoring bug, not a runtime condition; callers must not
    /// score the answer.
    #[error("question '{id}' is malformed: {reason}")]
    MalformedQuestion { id: String, reason: String },
}

impl EvaluateError {
    /// Returns `true` if this is an incomplete-input refusal: the answer
    /// was rejected before evaluation, no record is written, and the
    /// player may complete the answer and resubmit.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            EvaluateError::EmptyBlank { .. } | EvaluateError::UnplacedItem { .. }
        )
    }
}

/// Errors raised by session state-machine transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Player initials must be at least two characters to start a game.
    #[error("initials must be at least 2 characters")]
    InitialsTooShort,

    /// No avatar has been chosen for the player.
    #[error("an avatar must be chosen before starting")]
    AvatarMissing,

    /// The sampler produced no questions (empty bank).
    #[error("the question bank is empty")]
    EmptyBank,

    /// The requested action is not legal in the current state. The session
    /// is left untouched.
    #[error("'{action}' is not valid in the {state} state")]
    InvalidAction {
        action: &'static str,
        state: GameState,
    },

    /// Evaluation failed; see [`EvaluateError::is_refusal`] for whether the
    /// answer may be resubmitted.
    #[error(transparent)]
    Evaluate(#[from] EvaluateError),
}
