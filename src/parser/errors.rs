use thiserror::Error;

use crate::parser::transition::Transition;

/// Failures while decoding a sentence or replaying the oracle over a gold tree
#[derive(Debug, Error)]
pub enum ParseError {
    /// The configuration did not reach a terminal state within the step cap
    #[error("tarpit: no terminal configuration after {steps} steps ({state})")]
    Tarpit { steps: usize, state: String },

    #[error("gold tree over {words} words is not projective")]
    NonProjective { words: usize },

    #[error("transition {0} is not in the transition table")]
    UnknownTransition(Transition),

    #[error("scorer returned {actual} scores for {expected} transitions")]
    ScoreCount { expected: usize, actual: usize },

    #[error(transparent)]
    Classifier(#[from] anyhow::Error),
}

impl ParseError {
    pub fn is_tarpit(&self) -> bool {
        matches!(self, ParseError::Tarpit { .. })
    }

    pub fn is_non_projective(&self) -> bool {
        matches!(self, ParseError::NonProjective { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("{predicted} predicted trees but {gold} gold trees; unable to compare")]
    LengthMismatch { predicted: usize, gold: usize },
}
