//! First-class move type and move errors.

use super::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: one side placing its mark on a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side making the move.
    pub mark: Mark,
    /// Board index (0-8) receiving the mark.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(mark: Mark, index: usize) -> Self {
        Self { mark, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.index)
    }
}

/// Error raised when a move cannot be applied or chosen.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index out of range or square already occupied.
    #[display("Illegal move at {}: {}", index, reason)]
    IllegalMove {
        /// Offending index.
        index: usize,
        /// Why the move was refused.
        reason: String,
    },

    /// The policy was asked to move on a full board.
    #[display("No legal move: board is full")]
    NoLegalMove,

    /// The mark tried to move out of turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),

    /// The round has already ended.
    #[display("Round is already over")]
    RoundOver,
}

impl std::error::Error for MoveError {}
