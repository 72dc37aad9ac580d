//! Round state machine.
//!
//! A round starts with the player to move on an empty board and alternates
//! until one side completes a line or the board fills up. Once ended, the
//! state accepts no further moves; a fresh [`GameState`] starts the next
//! round.

use crate::action::{Move, MoveError};
use crate::rules::{has_win, is_full, winning_line};
use crate::types::{Board, Mark, WinningLine};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// The human player's move.
    Player,
    /// The opponent's move.
    Opponent,
}

impl Turn {
    /// The mark placed on this turn.
    pub fn mark(self) -> Mark {
        match self {
            Turn::Player => Mark::Player,
            Turn::Opponent => Mark::Opponent,
        }
    }

    fn after(self) -> Self {
        match self {
            Turn::Player => Turn::Opponent,
            Turn::Opponent => Turn::Player,
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum RoundResult {
    /// The human player completed a line.
    #[display("Player wins")]
    PlayerWin,
    /// The opponent completed a line.
    #[display("Opponent wins")]
    OpponentWin,
    /// Board filled with no line.
    #[display("Draw")]
    Draw,
}

impl RoundResult {
    /// The winning side, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            RoundResult::PlayerWin => Some(Mark::Player),
            RoundResult::OpponentWin => Some(Mark::Opponent),
            RoundResult::Draw => None,
        }
    }

    fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::Player => RoundResult::PlayerWin,
            Mark::Opponent => RoundResult::OpponentWin,
        }
    }
}

/// Observable phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human player's selection.
    PlayerToMove,
    /// Waiting for the opponent's reply.
    OpponentToMove,
    /// Terminal until the round is reset.
    Ended(RoundResult),
}

/// Complete state of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Turn,
    result: Option<RoundResult>,
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new round with the player to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Turn::Player,
            result: None,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move; after the round ends, the side that moved last.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// True until a win or a full board.
    pub fn is_active(&self) -> bool {
        self.result.is_none()
    }

    /// The round result, once ended.
    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    /// Moves played this round, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match (self.result, self.turn) {
            (Some(result), _) => Phase::Ended(result),
            (None, Turn::Player) => Phase::PlayerToMove,
            (None, Turn::Opponent) => Phase::OpponentToMove,
        }
    }

    /// The line to highlight when the round was won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.result
            .and_then(RoundResult::winner)
            .and_then(|mark| winning_line(&self.board, mark))
    }

    /// Applies a move and evaluates the board.
    ///
    /// A win is checked before a full board, so a line completed on the last
    /// empty cell counts as a win.
    ///
    /// # Errors
    ///
    /// - [`MoveError::RoundOver`] once the round has ended
    /// - [`MoveError::WrongTurn`] if `action.mark` is not the side to move
    /// - [`MoveError::IllegalMove`] if the index is out of range or occupied
    #[instrument(skip(self), fields(action = %action))]
    pub fn place(&mut self, action: Move) -> Result<Phase, MoveError> {
        if !self.is_active() {
            return Err(MoveError::RoundOver);
        }
        if action.mark != self.turn.mark() {
            return Err(MoveError::WrongTurn(action.mark));
        }

        self.board.apply(action.index, action.mark)?;
        self.history.push(action);

        if has_win(&self.board, action.mark) {
            let result = RoundResult::won_by(action.mark);
            info!(%result, moves = self.history.len(), "Round won");
            self.result = Some(result);
        } else if is_full(&self.board) {
            info!(moves = self.history.len(), "Round drawn");
            self.result = Some(RoundResult::Draw);
        } else {
            self.turn = self.turn.after();
            debug!(turn = ?self.turn, "Turn passed");
        }

        Ok(self.phase())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
