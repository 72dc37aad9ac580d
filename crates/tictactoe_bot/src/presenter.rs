//! Presentation callbacks.

use crate::score::ScoreRecord;
use crate::store::StoreError;
use tictactoe_engine::{Board, RoundResult, Turn, WinningLine};

/// Receives everything a front end needs to render.
///
/// The session calls these synchronously, in order, after each change.
pub trait Presenter {
    /// The board changed.
    fn on_board_changed(&mut self, board: &Board);

    /// The side to move changed.
    fn on_turn_changed(&mut self, turn: Turn);

    /// The round ended. `line` is set for wins.
    fn on_game_ended(&mut self, result: RoundResult, line: Option<WinningLine>);

    /// Any score count changed.
    fn on_score_changed(&mut self, score: &ScoreRecord);

    /// Monthly progress changed.
    fn on_progress_changed(&mut self, monthly_wins: u32, monthly_goal: u32);

    /// Saving the score failed; play continues on the in-memory record.
    fn on_persistence_failed(&mut self, _error: &StoreError) {}
}
