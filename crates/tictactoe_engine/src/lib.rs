//! Pure tic-tac-toe game logic.
//!
//! - **Board**: nine cells in row-major order and the eight winning lines
//! - **Rules**: win, full-board and draw detection
//! - **Policy**: the opponent's difficulty-tiered move selection
//! - **Game**: the per-round state machine
//!
//! Nothing here performs I/O; sessions, persistence and presentation live in
//! the `tictactoe_bot` crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod policy;
mod position;
mod types;

pub mod rules;

pub use action::{Move, MoveError};
pub use game::{GameState, Phase, RoundResult, Turn};
pub use policy::{Difficulty, MovePolicy};
pub use position::Position;
pub use types::{BOARD_SIZE, Board, CENTER, CORNERS, Mark, Square, WINNING_LINES, WinningLine};
