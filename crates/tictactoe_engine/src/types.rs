//! Core domain types for tic-tac-toe.

use crate::action::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Index of the center cell.
pub const CENTER: usize = 4;

/// Corner cell indices, in ascending order.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Which side a mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The human player (plays `X`, moves first).
    Player,
    /// The automated opponent (plays `O`).
    Opponent,
}

impl Mark {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    /// Board symbol for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// An ordered triple of board indices forming three in a row.
pub type WinningLine = [usize; 3];

/// The eight winning lines in declared order: rows, columns, diagonals.
pub const WINNING_LINES: [WinningLine; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 tic-tac-toe board.
///
/// Cells are addressed 0-8 in row-major order. A filled cell can never be
/// overwritten: [`Board::apply`] is the only way to place a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw squares.
    pub fn from_squares(squares: [Square; BOARD_SIZE]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if the square at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; BOARD_SIZE] {
        &self.squares
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Places `mark` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] if the index is outside 0-8 or the
    /// square is already occupied. The board is left untouched on error.
    #[instrument(skip(self))]
    pub fn apply(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        match self.get(index) {
            None => Err(MoveError::IllegalMove {
                index,
                reason: "index out of range".to_string(),
            }),
            Some(Square::Occupied(existing)) => Err(MoveError::IllegalMove {
                index,
                reason: format!("square already holds {}", existing),
            }),
            Some(Square::Empty) => {
                self.squares[index] = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Board::apply`].
    pub fn with_mark(mut self, index: usize, mark: Mark) -> Result<Self, MoveError> {
        self.apply(index, mark)?;
        Ok(self)
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based number so a reader can type it back.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => result.push_str(&(pos + 1).to_string()),
                    Square::Occupied(mark) => result.push(mark.symbol()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
