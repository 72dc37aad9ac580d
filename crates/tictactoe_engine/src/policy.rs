//! Opponent move selection.
//!
//! Three tiers: `Easy` plays a uniformly random empty cell, `Hard` runs a
//! one-ply heuristic (win now, block, center, corner, anything), and
//! `Medium` flips a fair coin between the two on every move.

use crate::action::MoveError;
use crate::rules::has_win;
use crate::types::{Board, CENTER, CORNERS, Mark};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Opponent strength.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random moves.
    #[default]
    Easy,
    /// Random or heuristic, chosen per move with equal odds.
    Medium,
    /// One-ply heuristic every move.
    Hard,
}

/// Heuristic step that produced a move, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
enum Rule {
    Win,
    Block,
    Center,
    Corner,
    Random,
}

/// Chooses the opponent's moves.
///
/// Owns its random source so a seeded policy replays the same game.
#[derive(Debug, Clone)]
pub struct MovePolicy {
    rng: StdRng,
}

impl MovePolicy {
    /// Creates a policy seeded from OS entropy.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic policy.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks an empty cell for the opponent.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoLegalMove`] if the board is full.
    #[instrument(skip(self, board))]
    pub fn choose(&mut self, board: &Board, difficulty: Difficulty) -> Result<usize, MoveError> {
        let (index, rule) = match difficulty {
            Difficulty::Easy => random_move(board, &mut self.rng)?,
            Difficulty::Hard => best_move(board, &mut self.rng)?,
            Difficulty::Medium => {
                if self.rng.gen_bool(0.5) {
                    random_move(board, &mut self.rng)?
                } else {
                    best_move(board, &mut self.rng)?
                }
            }
        };
        debug!(%difficulty, index, %rule, "Opponent chose move");
        Ok(index)
    }
}

impl Default for MovePolicy {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<(usize, Rule), MoveError> {
    board
        .empty_indices()
        .choose(rng)
        .map(|&i| (i, Rule::Random))
        .ok_or(MoveError::NoLegalMove)
}

fn best_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<(usize, Rule), MoveError> {
    if let Some(i) = completing_move(board, Mark::Opponent) {
        return Ok((i, Rule::Win));
    }
    if let Some(i) = completing_move(board, Mark::Player) {
        return Ok((i, Rule::Block));
    }
    if board.is_empty(CENTER) {
        return Ok((CENTER, Rule::Center));
    }

    let corners: Vec<usize> = CORNERS.into_iter().filter(|&i| board.is_empty(i)).collect();
    if let Some(&i) = corners.choose(rng) {
        return Ok((i, Rule::Corner));
    }

    random_move(board, rng)
}

/// Lowest empty index that would give `mark` three in a row.
fn completing_move(board: &Board, mark: Mark) -> Option<usize> {
    board.empty_indices().into_iter().find(|&i| {
        board
            .with_mark(i, mark)
            .is_ok_and(|next| has_win(&next, mark))
    })
}
