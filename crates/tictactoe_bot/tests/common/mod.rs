//! Shared test helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tictactoe_bot::{Presenter, ScoreRecord, StoreError};
use tictactoe_engine::rules::has_win;
use tictactoe_engine::{Board, Mark, RoundResult, Turn, WinningLine};

/// Everything a presenter was told, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Board(Board),
    Turn(Turn),
    Ended(RoundResult, Option<WinningLine>),
    Score(ScoreRecord),
    Progress(u32, u32),
    PersistenceFailed,
}

/// Presenter that records events; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("recorder lock").clone()
    }

    pub fn clear(&self) {
        self.events.lock().expect("recorder lock").clear();
    }

    fn push(&self, event: Event) {
        self.events.lock().expect("recorder lock").push(event);
    }
}

impl Presenter for Recorder {
    fn on_board_changed(&mut self, board: &Board) {
        self.push(Event::Board(*board));
    }

    fn on_turn_changed(&mut self, turn: Turn) {
        self.push(Event::Turn(turn));
    }

    fn on_game_ended(&mut self, result: RoundResult, line: Option<WinningLine>) {
        self.push(Event::Ended(result, line));
    }

    fn on_score_changed(&mut self, score: &ScoreRecord) {
        self.push(Event::Score(*score));
    }

    fn on_progress_changed(&mut self, monthly_wins: u32, monthly_goal: u32) {
        self.push(Event::Progress(monthly_wins, monthly_goal));
    }

    fn on_persistence_failed(&mut self, _error: &StoreError) {
        self.push(Event::PersistenceFailed);
    }
}

/// Lowest empty cell that would win for `mark`.
pub fn winning_cell(board: &Board, mark: Mark) -> Option<usize> {
    board.empty_indices().into_iter().find(|&i| {
        board
            .with_mark(i, mark)
            .is_ok_and(|next| has_win(&next, mark))
    })
}

/// Number of occupied cells.
pub fn marks_on(board: &Board) -> usize {
    9 - board.empty_indices().len()
}
