//! Game session: one human against the bot, with scores.

use crate::clock::Clock;
use crate::presenter::Presenter;
use crate::score::{MONTHLY_GOAL, ScoreRecord};
use crate::store::ScoreStore;
use tictactoe_engine::{
    BOARD_SIZE, Difficulty, GameState, Mark, Move, MoveError, MovePolicy, Phase, RoundResult, Turn,
};
use tracing::{debug, info, instrument, warn};

/// What happened to a cell selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not the player's turn, round over, or the cell is unavailable.
    Ignored,
    /// The player's mark was placed; the opponent replies next.
    AwaitingOpponent,
    /// The player's mark ended the round.
    Ended(RoundResult),
}

/// Owns the round, the scores and the collaborators.
///
/// All mutation goes through these methods. The session never waits: the
/// caller decides when to invoke [`GameSession::play_opponent_turn`] after
/// [`SelectOutcome::AwaitingOpponent`].
#[derive(Debug)]
pub struct GameSession<S, P, C> {
    state: GameState,
    score: ScoreRecord,
    difficulty: Difficulty,
    policy: MovePolicy,
    store: S,
    presenter: P,
    clock: C,
}

impl<S, P, C> GameSession<S, P, C>
where
    S: ScoreStore,
    P: Presenter,
    C: Clock,
{
    /// Loads saved progress and starts the first round.
    ///
    /// A record from another month is replaced by a zeroed record for the
    /// current month, which is saved right away. Missing, unreadable or
    /// malformed progress starts from zero.
    #[instrument(skip_all)]
    pub fn new(store: S, presenter: P, clock: C, policy: MovePolicy) -> Self {
        let today = clock.period();

        let (score, rolled_over) = match store.load() {
            Ok(Some(record)) if record.period() == today => {
                info!(
                    player_wins = record.player_wins(),
                    opponent_wins = record.opponent_wins(),
                    monthly_wins = record.monthly_wins(),
                    "Restored progress"
                );
                (record, false)
            }
            Ok(Some(record)) => {
                info!(saved = %record.period(), current = %today, "New month, resetting progress");
                (ScoreRecord::zeroed(today), true)
            }
            Ok(None) => {
                debug!("No saved progress, starting fresh");
                (ScoreRecord::zeroed(today), false)
            }
            Err(e) => {
                warn!(error = %e, "Saved progress unusable, starting fresh");
                (ScoreRecord::zeroed(today), false)
            }
        };

        let mut session = Self {
            state: GameState::new(),
            score,
            difficulty: Difficulty::default(),
            policy,
            store,
            presenter,
            clock,
        };

        if rolled_over {
            session.persist();
        }
        session.render_all();
        session
    }

    /// Current round state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase of the round.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Current scores.
    pub fn score(&self) -> &ScoreRecord {
        &self.score
    }

    /// Opponent difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Sets the opponent difficulty, effective from its next move.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(from = %self.difficulty, to = %difficulty, "Difficulty changed");
        self.difficulty = difficulty;
    }

    /// Handles the player's selection of a cell.
    ///
    /// Selections made out of turn, after the round ended, on an occupied
    /// cell or outside the board are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] only if the round state rejects a move the
    /// session already validated, which indicates a bug.
    #[instrument(skip(self))]
    pub fn select_cell(&mut self, index: usize) -> Result<SelectOutcome, MoveError> {
        let phase = self.state.phase();
        if phase != Phase::PlayerToMove {
            debug!(?phase, "Selection ignored, not the player's turn");
            return Ok(SelectOutcome::Ignored);
        }
        if index >= BOARD_SIZE {
            warn!("Selection ignored, index off the board");
            return Ok(SelectOutcome::Ignored);
        }
        if !self.state.board().is_empty(index) {
            debug!("Selection ignored, cell occupied");
            return Ok(SelectOutcome::Ignored);
        }

        let phase = self.state.place(Move::new(Mark::Player, index))?;
        self.presenter.on_board_changed(self.state.board());

        Ok(match phase {
            Phase::Ended(result) => {
                self.finish_round(result);
                SelectOutcome::Ended(result)
            }
            _ => {
                self.presenter.on_turn_changed(Turn::Opponent);
                SelectOutcome::AwaitingOpponent
            }
        })
    }

    /// Plays the opponent's reply.
    ///
    /// Returns `None` without touching anything unless the session is
    /// waiting on the opponent, so a late continuation after a reset is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoLegalMove`] or another [`MoveError`] only on an
    /// internal invariant violation.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn play_opponent_turn(&mut self) -> Result<Option<Phase>, MoveError> {
        if self.state.phase() != Phase::OpponentToMove {
            debug!("No opponent move pending");
            return Ok(None);
        }

        let index = self.policy.choose(self.state.board(), self.difficulty)?;
        let phase = self.state.place(Move::new(Mark::Opponent, index))?;
        self.presenter.on_board_changed(self.state.board());

        match phase {
            Phase::Ended(result) => self.finish_round(result),
            _ => self.presenter.on_turn_changed(Turn::Player),
        }
        Ok(Some(phase))
    }

    /// Starts a new round, keeping scores.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        info!("Round reset");
        self.state = GameState::new();
        self.presenter.on_board_changed(self.state.board());
        self.presenter.on_turn_changed(self.state.turn());
    }

    /// Zeroes all scores, saves them, and starts a new round.
    #[instrument(skip(self))]
    pub fn reset_match(&mut self) {
        info!("Match reset");
        self.score = ScoreRecord::zeroed(self.clock.period());
        self.persist();
        self.render_score();
        self.reset_round();
    }

    fn finish_round(&mut self, result: RoundResult) {
        info!(%result, moves = self.state.history().len(), "Round ended");
        self.presenter.on_game_ended(result, self.state.winning_line());

        if result.winner().is_none() {
            return;
        }

        let today = self.clock.period();
        if self.score.period() != today {
            info!(saved = %self.score.period(), current = %today, "Month changed mid-session, resetting progress");
            self.score = ScoreRecord::zeroed(today);
        }

        if self.score.record(result) {
            self.persist();
        }
        self.render_score();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.score) {
            warn!(error = %e, "Failed to save progress");
            self.presenter.on_persistence_failed(&e);
        }
    }

    fn render_score(&mut self) {
        self.presenter.on_score_changed(&self.score);
        self.presenter
            .on_progress_changed(*self.score.monthly_wins(), MONTHLY_GOAL);
    }

    fn render_all(&mut self) {
        self.presenter.on_board_changed(self.state.board());
        self.presenter.on_turn_changed(self.state.turn());
        self.render_score();
    }
}
