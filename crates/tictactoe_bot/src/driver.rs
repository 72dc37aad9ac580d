//! Single-threaded event loop around a [`GameSession`].

use crate::clock::Clock;
use crate::presenter::Presenter;
use crate::scheduler::{ReplyScheduler, ScheduledReply};
use crate::session::{GameSession, SelectOutcome};
use crate::store::ScoreStore;
use std::time::Duration;
use tictactoe_engine::{Difficulty, MoveError};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Inbound request from a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// The player picked a cell.
    SelectCell(usize),
    /// Start a new round, keeping scores.
    ResetRound,
    /// Zero scores and start a new round.
    ResetMatch,
    /// Change opponent difficulty.
    SetDifficulty(Difficulty),
    /// Stop the loop.
    Quit,
}

/// Feeds commands and scheduled opponent replies into a session, one at a
/// time.
///
/// Each round gets a generation number. A reset bumps it and cancels any
/// pending reply; replies carrying an older generation are dropped.
#[derive(Debug)]
pub struct Driver<S, P, C> {
    session: GameSession<S, P, C>,
    delay: Duration,
    generation: u64,
    pending: Option<ScheduledReply>,
}

impl<S, P, C> Driver<S, P, C>
where
    S: ScoreStore,
    P: Presenter,
    C: Clock,
{
    /// Wraps `session`; the opponent replies `delay` after each player move.
    pub fn new(session: GameSession<S, P, C>, delay: Duration) -> Self {
        Self {
            session,
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Runs until [`Command::Quit`] or the command channel closes, then
    /// hands the session back.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the session reports an internal invariant
    /// violation.
    #[instrument(skip_all, fields(delay_ms = self.delay.as_millis() as u64))]
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
    ) -> Result<GameSession<S, P, C>, MoveError> {
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
        let scheduler = ReplyScheduler::new(self.delay, reply_tx);
        info!("Driver started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    None | Some(Command::Quit) => break,
                    Some(command) => self.handle(command, &scheduler)?,
                },
                Some(generation) = reply_rx.recv() => self.on_reply(generation)?,
            }
        }

        self.cancel_pending();
        info!("Driver stopped");
        Ok(self.session)
    }

    #[instrument(skip(self, scheduler))]
    fn handle(&mut self, command: Command, scheduler: &ReplyScheduler) -> Result<(), MoveError> {
        match command {
            Command::SelectCell(index) => {
                if self.session.select_cell(index)? == SelectOutcome::AwaitingOpponent {
                    let reply = scheduler.schedule(self.generation);
                    debug!(generation = reply.generation(), "Opponent reply scheduled");
                    self.pending = Some(reply);
                }
            }
            Command::ResetRound => {
                self.next_generation();
                self.session.reset_round();
            }
            Command::ResetMatch => {
                self.next_generation();
                self.session.reset_match();
            }
            Command::SetDifficulty(difficulty) => self.session.set_difficulty(difficulty),
            Command::Quit => {}
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn on_reply(&mut self, generation: u64) -> Result<(), MoveError> {
        if generation != self.generation {
            debug!(current = self.generation, "Stale reply dropped");
            return Ok(());
        }
        self.pending = None;
        self.session.play_opponent_turn()?;
        Ok(())
    }

    fn next_generation(&mut self) {
        self.cancel_pending();
        self.generation += 1;
    }

    fn cancel_pending(&mut self) {
        if let Some(reply) = self.pending.take() {
            reply.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, Period};
    use crate::score::ScoreRecord;
    use crate::store::MemoryStore;
    use tictactoe_engine::{Board, MovePolicy, Phase, RoundResult, Turn, WinningLine};

    struct Silent;

    impl Presenter for Silent {
        fn on_board_changed(&mut self, _board: &Board) {}
        fn on_turn_changed(&mut self, _turn: Turn) {}
        fn on_game_ended(&mut self, _result: RoundResult, _line: Option<WinningLine>) {}
        fn on_score_changed(&mut self, _score: &ScoreRecord) {}
        fn on_progress_changed(&mut self, _monthly_wins: u32, _monthly_goal: u32) {}
    }

    fn driver() -> Driver<MemoryStore, Silent, FixedClock> {
        let mut session = GameSession::new(
            MemoryStore::new(),
            Silent,
            FixedClock::new(Period::new(9, 2026)),
            MovePolicy::seeded(3),
        );
        session.set_difficulty(Difficulty::Hard);
        Driver::new(session, Duration::ZERO)
    }

    fn marks(driver: &Driver<MemoryStore, Silent, FixedClock>) -> usize {
        9 - driver.session.state().board().empty_indices().len()
    }

    #[test]
    fn test_delivered_reply_from_before_reset_is_dropped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let scheduler = ReplyScheduler::new(Duration::ZERO, tx);
        let mut driver = driver();

        let stale = driver.generation;
        assert_eq!(
            driver.session.select_cell(0),
            Ok(SelectOutcome::AwaitingOpponent)
        );
        driver
            .handle(Command::ResetRound, &scheduler)
            .expect("reset never fails");

        driver.on_reply(stale).expect("stale reply is harmless");
        assert_eq!(driver.session.state().board(), &Board::new());
        assert_eq!(driver.session.phase(), Phase::PlayerToMove);

        // A new round waiting on the opponent still ignores the old reply.
        assert_eq!(
            driver.session.select_cell(0),
            Ok(SelectOutcome::AwaitingOpponent)
        );
        driver.on_reply(stale).expect("stale reply is harmless");
        assert_eq!(marks(&driver), 1);
        assert_eq!(driver.session.phase(), Phase::OpponentToMove);

        let current = driver.generation;
        driver.on_reply(current).expect("current reply plays");
        assert_eq!(marks(&driver), 2);
        assert_eq!(driver.session.phase(), Phase::PlayerToMove);
    }
}
