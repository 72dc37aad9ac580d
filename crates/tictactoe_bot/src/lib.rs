//! Tic-tac-toe against a bot, with scores and a monthly win goal.
//!
//! # Architecture
//!
//! - **Session**: owns the round and the score record, applies the rules and
//!   asks the engine's policy for the opponent's moves
//! - **Store**: loads and saves the score record (JSON file or in memory)
//! - **Presenter**: callbacks a front end implements to render changes
//! - **Driver**: async loop feeding commands and delayed opponent replies
//!   into the session
//!
//! # Example
//!
//! ```
//! use tictactoe_bot::{GameSession, MemoryStore, Period, FixedClock, SelectOutcome, TerminalPresenter};
//! use tictactoe_engine::MovePolicy;
//!
//! let clock = FixedClock::new(Period::new(9, 2026));
//! let presenter = TerminalPresenter::new(Vec::new());
//! let mut session = GameSession::new(MemoryStore::new(), presenter, clock, MovePolicy::seeded(7));
//!
//! assert_eq!(session.select_cell(4).unwrap(), SelectOutcome::AwaitingOpponent);
//! session.play_opponent_turn().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod config;
mod driver;
mod presenter;
mod scheduler;
mod score;
mod session;
mod store;
mod terminal;

// Crate-level exports - Calendar
pub use clock::{Clock, FixedClock, Period, SystemClock};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Event loop
pub use driver::{Command, Driver};
pub use scheduler::{ReplyScheduler, ScheduledReply};

// Crate-level exports - Session
pub use presenter::Presenter;
pub use score::{MONTHLY_GOAL, ScoreRecord};
pub use session::{GameSession, SelectOutcome};

// Crate-level exports - Persistence
pub use store::{JsonFileStore, MemoryStore, STORE_KEY, ScoreStore, StoreError, StoreErrorKind};

// Crate-level exports - Terminal front end
pub use terminal::{HELP, TerminalPresenter, parse_command};
