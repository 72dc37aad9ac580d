//! Calendar period source for monthly progress.

use chrono::Datelike;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::instrument;

/// A calendar month: `month` is 0-based (0 = January), as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Period {
    /// Month of the year, 0-11.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Supplies the current period.
pub trait Clock {
    /// The period containing "now".
    fn period(&self) -> Period;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[instrument(skip(self))]
    fn period(&self) -> Period {
        let now = chrono::Local::now();
        Period::new(now.month0(), now.year())
    }
}

/// Clock pinned to a settable period. Clones share the same period.
#[derive(Debug, Clone)]
pub struct FixedClock {
    period: Arc<Mutex<Period>>,
}

impl FixedClock {
    /// Creates a clock reporting `period`.
    pub fn new(period: Period) -> Self {
        Self {
            period: Arc::new(Mutex::new(period)),
        }
    }

    /// Moves the clock to another period.
    pub fn set(&self, period: Period) {
        *self.period.lock().unwrap_or_else(|e| e.into_inner()) = period;
    }
}

impl Clock for FixedClock {
    fn period(&self) -> Period {
        *self.period.lock().unwrap_or_else(|e| e.into_inner())
    }
}
