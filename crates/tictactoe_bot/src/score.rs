//! Score tracking and monthly progress.

use crate::clock::Period;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictactoe_engine::RoundResult;
use tracing::{debug, instrument};

/// Player wins needed to complete the monthly goal.
pub const MONTHLY_GOAL: u32 = 10;

/// Persisted scores for the current month.
///
/// `monthly_wins` is tracked separately from `player_wins`; the two reset
/// together on rollover and on a match reset, and nothing ties one to the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    player_wins: u32,
    opponent_wins: u32,
    monthly_wins: u32,
    month: u32,
    year: i32,
}

impl ScoreRecord {
    /// An all-zero record for `period`.
    #[instrument]
    pub fn zeroed(period: Period) -> Self {
        Self {
            player_wins: 0,
            opponent_wins: 0,
            monthly_wins: 0,
            month: period.month,
            year: period.year,
        }
    }

    /// The month this record counts toward.
    pub fn period(&self) -> Period {
        Period::new(self.month, self.year)
    }

    /// False if the stored month is outside 0-11.
    pub fn is_valid(&self) -> bool {
        self.month < 12
    }

    /// Applies a round result. Returns `true` if any count changed.
    #[instrument(skip(self))]
    pub fn record(&mut self, result: RoundResult) -> bool {
        match result {
            RoundResult::PlayerWin => {
                self.player_wins = self.player_wins.saturating_add(1);
                self.monthly_wins = self.monthly_wins.saturating_add(1);
            }
            RoundResult::OpponentWin => {
                self.opponent_wins = self.opponent_wins.saturating_add(1);
            }
            RoundResult::Draw => return false,
        }
        debug!(
            player_wins = self.player_wins,
            opponent_wins = self.opponent_wins,
            monthly_wins = self.monthly_wins,
            "Score updated"
        );
        true
    }

    /// Monthly progress as a percentage, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        self.monthly_wins.min(MONTHLY_GOAL) * 100 / MONTHLY_GOAL
    }

    /// True once the monthly goal is reached.
    pub fn goal_reached(&self) -> bool {
        self.monthly_wins >= MONTHLY_GOAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_win_counts_twice() {
        let mut record = ScoreRecord::zeroed(Period::new(9, 2026));
        assert!(record.record(RoundResult::PlayerWin));
        assert_eq!(*record.player_wins(), 1);
        assert_eq!(*record.monthly_wins(), 1);
        assert_eq!(*record.opponent_wins(), 0);
    }

    #[test]
    fn test_opponent_win_and_draw() {
        let mut record = ScoreRecord::zeroed(Period::new(0, 2027));
        assert!(record.record(RoundResult::OpponentWin));
        assert!(!record.record(RoundResult::Draw));
        assert_eq!(*record.opponent_wins(), 1);
        assert_eq!(*record.player_wins(), 0);
        assert_eq!(*record.monthly_wins(), 0);
    }

    #[test]
    fn test_progress_caps_at_goal() {
        let mut record = ScoreRecord::zeroed(Period::new(3, 2026));
        for _ in 0..3 {
            record.record(RoundResult::PlayerWin);
        }
        assert_eq!(record.progress_percent(), 30);
        assert!(!record.goal_reached());
        for _ in 0..9 {
            record.record(RoundResult::PlayerWin);
        }
        assert_eq!(record.progress_percent(), 100);
        assert!(record.goal_reached());
    }

    #[test]
    fn test_huge_saved_counts_saturate() {
        let mut record: ScoreRecord = serde_json::from_value(serde_json::json!({
            "playerWins": u32::MAX,
            "opponentWins": u32::MAX,
            "monthlyWins": 50_000_000,
            "month": 9,
            "year": 2026
        }))
        .expect("valid record");

        assert_eq!(record.progress_percent(), 100);
        assert!(record.record(RoundResult::PlayerWin));
        assert!(record.record(RoundResult::OpponentWin));
        assert_eq!(*record.player_wins(), u32::MAX);
        assert_eq!(*record.opponent_wins(), u32::MAX);
        assert_eq!(*record.monthly_wins(), 50_000_001);
    }

    #[test]
    fn test_serialized_field_names() {
        let record = ScoreRecord::zeroed(Period::new(11, 2026));
        let json = serde_json::to_value(record).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "playerWins": 0,
                "opponentWins": 0,
                "monthlyWins": 0,
                "month": 11,
                "year": 2026
            })
        );
    }
}
