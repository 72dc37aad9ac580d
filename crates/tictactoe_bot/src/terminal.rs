//! Line-oriented terminal front end.

use crate::driver::Command;
use crate::presenter::Presenter;
use crate::score::ScoreRecord;
use crate::store::StoreError;
use std::io::Write;
use tictactoe_engine::{Board, Difficulty, Position, RoundResult, Turn, WinningLine};
use tracing::{instrument, warn};

/// Help text listing the accepted commands.
pub const HELP: &str = "\
Commands:
  1-9 or a name (center, top-left, ...)  play a cell
  r                                       new round (keep scores)
  n                                       new match (zero scores)
  easy | medium | hard                    set difficulty
  q                                       quit";

/// Parses one line of input into a command.
#[instrument]
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Some(Command::Quit),
        "r" | "reset" => return Some(Command::ResetRound),
        "n" | "new" => return Some(Command::ResetMatch),
        _ => {}
    }
    if let Ok(difficulty) = line.parse::<Difficulty>() {
        return Some(Command::SetDifficulty(difficulty));
    }
    Position::from_label_or_number(line).map(|pos| Command::SelectCell(pos.to_index()))
}

/// Writes session updates as plain text.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn on_board_changed(&mut self, board: &Board) {
        self.emit(&format!("\n{}\n", board.display()));
    }

    fn on_turn_changed(&mut self, turn: Turn) {
        let text = match turn {
            Turn::Player => "Your move!",
            Turn::Opponent => "Opponent is thinking...",
        };
        self.emit(text);
    }

    fn on_game_ended(&mut self, result: RoundResult, line: Option<WinningLine>) {
        let text = match result {
            RoundResult::PlayerWin => "You win! Congratulations!",
            RoundResult::OpponentWin => "The opponent won this time. Try again!",
            RoundResult::Draw => "It's a draw!",
        };
        match line {
            Some(cells) => {
                let cells: Vec<String> = cells.iter().map(|i| (i + 1).to_string()).collect();
                self.emit(&format!("{} (line {})", text, cells.join("-")));
            }
            None => self.emit(text),
        }
        self.emit("Type r for a new round or n for a new match.");
    }

    fn on_score_changed(&mut self, score: &ScoreRecord) {
        self.emit(&format!(
            "Score: you {} / opponent {}",
            score.player_wins(),
            score.opponent_wins()
        ));
        if score.goal_reached() {
            self.emit("Monthly goal reached! Keep it up.");
        }
    }

    fn on_progress_changed(&mut self, monthly_wins: u32, monthly_goal: u32) {
        let filled = monthly_wins.min(monthly_goal) as usize;
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled),
            ".".repeat(monthly_goal as usize - filled)
        );
        self.emit(&format!("Monthly goal {} {}/{} wins", bar, monthly_wins, monthly_goal));
    }

    fn on_persistence_failed(&mut self, error: &StoreError) {
        self.emit(&format!("Warning: progress not saved ({})", error.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Period;

    #[test]
    fn test_parse_cells() {
        assert_eq!(parse_command("5"), Some(Command::SelectCell(4)));
        assert_eq!(parse_command("top-left"), Some(Command::SelectCell(0)));
        assert_eq!(parse_command("  9\n"), Some(Command::SelectCell(8)));
        assert_eq!(parse_command("0"), None);
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("R"), Some(Command::ResetRound));
        assert_eq!(parse_command("new"), Some(Command::ResetMatch));
        assert_eq!(parse_command("HARD"), Some(Command::SetDifficulty(Difficulty::Hard)));
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn test_presenter_output() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.on_game_ended(RoundResult::PlayerWin, Some([0, 4, 8]));
        presenter.on_score_changed(&ScoreRecord::zeroed(Period::new(9, 2026)));
        presenter.on_progress_changed(3, 10);

        let text = String::from_utf8(presenter.into_inner()).expect("utf8");
        assert!(text.contains("You win! Congratulations! (line 1-5-9)"));
        assert!(text.contains("Score: you 0 / opponent 0"));
        assert!(text.contains("Monthly goal [###.......] 3/10 wins"));
        assert!(!text.contains("Monthly goal reached"));
    }

    #[test]
    fn test_presenter_announces_goal() {
        let mut record = ScoreRecord::zeroed(Period::new(9, 2026));
        for _ in 0..crate::score::MONTHLY_GOAL {
            record.record(RoundResult::PlayerWin);
        }
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.on_score_changed(&record);

        let text = String::from_utf8(presenter.into_inner()).expect("utf8");
        assert!(text.contains("Score: you 10 / opponent 0"));
        assert!(text.contains("Monthly goal reached! Keep it up."));
    }
}
