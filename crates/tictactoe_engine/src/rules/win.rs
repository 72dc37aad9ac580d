//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Mark, Square, WINNING_LINES, WinningLine};
use tracing::instrument;

/// Returns the first line, in declared order, fully occupied by `mark`.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, mark: Mark) -> Option<WinningLine> {
    let target = Some(Square::Occupied(mark));
    WINNING_LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&i| board.get(i) == target))
}

/// Checks whether `mark` has three in a row anywhere on the board.
#[instrument(skip(board))]
pub fn has_win(board: &Board, mark: Mark) -> bool {
    winning_line(board, mark).is_some()
}

/// Returns the side holding a winning line, if any.
///
/// The player is checked first; on a reachable board at most one side can
/// hold a line.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    [Mark::Player, Mark::Opponent]
        .into_iter()
        .find(|&mark| has_win(board, mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn board_with(marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(i, mark) in marks {
            board.apply(i, mark).expect("test setup uses empty squares");
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!has_win(&board, Mark::Player));
        assert!(!has_win(&board, Mark::Opponent));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_line_is_a_win() {
        for line in WINNING_LINES {
            let board = board_with(&line.map(|i| (i, Mark::Opponent)));
            assert!(has_win(&board, Mark::Opponent), "line {:?}", line);
            assert!(!has_win(&board, Mark::Player), "line {:?}", line);
            assert_eq!(winning_line(&board, Mark::Opponent), Some(line));
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(&[(0, Mark::Player), (1, Mark::Player), (2, Mark::Opponent)]);
        assert_eq!(check_winner(&board), None);
        assert_eq!(winning_line(&board, Mark::Player), None);
    }

    #[test]
    fn test_winning_line_first_in_declared_order() {
        // X holds both the top row and the left column.
        let board = board_with(&[
            (0, Mark::Player),
            (1, Mark::Player),
            (2, Mark::Player),
            (3, Mark::Player),
            (6, Mark::Player),
        ]);
        assert_eq!(winning_line(&board, Mark::Player), Some([0, 1, 2]));
    }

    #[test]
    fn test_winner_diagonal() {
        let board = board_with(&[(2, Mark::Player), (4, Mark::Player), (6, Mark::Player)]);
        assert_eq!(check_winner(&board), Some(Mark::Player));
        assert_eq!(winning_line(&board, Mark::Player), Some([2, 4, 6]));
    }

    #[test]
    fn test_both_sides_never_win_on_reachable_board() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new();
            let mut mark = Mark::Player;
            while check_winner(&board).is_none() {
                let Some(&index) = board.empty_indices().choose(&mut rng) else {
                    break;
                };
                board.apply(index, mark).expect("chosen cell is empty");
                assert!(
                    !(has_win(&board, Mark::Player) && has_win(&board, Mark::Opponent)),
                    "seed {} produced two winners:\n{}",
                    seed,
                    board.display()
                );
                mark = mark.other();
            }
        }
    }
}
