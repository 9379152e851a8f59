//! Winning line analysis for Tic-Tac-Toe

use super::{CELL_COUNT, Cell, Player};

/// Winning line indices on the 3x3 board, in scan order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Sum of the signed cell weights along a line
    pub fn line_sum(cells: &[Cell; CELL_COUNT], line: &[usize; 3]) -> i8 {
        line.iter().map(|&idx| cells[idx].weight()).sum()
    }

    /// First player found owning a full line.
    ///
    /// Lines are scanned rows, then columns, then diagonals; within a line X is
    /// tested before O.
    pub fn winner(cells: &[Cell; CELL_COUNT]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| {
            let sum = Self::line_sum(cells, line);
            [Player::X, Player::O]
                .into_iter()
                .find(|player| sum == player.line_target())
        })
    }
}
