//! Tic-Tac-Toe board, outcome and state hashing

pub mod board;
pub mod hash;
pub mod lines;
pub mod outcome;

pub use board::{BoardState, CELL_COUNT, Cell, Player, Position, SIZE};
pub use hash::{STATE_COUNT, StateHash};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use outcome::Outcome;
