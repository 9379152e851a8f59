//! Exhaustive enumeration of every representable grid
//!
//! Value tables need an entry for every hash, reachable or not, so the
//! enumeration walks the full ternary tree without pruning.

use crate::tictactoe::{BoardState, CELL_COUNT, Cell, Outcome, Position, STATE_COUNT, StateHash};

/// Recursive generator of `(hash, outcome)` pairs
pub struct StateEnumerator;

impl StateEnumerator {
    /// Assign every cell value to every cell in row-major order and record the
    /// hash and freshly computed outcome of each of the 3^9 leaves.
    ///
    /// The first cell varies slowest and values are tried in hash digit order
    /// (empty, X, O), so the output order is deterministic. `board` is used as
    /// scratch space and is left holding the last leaf.
    pub fn enumerate(board: &mut BoardState) -> Vec<(StateHash, Outcome)> {
        let mut states = Vec::with_capacity(STATE_COUNT);
        Self::visit(board, 0, &mut states);
        log::debug!("enumerated {} board states", states.len());
        states
    }

    fn visit(board: &mut BoardState, cell: usize, states: &mut Vec<(StateHash, Outcome)>) {
        if cell == CELL_COUNT {
            let outcome = board.evaluate_outcome(true);
            states.push((board.state_hash(), outcome));
            return;
        }

        let position = Position::from_index(cell);
        for value in Cell::ALL {
            board.place_at(position, value);
            Self::visit(board, cell + 1, states);
        }
    }
}

/// Enumerate all states on a fresh scratch board
pub fn enumerate_states() -> Vec<(StateHash, Outcome)> {
    let mut board = BoardState::new();
    StateEnumerator::enumerate(&mut board)
}
