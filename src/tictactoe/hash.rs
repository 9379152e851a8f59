//! Ternary state hashing
//!
//! Each grid maps to `Σ digit_k · 3^k` where `k` is the row-major cell index
//! and the digit is 0 for empty, 1 for X and 2 for O. The mapping is a
//! bijection between the 3^9 representable grids and `0..STATE_COUNT`, so the
//! hash doubles as a direct index into value tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CELL_COUNT, Cell, board::BoardState};

/// Number of representable grids (3^9)
pub const STATE_COUNT: usize = 3usize.pow(CELL_COUNT as u32);

/// Base-3 encoding of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateHash(u32);

impl StateHash {
    /// Hash a row-major grid
    pub fn from_cells(cells: &[Cell; CELL_COUNT]) -> Self {
        let mut hash = 0;
        let mut place = 1;
        for cell in cells {
            hash += cell.digit() * place;
            place *= 3;
        }
        StateHash(hash)
    }

    /// Raw hash value
    pub fn value(self) -> u32 {
        self.0
    }

    /// Hash as a table index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Reverse the base-3 expansion back into row-major cells
    pub fn decode(self) -> [Cell; CELL_COUNT] {
        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut rest = self.0;
        for cell in &mut cells {
            // Every hash is below 3^9, so each digit is 0, 1 or 2
            *cell = Cell::from_digit(rest % 3).unwrap_or(Cell::Empty);
            rest /= 3;
        }
        cells
    }

    /// Board holding the decoded grid
    pub fn to_board(self) -> BoardState {
        BoardState::from_cells(self.decode())
    }

    /// Every representable hash in ascending order
    pub fn all() -> impl Iterator<Item = StateHash> {
        (0..STATE_COUNT as u32).map(StateHash)
    }
}

impl TryFrom<u32> for StateHash {
    type Error = crate::Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value as usize >= STATE_COUNT {
            return Err(crate::Error::InvalidStateHash {
                value,
                limit: STATE_COUNT as u32,
            });
        }
        Ok(StateHash(value))
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
