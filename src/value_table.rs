//! State-value tables for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Outcome, Player, STATE_COUNT, StateHash};

/// Value of a state that has not been decided yet
pub const UNDECIDED_VALUE: f64 = 0.5;

/// Estimated winning probability for every representable state
///
/// One table exists per symbol. It is indexed directly by [`StateHash`] and
/// never changes size after construction.
#[derive(Debug, Clone)]
pub struct ValueTable {
    /// Symbol whose winning probability the table estimates
    owner: Player,
    /// Values indexed by state hash
    values: Box<[f64]>,
}

/// Aggregate statistics over a value table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Initial value of a state with the given outcome, from `owner`'s perspective
pub fn initial_value(owner: Player, outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Won(winner) if winner == owner => 1.0,
        Outcome::Won(_) | Outcome::Draw => 0.0,
        Outcome::InProgress => UNDECIDED_VALUE,
    }
}

/// Seed the table for the X player
pub fn initialize_vx(states: &[(StateHash, Outcome)]) -> ValueTable {
    ValueTable::seeded(Player::X, states)
}

/// Seed the table for the O player
pub fn initialize_vo(states: &[(StateHash, Outcome)]) -> ValueTable {
    ValueTable::seeded(Player::O, states)
}

impl ValueTable {
    /// Create a table seeded from enumeration results.
    ///
    /// Hashes missing from `states` keep [`UNDECIDED_VALUE`].
    pub fn seeded(owner: Player, states: &[(StateHash, Outcome)]) -> Self {
        let mut values = vec![UNDECIDED_VALUE; STATE_COUNT].into_boxed_slice();
        for &(hash, outcome) in states {
            values[hash.index()] = initial_value(owner, outcome);
        }
        Self { owner, values }
    }

    /// Symbol this table belongs to
    pub fn owner(&self) -> Player {
        self.owner
    }

    /// Get the value of a state
    pub fn get(&self, hash: StateHash) -> f64 {
        self.values[hash.index()]
    }

    /// Set the value of a state
    pub fn set(&mut self, hash: StateHash, value: f64) {
        self.values[hash.index()] = value;
    }

    /// Move a value toward `target` and return the updated value
    ///
    /// V(s) ← V(s) + α[target − V(s)]
    pub fn td_update(&mut self, hash: StateHash, target: f64, alpha: f64) -> f64 {
        let slot = &mut self.values[hash.index()];
        *slot += alpha * (target - *slot);
        *slot
    }

    /// Number of entries (always 3^9)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean, minimum and maximum over every entry
    pub fn summary(&self) -> ValueSummary {
        let (sum, min, max) = self.values.iter().fold(
            (0.0, f64::INFINITY, f64::NEG_INFINITY),
            |(sum, min, max), &v| (sum + v, min.min(v), max.max(v)),
        );
        ValueSummary {
            mean: sum / self.values.len() as f64,
            min,
            max,
        }
    }
}
