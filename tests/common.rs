//! Common test utilities for the tictactoe-td test suite.

#![allow(dead_code)]

use tictactoe_td::{
    BoardState, Outcome, Player, Position, Result, StateHash, ports::Learner,
};

/// Participant that plays a fixed list of moves and remembers what the
/// runner told it.
pub struct ScriptedPlayer {
    symbol: Player,
    moves: Vec<Position>,
    next: usize,
    pub visited: Vec<StateHash>,
    pub learned: Vec<Outcome>,
}

impl ScriptedPlayer {
    pub fn new(symbol: Player, moves: &[(usize, usize)]) -> Self {
        Self {
            symbol,
            moves: moves
                .iter()
                .map(|&(row, col)| Position::new(row, col).unwrap())
                .collect(),
            next: 0,
            visited: Vec::new(),
            learned: Vec::new(),
        }
    }
}

impl Learner for ScriptedPlayer {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn select_move(&mut self, state: &BoardState) -> Result<Position> {
        // Skip scripted cells that are already taken
        while let Some(&position) = self.moves.get(self.next) {
            self.next += 1;
            if state.is_empty(position.row(), position.col()) {
                return Ok(position);
            }
        }
        state
            .empty_positions()
            .first()
            .copied()
            .ok_or(tictactoe_td::Error::NoValidMoves)
    }

    fn record_visited(&mut self, hash: StateHash) {
        self.visited.push(hash);
    }

    fn learn(&mut self, outcome: Outcome) -> Result<()> {
        self.learned.push(outcome);
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Board from a compact `"XO./.../..."` layout
pub fn board(layout: &str) -> BoardState {
    BoardState::from_string(layout).unwrap()
}
