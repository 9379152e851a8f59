//! Game outcome

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Player;

/// Status of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won(Player),
    Draw,
}

impl Outcome {
    /// Check if the game is over (win or draw)
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Get the winner if there is one
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// Terminal reward for `player`: 1 for its win, 0 otherwise
    pub fn reward(self, player: Player) -> f64 {
        if self == Outcome::Won(player) {
            1.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Won(player) => write!(f, "{player} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_only_for_winner() {
        assert_eq!(Outcome::Won(Player::X).reward(Player::X), 1.0);
        assert_eq!(Outcome::Won(Player::X).reward(Player::O), 0.0);
        assert_eq!(Outcome::Draw.reward(Player::X), 0.0);
        assert_eq!(Outcome::InProgress.reward(Player::O), 0.0);
    }

    #[test]
    fn test_terminal_and_winner() {
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Draw.is_terminal());
        assert_eq!(Outcome::Won(Player::O).winner(), Some(Player::O));
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
