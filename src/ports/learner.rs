//! Learner port - abstraction over the participants of an episode
//!
//! Both the TD agent and the human player implement this trait, so the
//! episode runner can drive any pairing without knowing who is learning.

use crate::{
    Result,
    tictactoe::{BoardState, Outcome, Player, Position, StateHash},
};

/// Learner trait - Unified interface for everything that can hold a seat
///
/// # Event Sequence
///
/// Within one episode the runner calls:
/// 1. `select_move` on the player to move
/// 2. `record_visited` on both players with the hash after each ply
/// 3. `learn` on both players once the game is over
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{
///     ports::Learner,
///     tictactoe::BoardState,
/// };
///
/// fn opening_move(player: &mut dyn Learner) -> tictactoe_td::Result<()> {
///     let position = player.select_move(&BoardState::new())?;
///     println!("{} opens at {position}", player.name());
///     Ok(())
/// }
/// ```
pub trait Learner: Send {
    /// Symbol this participant places on the board.
    fn symbol(&self) -> Player;

    /// Select an empty cell for the given board.
    ///
    /// # Errors
    ///
    /// Returns an error if no empty cell remains or the move source failed
    /// (for example, closed human input).
    fn select_move(&mut self, state: &BoardState) -> Result<Position>;

    /// Observe the hash of the board after a ply, whoever made it.
    ///
    /// # Default Implementation
    ///
    /// Ignores the state, suitable for participants that do not learn.
    fn record_visited(&mut self, _hash: StateHash) {}

    /// Update after the game completes.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-adaptive participants like a human.
    fn learn(&mut self, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Forget the current episode without learning from it.
    ///
    /// Called when an episode is abandoned part-way, so the states it
    /// recorded never reach a later `learn`.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for participants without episode state.
    fn reset_episode(&mut self) {}

    /// Get the participant's name.
    ///
    /// Used for identification in logs and console output.
    fn name(&self) -> &str;

    /// Per-cell values behind the most recent move, if available.
    ///
    /// # Returns
    ///
    /// * `Some(values)` - Candidate values of a greedy decision
    /// * `None` - Random move, or a participant without value estimates
    fn move_values(&self) -> Option<&[(Position, f64)]> {
        None
    }

    /// Seed the participant's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
