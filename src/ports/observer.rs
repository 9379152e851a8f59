//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing episodes, allowing
//! composable data collection without coupling the episode runner to specific
//! output formats or metrics.

use crate::{
    Result,
    tictactoe::{BoardState, Outcome, Player, Position},
};

/// Observer trait for monitoring episodes
///
/// Observers can be composed to collect different types of data:
/// - Progress bars for user feedback
/// - JSONL export for analysis
/// - Metrics tracking
/// - Console display of the board during human play
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each ply in the game
///    - `on_game_end(game_num, outcome)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{
///     ports::Observer,
///     tictactoe::Outcome,
/// };
///
/// struct CustomObserver {
///     game_count: usize,
/// }
///
/// impl Observer for CustomObserver {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         _outcome: Outcome
///     ) -> tictactoe_td::Result<()> {
///         self.game_count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `total_games` - Total number of games that will be played
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the game (0-based)
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each ply has been applied to the board.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `ply` - Ply number within the game (0-based)
    /// * `board` - Board state after the move
    /// * `position` - Cell that was filled
    /// * `player` - Player who moved
    /// * `values` - Candidate values behind a greedy move, when the mover exposes them
    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        _board: &BoardState,
        _position: Position,
        _player: Player,
        _values: Option<&[(Position, f64)]>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends, after both players have learned.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the completed game
    /// * `outcome` - Final outcome
    fn on_game_end(&mut self, _game_num: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
