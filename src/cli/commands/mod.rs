//! Subcommands of the tictactoe-td binary

pub mod play;
pub mod train;
