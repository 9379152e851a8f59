//! CLI infrastructure for the tictactoe-td binary
//!
//! This module provides the command-line interface for training the two
//! value-learning agents and for playing against them.

pub mod commands;
pub mod output;
