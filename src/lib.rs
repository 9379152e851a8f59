//! Tabular TD(0) learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A 3x3 board with ternary state hashing and cached outcome evaluation
//! - Exhaustive enumeration of all 3^9 grids to seed per-player value tables
//! - An ε-greedy agent with a backward TD(0) update
//! - An episode runner and a training pipeline with pluggable observers
//! - A console human player and a text renderer

pub mod agent;
pub mod cli;
pub mod config;
pub mod enumeration;
pub mod error;
pub mod human;
pub mod pipeline;
pub mod ports;
pub mod render;
pub mod tictactoe;
pub mod value_table;

pub use agent::{Decision, TdAgent};
pub use config::AgentConfig;
pub use enumeration::{StateEnumerator, enumerate_states};
pub use error::{Error, Result};
pub use human::HumanPlayer;
pub use pipeline::{TrainingConfig, TrainingPipeline, TrainingResult, play};
pub use render::Renderer;
pub use tictactoe::{BoardState, Cell, Outcome, Player, Position, StateHash};
pub use value_table::{ValueTable, initialize_vo, initialize_vx};
