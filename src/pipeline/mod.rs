//! Episode and training pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Playing single episodes between two participants
//! - Training two participants over many episodes
//! - Recording observations during play

pub mod episode;
pub mod observers;
pub mod training;

pub use episode::{play, play_observed};
// Re-export observer implementations (adapters)
pub use observers::{
    ConsoleObserver, GameRecord, JsonlObserver, MetricsObserver, MetricsSummary, MoveRecord,
    ProgressObserver,
};
pub use training::{
    DEFAULT_EPISODES, OutcomeTally, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::{Learner, Observer};
