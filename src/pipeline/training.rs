//! Training pipeline for self-play between two participants

use serde::{Deserialize, Serialize};

use super::episode::play_observed;
use crate::{
    Error, Result,
    ports::{Learner, Observer},
    tictactoe::{BoardState, Outcome, Player},
};

/// Default number of training episodes
pub const DEFAULT_EPISODES: usize = 1000;

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: DEFAULT_EPISODES,
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episodes must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Running count of finished games by result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl OutcomeTally {
    /// Count a finished game; unfinished outcomes are ignored
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won(Player::X) => self.x_wins += 1,
            Outcome::Won(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    fn rate(&self, count: usize) -> f64 {
        let total = self.total();
        if total > 0 {
            count as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Games won by X
    pub x_wins: usize,

    /// Games won by O
    pub o_wins: usize,

    /// Drawn games
    pub draws: usize,

    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub draw_rate: f64,
}

impl From<OutcomeTally> for TrainingResult {
    fn from(tally: OutcomeTally) -> Self {
        Self {
            total_games: tally.total(),
            x_wins: tally.x_wins,
            o_wins: tally.o_wins,
            draws: tally.draws,
            x_win_rate: tally.rate(tally.x_wins),
            o_win_rate: tally.rate(tally.o_wins),
            draw_rate: tally.rate(tally.draws),
        }
    }
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline playing a fixed number of episodes between two seats
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run `episodes` games, each on a fresh board, with `p1` always moving
    /// first.
    pub fn run(&mut self, p1: &mut dyn Learner, p2: &mut dyn Learner) -> Result<TrainingResult> {
        self.config.validate()?;
        self.seed_pair(p1, p2)?;

        let mut tally = OutcomeTally::default();

        // Notify observers of training start
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for game_num in 0..self.config.episodes {
            let mut board = BoardState::new();
            let outcome = play_observed(p1, p2, &mut board, game_num, &mut self.observers)?;
            tally.record(outcome);
        }

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        log::info!(
            "trained {} episodes ({} vs {}): X won {}, O won {}, {} draws",
            tally.total(),
            p1.name(),
            p2.name(),
            tally.x_wins,
            tally.o_wins,
            tally.draws
        );

        Ok(TrainingResult::from(tally))
    }

    fn seed_pair(&self, p1: &mut dyn Learner, p2: &mut dyn Learner) -> Result<()> {
        if let Some(seed) = self.config.seed {
            p1.set_rng_seed(seed)?;
            p2.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }
}
