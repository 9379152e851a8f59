//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default exploration probability
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Default learning rate
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Configuration for creating a TD agent.
///
/// Builder-style API; both learning parameters stay fixed for the agent's
/// lifetime.
///
/// # Examples
///
/// ```
/// use tictactoe_td::config::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_epsilon(0.2)
///     .with_alpha(0.3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Probability of taking a uniformly random move
    pub epsilon: f64,
    /// Learning rate α of the TD update
    pub alpha: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Keep per-cell candidate values of greedy decisions for display
    pub verbose: bool,
}

impl AgentConfig {
    /// Create a configuration with the default parameters
    /// (epsilon 0.1, alpha 0.5, no seed, not verbose).
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            alpha: DEFAULT_ALPHA,
            seed: None,
            verbose: false,
        }
    }

    /// Set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable value annotations.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check that epsilon lies in [0, 1] and alpha in (0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon must be in [0, 1], got {}", self.epsilon),
            });
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha must be in (0, 1], got {}", self.alpha),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
