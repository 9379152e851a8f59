//! Tabular TD(0) agent
//!
//! The agent estimates, for every state hash, the probability that its symbol
//! goes on to win. Moves are chosen ε-greedily against those estimates, and at
//! the end of each episode the visited states are updated backwards from the
//! terminal reward.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    config::AgentConfig,
    error::{Error, Result},
    ports::Learner,
    tictactoe::{BoardState, Outcome, Player, Position, StateHash},
    value_table::ValueTable,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// How the most recent move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Uniformly random empty cell
    Explore,
    /// Empty cell leading to the highest-valued state
    Exploit,
}

/// State-value agent with an ε-greedy policy and backward TD(0) learning
#[derive(Debug, Clone)]
pub struct TdAgent {
    name: String,
    symbol: Player,
    values: ValueTable,
    epsilon: f64,
    alpha: f64,
    /// Hashes observed during the current episode, oldest first
    history: Vec<StateHash>,
    rng: StdRng,
    verbose: bool,
    last_decision: Option<Decision>,
    last_move_values: Vec<(Position, f64)>,
}

impl TdAgent {
    /// Create an agent playing the symbol that owns `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range.
    pub fn new(values: ValueTable, config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let symbol = values.owner();
        Ok(Self {
            name: format!("TD(0)-{symbol}"),
            symbol,
            values,
            epsilon: config.epsilon,
            alpha: config.alpha,
            history: Vec::new(),
            rng: build_rng(config.seed),
            verbose: config.verbose,
            last_decision: None,
            last_move_values: Vec::new(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Keep candidate values of greedy decisions for display
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
        if !verbose {
            self.last_move_values.clear();
        }
    }

    pub fn symbol(&self) -> Player {
        self.symbol
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// States recorded so far in the current episode
    pub fn history(&self) -> &[StateHash] {
        &self.history
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// ε-greedy action selection.
    ///
    /// Draws `u` uniformly from [0, 1) and explores iff `u < ε`, so ε = 0 always
    /// exploits and ε = 1 always explores. The board is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board has no empty cell.
    pub fn choose_action(&mut self, board: &BoardState) -> Result<Position> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return Err(Error::NoValidMoves);
        }

        if self.rng.random::<f64>() < self.epsilon {
            self.last_decision = Some(Decision::Explore);
            self.last_move_values.clear();
            if self.verbose {
                log::info!("{} takes a random move", self.name);
            }
            empty.choose(&mut self.rng).copied().ok_or(Error::NoValidMoves)
        } else {
            self.last_decision = Some(Decision::Exploit);
            let candidates = self.candidate_values(board, &empty);
            let position = Self::best_candidate(&candidates).ok_or(Error::NoValidMoves)?;
            log::trace!("{} exploits {position} on {board}", self.name);
            if self.verbose {
                self.last_move_values = candidates;
            }
            Ok(position)
        }
    }

    fn candidate_values(&self, board: &BoardState, empty: &[Position]) -> Vec<(Position, f64)> {
        let mark = self.symbol.to_cell();
        empty
            .iter()
            .map(|&position| {
                let mut trial = *board;
                trial.place_at(position, mark);
                (position, self.values.get(trial.state_hash()))
            })
            .collect()
    }

    /// First candidate with the strictly greatest value
    fn best_candidate(candidates: &[(Position, f64)]) -> Option<Position> {
        let mut best: Option<(Position, f64)> = None;
        for &(position, value) in candidates {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((position, value)),
            }
        }
        best.map(|(position, _)| position)
    }

    /// Append a state observed during the current episode
    pub fn record_visited(&mut self, hash: StateHash) {
        self.history.push(hash);
    }

    /// Backward TD(0) pass over the episode history.
    ///
    /// The target starts at the terminal reward (1 for a win by this agent,
    /// 0 otherwise) and each updated value becomes the target for the state
    /// visited before it:
    ///
    /// V(s) ← V(s) + α[target − V(s)], target ← V(s)
    ///
    /// The history is cleared afterwards.
    pub fn learn_from(&mut self, outcome: Outcome) {
        let mut target = outcome.reward(self.symbol);
        for &hash in self.history.iter().rev() {
            target = self.values.td_update(hash, target, self.alpha);
        }
        log::trace!(
            "{} updated {} states after {outcome}",
            self.name,
            self.history.len()
        );
        self.history.clear();
    }
}

impl Learner for TdAgent {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn select_move(&mut self, state: &BoardState) -> Result<Position> {
        self.choose_action(state)
    }

    fn record_visited(&mut self, hash: StateHash) {
        TdAgent::record_visited(self, hash);
    }

    fn learn(&mut self, outcome: Outcome) -> Result<()> {
        self.learn_from(outcome);
        Ok(())
    }

    fn reset_episode(&mut self) {
        if !self.history.is_empty() {
            log::debug!("{} drops {} unfinished states", self.name, self.history.len());
        }
        self.history.clear();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn move_values(&self) -> Option<&[(Position, f64)]> {
        match self.last_decision {
            Some(Decision::Exploit) if self.verbose => Some(&self.last_move_values),
            _ => None,
        }
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        enumeration::enumerate_states,
        value_table::{initialize_vo, initialize_vx},
    };

    fn blank_table(owner: Player) -> ValueTable {
        ValueTable::seeded(owner, &[])
    }

    fn agent(values: ValueTable, epsilon: f64) -> TdAgent {
        TdAgent::new(values, &AgentConfig::new().with_epsilon(epsilon).with_seed(7)).unwrap()
    }

    fn hash_of(layout: &str) -> StateHash {
        BoardState::from_string(layout).unwrap().state_hash()
    }

    #[test]
    fn test_backward_td_recurrence() {
        let mut agent = agent(blank_table(Player::X), 0.0);
        let h1 = hash_of("X../.../...");
        let h2 = hash_of("X../.O./...");
        let h3 = hash_of("XX./.O./...");
        for hash in [h1, h2, h3] {
            agent.record_visited(hash);
        }

        agent.learn_from(Outcome::Won(Player::X));

        let values = agent.values();
        assert!((values.get(h3) - 0.75).abs() < 1e-12);
        assert!((values.get(h2) - 0.625).abs() < 1e-12);
        assert!((values.get(h1) - 0.5625).abs() < 1e-12);
        assert!(agent.history().is_empty());
    }

    #[test]
    fn test_loss_pulls_values_toward_zero() {
        let mut agent = agent(blank_table(Player::O), 0.0);
        let h1 = hash_of("X../.../...");
        let h2 = hash_of("X../.O./...");
        agent.record_visited(h1);
        agent.record_visited(h2);

        agent.learn_from(Outcome::Won(Player::X));

        // target 0: h2 = 0.25, h1 = 0.5 + 0.5 * (0.25 - 0.5) = 0.375
        assert!((agent.values().get(h2) - 0.25).abs() < 1e-12);
        assert!((agent.values().get(h1) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_draw_is_zero_reward() {
        let mut agent = agent(blank_table(Player::X), 0.0);
        let h = hash_of("X../.../...");
        agent.record_visited(h);
        agent.learn_from(Outcome::Draw);
        assert!((agent.values().get(h) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_learn_only_touches_own_history() {
        let states = enumerate_states();
        let mut x = agent(initialize_vx(&states), 0.0);
        let o = agent(initialize_vo(&states), 0.0);
        let h = hash_of("X../.../...");
        x.record_visited(h);
        x.learn_from(Outcome::Won(Player::X));

        assert!((x.values().get(h) - 0.75).abs() < 1e-12);
        assert_eq!(o.values().get(h), 0.5);
    }

    #[test]
    fn test_zero_epsilon_always_exploits() {
        let mut agent = agent(blank_table(Player::X), 0.0);
        let board = BoardState::new();
        for _ in 0..200 {
            agent.choose_action(&board).unwrap();
            assert_eq!(agent.last_decision(), Some(Decision::Exploit));
        }
    }

    #[test]
    fn test_full_epsilon_always_explores() {
        let mut agent = agent(blank_table(Player::X), 1.0);
        let board = BoardState::new();
        let mut chosen = std::collections::HashSet::new();
        for _ in 0..200 {
            let position = agent.choose_action(&board).unwrap();
            assert_eq!(agent.last_decision(), Some(Decision::Explore));
            assert!(board.is_empty(position.row(), position.col()));
            chosen.insert(position);
        }
        assert!(chosen.len() > 1, "random moves should vary");
    }

    #[test]
    fn test_exploit_picks_highest_value() {
        let mut values = blank_table(Player::X);
        values.set(hash_of(".../.X./..."), 0.9);
        values.set(hash_of(".../.../..X"), 0.8);
        let mut agent = agent(values, 0.0);

        let position = agent.choose_action(&BoardState::new()).unwrap();
        assert_eq!(position, Position::new(1, 1).unwrap());
    }

    #[test]
    fn test_exploit_ties_keep_first_in_scan_order() {
        let mut agent = agent(blank_table(Player::X), 0.0);
        let board = BoardState::from_string("XO./.../...").unwrap();
        let position = agent.choose_action(&board).unwrap();
        assert_eq!(position, Position::new(0, 2).unwrap());
    }

    #[test]
    fn test_exploit_takes_immediate_win_with_seeded_tables() {
        let states = enumerate_states();
        let mut agent = agent(initialize_vx(&states), 0.0);
        let board = BoardState::from_string("XX./OO./...").unwrap();
        let position = agent.choose_action(&board).unwrap();
        assert_eq!(position, Position::new(0, 2).unwrap());
    }

    #[test]
    fn test_choose_action_leaves_board_untouched() {
        let mut agent = agent(blank_table(Player::O), 0.0);
        let mut board = BoardState::from_string("X../.../...").unwrap();
        let before_outcome = board.evaluate_outcome(false);
        let before = board;

        agent.choose_action(&board).unwrap();

        assert_eq!(board, before);
        assert_eq!(board.evaluate_outcome(false), before_outcome);
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut agent = agent(blank_table(Player::X), 0.0);
        let board = BoardState::from_string("XOX/XOO/OXX").unwrap();
        assert!(matches!(
            agent.choose_action(&board),
            Err(Error::NoValidMoves)
        ));
    }

    #[test]
    fn test_verbose_exposes_values_only_when_exploiting() {
        let config = AgentConfig::new()
            .with_epsilon(0.0)
            .with_seed(1)
            .with_verbose(true);
        let mut greedy = TdAgent::new(blank_table(Player::X), &config).unwrap();
        greedy.choose_action(&BoardState::new()).unwrap();
        let values = Learner::move_values(&greedy).unwrap();
        assert_eq!(values.len(), 9);
        assert!(values.iter().all(|&(_, v)| v == 0.5));

        let mut random = TdAgent::new(blank_table(Player::X), &config.with_epsilon(1.0)).unwrap();
        random.choose_action(&BoardState::new()).unwrap();
        assert_eq!(random.last_decision(), Some(Decision::Explore));
        assert!(Learner::move_values(&random).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AgentConfig::new().with_alpha(2.0);
        assert!(TdAgent::new(blank_table(Player::X), &config).is_err());
    }
}
