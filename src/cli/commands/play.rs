//! Play command - Train both agents, then play against one of them

use std::io::{self, BufRead, BufReader, Write};

use anyhow::Result;
use clap::Parser;

use super::train::{TrainingOptions, parse_player_token, report, train_agents};
use crate::{
    Error,
    agent::TdAgent,
    cli::output::{print_kv, print_section},
    human::HumanPlayer,
    pipeline::{ConsoleObserver, OutcomeTally, play_observed},
    ports::{Learner, Observer},
    tictactoe::{BoardState, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Train X and O agents, then play against the trained agent")]
pub struct PlayArgs {
    #[command(flatten)]
    pub training: TrainingOptions,

    /// Which token the human controls (`x` moves first)
    #[arg(long, default_value = "o")]
    pub human: String,

    /// Show the agent's value estimates before each greedy move
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

/// Games finished during an interactive session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub tally: OutcomeTally,
    /// Whether the input ended before the human declined another game
    pub input_closed: bool,
}

impl SessionStats {
    pub fn games(&self) -> usize {
        self.tally.total()
    }
}

/// Play games between `agent` and `human` until the human declines another
/// one or the input ends.
///
/// X always moves first. The agent keeps learning from every finished game.
pub fn run_session<R, W>(
    agent: &mut TdAgent,
    human: &mut HumanPlayer<R, W>,
    observers: &mut [Box<dyn Observer>],
) -> Result<SessionStats>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let mut stats = SessionStats::default();

    for game_num in 0.. {
        let mut board = BoardState::new();
        let played = if human.symbol() == Player::X {
            play_observed(&mut *human, &mut *agent, &mut board, game_num, observers)
        } else {
            play_observed(&mut *agent, &mut *human, &mut board, game_num, observers)
        };

        match played {
            Ok(outcome) => stats.tally.record(outcome),
            Err(Error::InputClosed) => {
                stats.input_closed = true;
                break;
            }
            Err(err) => return Err(err.into()),
        }

        if !human.confirm("Play again?")? {
            break;
        }
    }

    Ok(stats)
}

fn print_session(stats: &SessionStats, human: Player) {
    let (wins, losses) = match human {
        Player::X => (stats.tally.x_wins, stats.tally.o_wins),
        Player::O => (stats.tally.o_wins, stats.tally.x_wins),
    };

    print_section("Session Complete");
    print_kv("Games", &stats.games().to_string());
    print_kv("You won", &wins.to_string());
    print_kv("You lost", &losses.to_string());
    print_kv("Draws", &stats.tally.draws.to_string());
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_player = parse_player_token(&args.human, "--human")?;

    let trained = train_agents(&args.training)?;
    report(&trained);

    let mut agent = match human_player {
        Player::X => trained.o,
        Player::O => trained.x,
    };
    agent.set_verbose(args.verbose);

    println!(
        "\nYou play {human_player} against {} (epsilon {}, alpha {}). {} moves first.",
        agent.name(),
        agent.epsilon(),
        agent.alpha(),
        Player::X
    );

    let mut human = HumanPlayer::new(human_player, BufReader::new(io::stdin()), io::stdout());
    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(ConsoleObserver::new(io::stdout()))];

    let stats = run_session(&mut agent, &mut human, &mut observers)?;
    if stats.input_closed {
        log::info!("input closed, ending session");
    }
    print_session(&stats, human_player);

    Ok(())
}
