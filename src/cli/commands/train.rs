//! Train command - Self-play training of the X and O value tables

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::{Args, Parser};
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    agent::TdAgent,
    cli::output::{print_section, print_subsection, print_training_result, print_value_summary},
    config::{AgentConfig, DEFAULT_ALPHA, DEFAULT_EPSILON},
    enumeration::enumerate_states,
    pipeline::{
        DEFAULT_EPISODES, JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    tictactoe::Player,
    value_table::{ValueSummary, initialize_vo, initialize_vx},
};

#[derive(Debug, Serialize)]
struct SummaryConfig {
    episodes: usize,
    epsilon: f64,
    alpha: f64,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct ValueTableSummaries {
    x: ValueSummary,
    o: ValueSummary,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    config: SummaryConfig,
    values: ValueTableSummaries,
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Training flags shared by `train` and `play`
#[derive(Args, Debug, Clone)]
pub struct TrainingOptions {
    /// Number of self-play training episodes
    #[arg(long, short = 'e', default_value_t = DEFAULT_EPISODES)]
    pub episodes: usize,

    /// Exploration probability of both agents (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Learning rate of both agents (0.0-1.0]
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional file for JSONL observations of every training game
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,
}

impl TrainingOptions {
    fn agent_config(&self) -> AgentConfig {
        AgentConfig::new()
            .with_epsilon(self.epsilon)
            .with_alpha(self.alpha)
    }
}

/// The two agents after self-play, with the outcome counts of the run
pub struct TrainedAgents {
    pub x: TdAgent,
    pub o: TdAgent,
    pub result: TrainingResult,
}

/// Seed both value tables from the state enumeration and train them against
/// each other, X always moving first.
pub fn train_agents(options: &TrainingOptions) -> Result<TrainedAgents> {
    let states = enumerate_states();
    let config = options.agent_config();
    let mut x = TdAgent::new(initialize_vx(&states), &config)?;
    let mut o = TdAgent::new(initialize_vo(&states), &config)?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: options.episodes,
        seed: options.seed,
    });
    if options.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &options.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = pipeline.run(&mut x, &mut o)?;
    Ok(TrainedAgents { x, o, result })
}

/// Print outcome counts and value table statistics of a finished run
pub fn report(trained: &TrainedAgents) {
    print_section("Training Complete");
    print_training_result(&trained.result);
    print_subsection("Value tables");
    print_value_summary("X table", &trained.x.values().summary());
    print_value_summary("O table", &trained.o.values().summary());
}

#[derive(Parser, Debug)]
#[command(about = "Train X and O agents by self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub training: TrainingOptions,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let summary_spec = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let trained = train_agents(&args.training)?;
    report(&trained);

    if let Some(path) = &args.training.observations {
        println!("\nObservations written to {}", path.display());
    }

    if let Some((summary_path, normalized)) = summary_spec {
        if normalized {
            println!("\nNormalizing summary path to {}", summary_path.display());
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = TrainingSummaryFile {
            training: trained.result.clone(),
            config: SummaryConfig {
                episodes: args.training.episodes,
                epsilon: args.training.epsilon,
                alpha: args.training.alpha,
                seed: args.training.seed,
            },
            values: ValueTableSummaries {
                x: trained.x.values().summary(),
                o: trained.o.values().summary(),
            },
        };

        let file = File::create(&summary_path)?;
        to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
