//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::OutcomeTally;
use crate::{
    Result,
    ports::Observer,
    render::Renderer,
    tictactoe::{BoardState, Cell, Outcome, Player, Position},
};

/// A single ply of a recorded game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Ply number within game
    pub ply: usize,
    /// Player who moved
    pub player: Player,
    pub row: usize,
    pub col: usize,
    /// Board after the move
    pub board: String,
    /// Candidate values of a greedy move, if the mover exposed them
    pub values: Option<Vec<(Position, f64)>>,
}

/// Complete record of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game number
    pub game_num: usize,
    /// Final outcome
    pub outcome: Outcome,
    /// Plies in order
    pub moves: Vec<MoveRecord>,
    /// Total plies in game
    pub total_moves: usize,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: OutcomeTally,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            tally: OutcomeTally::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "X:{} O:{} D:{}",
            self.tally.x_wins, self.tally.o_wins, self.tally.draws
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        self.tally.record(outcome);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts and game lengths
pub struct MetricsObserver {
    tally: OutcomeTally,
    move_counts: Vec<usize>,
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub avg_game_length: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            tally: OutcomeTally::default(),
            move_counts: Vec::new(),
        }
    }

    /// Get average game length in plies
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.tally.total(),
            x_wins: self.tally.x_wins,
            o_wins: self.tally.o_wins,
            draws: self.tally.draws,
            avg_game_length: self.avg_game_length(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        _board: &BoardState,
        _position: Position,
        _player: Player,
        _values: Option<&[(Position, f64)]>,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> Result<()> {
        self.tally.record(outcome);
        Ok(())
    }
}

/// JSONL observer - Exports one game record per line
pub struct JsonlObserver<W: Write + Send = BufWriter<File>> {
    writer: W,
    current_moves: Vec<MoveRecord>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to a file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonlObserver<W> {
    /// Create a JSONL observer on any writer
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            current_moves: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for JsonlObserver<W> {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_moves.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        ply: usize,
        board: &BoardState,
        position: Position,
        player: Player,
        values: Option<&[(Position, f64)]>,
    ) -> Result<()> {
        self.current_moves.push(MoveRecord {
            ply,
            player,
            row: position.row(),
            col: position.col(),
            board: board.to_string(),
            values: values.map(<[_]>::to_vec),
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome) -> Result<()> {
        let record = GameRecord {
            game_num,
            outcome,
            total_moves: self.current_moves.len(),
            moves: std::mem::take(&mut self.current_moves),
        };

        // Write as JSONL (one JSON object per line)
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

/// Console observer - Draws the board after every ply
///
/// When the mover exposes the values behind a greedy move, they are drawn on
/// the board as it was before the move.
pub struct ConsoleObserver<W: Write + Send> {
    writer: W,
    renderer: Renderer,
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            renderer: Renderer::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for ConsoleObserver<W> {
    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        writeln!(self.writer, "\nGame {}", game_num + 1)?;
        write!(self.writer, "{}", self.renderer.render(&BoardState::new()))?;
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        board: &BoardState,
        position: Position,
        player: Player,
        values: Option<&[(Position, f64)]>,
    ) -> Result<()> {
        if let Some(values) = values {
            let mut before = *board;
            before.place_at(position, Cell::Empty);
            writeln!(self.writer, "\nValues considered by {player}:")?;
            write!(
                self.writer,
                "{}",
                self.renderer.render_with_values(&before, values)
            )?;
        }
        writeln!(self.writer, "\n{player} plays {position}")?;
        write!(self.writer, "{}", self.renderer.render(board))?;
        self.writer.flush()?;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome) -> Result<()> {
        let message = match outcome {
            Outcome::Won(player) => format!("{player} wins!"),
            Outcome::Draw => "It's a draw.".to_string(),
            Outcome::InProgress => "Game abandoned.".to_string(),
        };
        writeln!(self.writer, "{message}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_top_row() -> Vec<(Position, Player, BoardState)> {
        let moves = [
            (0, 0, Player::X),
            (1, 0, Player::O),
            (0, 1, Player::X),
            (2, 2, Player::O),
            (0, 2, Player::X),
        ];
        let mut board = BoardState::new();
        moves
            .iter()
            .map(|&(row, col, player)| {
                let position = Position::new(row, col).unwrap();
                board.place_at(position, player.to_cell());
                (position, player, board)
            })
            .collect()
    }

    fn replay(observer: &mut dyn Observer) {
        observer.on_game_start(0).unwrap();
        for (ply, (position, player, board)) in x_top_row().into_iter().enumerate() {
            observer
                .on_move(0, ply, &board, position, player, None)
                .unwrap();
        }
        observer.on_game_end(0, Outcome::Won(Player::X)).unwrap();
    }

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();
        replay(&mut observer);
        observer.on_game_start(1).unwrap();
        observer.on_game_end(1, Outcome::Draw).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.x_wins, 1);
        assert_eq!(summary.draws, 1);
        assert!((summary.avg_game_length - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_jsonl_observer_writes_one_line_per_game() {
        let mut observer = JsonlObserver::from_writer(Vec::new());
        replay(&mut observer);
        replay(&mut observer);

        let text = String::from_utf8(observer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: GameRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(record.total_moves, 5);
        assert_eq!(record.outcome, Outcome::Won(Player::X));
        assert_eq!(record.moves[4].board, "XXX/O../..O");
    }

    #[test]
    fn test_console_observer_shows_values_on_previous_board() {
        let mut observer = ConsoleObserver::new(Vec::new());
        let mut board = BoardState::new();
        board.place(1, 1, Cell::X);
        let values = [(Position::new(1, 1).unwrap(), 0.5)];

        observer
            .on_move(0, 0, &board, Position::new(1, 1).unwrap(), Player::X, Some(&values))
            .unwrap();
        observer.on_game_end(0, Outcome::Draw).unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert!(text.contains("Values considered by X:"));
        assert!(text.contains("0.50"));
        assert!(text.contains("X plays 1,1"));
        assert!(text.ends_with("It's a draw.\n"));
    }
}
