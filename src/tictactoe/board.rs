//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{hash::StateHash, lines::LineAnalyzer, outcome::Outcome};

/// Side length of the board
pub const SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = SIZE * SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Every cell value, in hash digit order
    pub const ALL: [Cell; 3] = [Cell::Empty, Cell::X, Cell::O];

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used by the state hash (Empty=0, X=1, O=2)
    pub fn digit(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    /// Inverse of [`Cell::digit`]
    pub fn from_digit(digit: u32) -> Option<Cell> {
        match digit {
            0 => Some(Cell::Empty),
            1 => Some(Cell::X),
            2 => Some(Cell::O),
            _ => None,
        }
    }

    /// Signed weight used for line sums (X=-1, O=+1, Empty=0)
    pub fn weight(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::X => -1,
            Cell::O => 1,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Line sum of a full line owned by this player
    pub fn line_target(self) -> i8 {
        self.to_cell().weight() * SIZE as i8
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A cell coordinate on the board
///
/// Always inside the board: every constructor checks the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

/// Serialized form of [`Position`], validated on the way in
#[derive(Serialize, Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = crate::Error;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl From<Position> for RawPosition {
    fn from(position: Position) -> Self {
        RawPosition {
            row: position.row,
            col: position.col,
        }
    }
}

impl Position {
    /// Create a position, rejecting coordinates outside the board
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row >= SIZE || col >= SIZE {
            return Err(crate::Error::InvalidPosition { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Position for a row-major cell index
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CELL_COUNT`].
    pub fn from_index(index: usize) -> Self {
        assert!(index < CELL_COUNT, "cell index {index} is outside the board");
        Self {
            row: index / SIZE,
            col: index % SIZE,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = crate::Error;

    /// Parse the `"row,col"` form typed by a human player
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || crate::Error::ParsePosition {
            input: s.to_string(),
        };

        let mut parts = s.trim().split(',');
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(parse_error());
        };

        let row = row.trim().parse::<usize>().map_err(|_| parse_error())?;
        let col = col.trim().parse::<usize>().map_err(|_| parse_error())?;
        Position::new(row, col)
    }
}

/// Mutable 3x3 grid with a cached terminal evaluation
///
/// The cache is cleared by every mutation, so [`BoardState::evaluate_outcome`]
/// never reports the outcome of a grid that no longer exists.
#[derive(Debug, Clone, Copy)]
pub struct BoardState {
    cells: [Cell; CELL_COUNT],
    cached_outcome: Option<Outcome>,
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for BoardState {}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::from_cells([Cell::Empty; CELL_COUNT])
    }

    /// Create a board from row-major cells
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self {
            cells,
            cached_outcome: None,
        }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace and `/` row separators are ignored; the remaining string must
    /// hold exactly nine cell characters (`.`, `X`, `O`).
    ///
    /// # Errors
    ///
    /// Returns error if the cell count is wrong or a character is not a cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoard {
                input: s.to_string(),
                reason: format!("expected {CELL_COUNT} cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidBoard {
                input: s.to_string(),
                reason: format!("invalid character '{c}' at cell {i}"),
            })?;
        }

        Ok(Self::from_cells(cells))
    }

    fn index(row: usize, col: usize) -> usize {
        assert!(
            row < SIZE && col < SIZE,
            "cell ({row},{col}) is outside the {SIZE}x{SIZE} board"
        );
        row * SIZE + col
    }

    /// Row-major cells
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get the cell at (row, col)
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::index(row, col)]
    }

    /// Check if the cell at (row, col) is empty
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Empty
    }

    /// Set the cell at (row, col).
    ///
    /// Emptiness is not re-checked; callers validate with [`BoardState::is_empty`].
    /// Placing [`Cell::Empty`] clears the cell.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the board.
    pub fn place(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[Self::index(row, col)] = cell;
        self.cached_outcome = None;
    }

    /// Set the cell at a [`Position`]
    pub fn place_at(&mut self, position: Position, cell: Cell) {
        self.place(position.row, position.col, cell);
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// Count cells holding the given value
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Base-3 hash of the grid
    pub fn state_hash(&self) -> StateHash {
        StateHash::from_cells(&self.cells)
    }

    /// Compute the outcome without touching the cache.
    ///
    /// Lines are checked before fullness, so a move that completes a line and
    /// fills the board is a win.
    pub fn outcome(&self) -> Outcome {
        if let Some(winner) = LineAnalyzer::winner(&self.cells) {
            Outcome::Won(winner)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Outcome of the grid, reusing the cached value unless `force` is set
    pub fn evaluate_outcome(&mut self, force: bool) -> Outcome {
        match self.cached_outcome {
            Some(outcome) if !force => outcome,
            _ => {
                let outcome = self.outcome();
                self.cached_outcome = Some(outcome);
                outcome
            }
        }
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(SIZE).enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for cell in chunk {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}
