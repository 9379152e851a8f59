//! Text rendering of boards

use crate::tictactoe::{BoardState, Cell, Position, SIZE};

/// Renders a board as a text grid, optionally annotating empty cells with
/// the values an agent considered for them.
///
/// ```text
///  X | O |
/// ---+---+---
///    | X |
/// ---+---+---
///    |   | O
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    /// Plain grid
    pub fn render(&self, board: &BoardState) -> String {
        self.render_grid(board, None)
    }

    /// Grid with each annotated empty cell showing its value
    pub fn render_with_values(&self, board: &BoardState, values: &[(Position, f64)]) -> String {
        self.render_grid(board, Some(values))
    }

    fn render_grid(&self, board: &BoardState, values: Option<&[(Position, f64)]>) -> String {
        let width = if values.is_some() { 6 } else { 3 };
        let separator = vec!["-".repeat(width); SIZE].join("+");

        let mut lines = Vec::with_capacity(2 * SIZE - 1);
        for row in 0..SIZE {
            if row > 0 {
                lines.push(separator.clone());
            }
            let cells: Vec<String> = (0..SIZE)
                .map(|col| {
                    let text = Self::cell_text(board, Position::from_index(row * SIZE + col), values);
                    format!("{text:^width$}")
                })
                .collect();
            lines.push(cells.join("|").trim_end().to_string());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn cell_text(
        board: &BoardState,
        position: Position,
        values: Option<&[(Position, f64)]>,
    ) -> String {
        match board.get(position.row(), position.col()) {
            Cell::X => "X".to_string(),
            Cell::O => "O".to_string(),
            Cell::Empty => values
                .and_then(|values| values.iter().find(|(p, _)| *p == position))
                .map(|(_, value)| format!("{value:.2}"))
                .unwrap_or_default(),
        }
    }
}
