//! Human player reading moves from a line-oriented input
//!
//! Moves are typed as `row,col`. Malformed, out-of-range and occupied cells
//! are answered with a message and a new prompt; only the end of input ends
//! the move request, as [`Error::InputClosed`].

use std::io::{BufRead, Write};

use crate::{
    Error, Result,
    ports::Learner,
    tictactoe::{BoardState, Player, Position, SIZE},
};

/// Console participant driven by a reader and a writer
pub struct HumanPlayer<R, W> {
    name: String,
    symbol: Player,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(symbol: Player, input: R, output: W) -> Self {
        Self {
            name: format!("Human-{symbol}"),
            symbol,
            input,
            output,
        }
    }

    /// Output written so far
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Next input line, or `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced, so such a line is rejected by
    /// the parser like any other malformed answer.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut bytes)
            .map_err(|source| Error::Io {
                operation: "read player input".to_string(),
                source,
            })?;
        Ok((read > 0).then(|| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Ask a yes/no question; an empty answer means yes, end of input means no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            write!(self.output, "{question} [Y/n]: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => writeln!(self.output, "Please answer 'y' or 'n' (got '{other}').")?,
            }
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Learner for HumanPlayer<R, W> {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn select_move(&mut self, state: &BoardState) -> Result<Position> {
        if state.is_full() {
            return Err(Error::NoValidMoves);
        }

        loop {
            write!(
                self.output,
                "Enter coordinates row,col for your next move ({} plays, 0-{}): ",
                self.symbol,
                SIZE - 1
            )?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Err(Error::InputClosed);
            };

            match line.trim().parse::<Position>() {
                Ok(position) if state.is_empty(position.row(), position.col()) => {
                    return Ok(position);
                }
                Ok(position) => {
                    writeln!(self.output, "Cell {position} is already taken.")?;
                }
                Err(err) => {
                    writeln!(self.output, "Invalid move: {err}.")?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn human(input: &str) -> HumanPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        HumanPlayer::new(Player::O, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(player: &HumanPlayer<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(player.output().clone()).unwrap()
    }

    #[test]
    fn test_reads_valid_move() {
        let mut player = human("1,2\n");
        let position = player.select_move(&BoardState::new()).unwrap();
        assert_eq!(position, Position::new(1, 2).unwrap());
    }

    #[test]
    fn test_reprompts_until_valid() {
        let mut player = human("hello\n3,3\n0,0\n 2 , 1 \n");
        let board = BoardState::from_string("X../.../...").unwrap();

        let position = player.select_move(&board).unwrap();
        assert_eq!(position, Position::new(2, 1).unwrap());

        let output = written(&player);
        assert_eq!(output.matches("Enter coordinates").count(), 4);
        assert!(output.contains("cannot parse 'hello"));
        assert!(output.contains("out of bounds"));
        assert!(output.contains("Cell 0,0 is already taken."));
    }

    #[test]
    fn test_non_utf8_line_is_retried() {
        let mut player = HumanPlayer::new(
            Player::O,
            Cursor::new(b"\xff\xfe\n1,1\n".to_vec()),
            Vec::new(),
        );
        let position = player.select_move(&BoardState::new()).unwrap();
        assert_eq!(position, Position::new(1, 1).unwrap());

        let output = written(&player);
        assert_eq!(output.matches("Enter coordinates").count(), 2);
        assert!(output.contains("Invalid move"));
    }

    #[test]
    fn test_confirm_retries_non_utf8_answer() {
        let mut player = HumanPlayer::new(
            Player::O,
            Cursor::new(b"\xc3\n\ny\n".to_vec()),
            Vec::new(),
        );
        assert!(player.confirm("Play again?").unwrap());
        assert!(written(&player).contains("Please answer 'y' or 'n'"));
    }

    #[test]
    fn test_end_of_input_is_reported() {
        let mut player = human("nonsense\n");
        assert!(matches!(
            player.select_move(&BoardState::new()),
            Err(Error::InputClosed)
        ));
    }

    #[test]
    fn test_confirm_answers() {
        let mut player = human("\nmaybe\nn\n");
        assert!(player.confirm("Play again?").unwrap());
        assert!(!player.confirm("Play again?").unwrap());
        assert!(written(&player).contains("Please answer 'y' or 'n' (got 'maybe')."));
        // Input exhausted
        assert!(!player.confirm("Play again?").unwrap());
    }

    #[test]
    fn test_human_does_not_learn() {
        let mut player = human("");
        assert!(player.learn(crate::tictactoe::Outcome::Draw).is_ok());
        assert!(player.move_values().is_none());
        assert_eq!(player.name(), "Human-O");
    }
}
