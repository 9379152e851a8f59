//! Error types for the tictactoe-td crate

use thiserror::Error;

/// Main error type for the tictactoe-td crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row},{col}) is already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("position ({row},{col}) is out of bounds (row and column must be 0-2)")]
    InvalidPosition { row: usize, col: usize },

    #[error("invalid board string '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("cannot parse '{input}' as a position (expected 'row,col')")]
    ParsePosition { input: String },

    #[error("state hash {value} is out of range (must be below {limit})")]
    InvalidStateHash { value: u32, limit: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("input closed before a move was entered")]
    InputClosed,

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidMove { row: 1, col: 2 };
        assert_eq!(
            err.to_string(),
            "invalid move: cell (1,2) is already occupied"
        );

        let err = Error::InvalidStateHash {
            value: 20000,
            limit: 19683,
        };
        assert_eq!(
            err.to_string(),
            "state hash 20000 is out of range (must be below 19683)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }
}
