// Parse error taxonomy
//
// All errors are values; the parser never panics on adversarial input.
// Rows are 1-based. Rows reported from inline parsing refer to the sliced
// substring being tokenized and are advisory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    /// No raw-block alternative matched and the input is not at its end.
    #[error("no block rule matched the input")]
    Lex { row: usize },

    /// A heading with an out-of-range level reached the tree mapper.
    #[error("heading level {level} is outside the range 1 to 6")]
    HeadingLevel { level: u8 },

    /// Inline tokenization failed irrecoverably.
    #[error("{message}")]
    Inline { row: usize, message: String },

    /// The configured maximum nesting depth was exceeded.
    #[error("nesting exceeded the configured limit of {limit}")]
    NestingLimit { limit: usize },
}

impl ParseError {
    /// Best-available 1-based row for this error. Errors with no natural
    /// position report row 0.
    pub fn row(&self) -> usize {
        match self {
            ParseError::Lex { row } | ParseError::Inline { row, .. } => *row,
            ParseError::HeadingLevel { .. } | ParseError::NestingLimit { .. } => 0,
        }
    }
}

/// Render an error the way hosts display it.
pub fn error_to_string(error: &ParseError) -> String {
    format!("Problem at row {}\n{}", error.row(), error)
}
