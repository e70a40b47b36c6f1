//! Error types for the Tally scanner.

use thiserror::Error;

/// A position in the source where no token boundary could be recognised.
///
/// Line numbers are stored 0-based and displayed 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("SCAN ERROR on line {}: unexpected character '{ch}'", .line + 1)]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("SCAN ERROR on line {}: unterminated string constant", .line + 1)]
    UnterminatedString { line: usize },

    #[error("SCAN ERROR on line {}: expected '{expected}' but found {}", .line + 1, describe(.found))]
    IncompleteOperator {
        expected: &'static str,
        found: Option<char>,
        line: usize,
    },

    #[error("SCAN ERROR on line {}: malformed number '{text}'", .line + 1)]
    MalformedNumber { text: String, line: usize },
}

impl ScanError {
    /// 0-based line where scanning failed.
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnexpectedCharacter { line, .. }
            | ScanError::UnterminatedString { line }
            | ScanError::IncompleteOperator { line, .. }
            | ScanError::MalformedNumber { line, .. } => *line,
        }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("'{}'", ch),
        None => "end of input".to_string(),
    }
}
