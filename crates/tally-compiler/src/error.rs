//! Error types for the Tally checker.

use std::path::PathBuf;
use tally_lexer::ScanError;
use tally_parser::ChainLink;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckError>;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("{source}")]
    Scan {
        file: PathBuf,
        #[source]
        source: ScanError,
        /// Trace lines emitted before scanning failed
        trace: Vec<String>,
    },

    /// The single-line diagnostic is the display; the production chain and
    /// the partial trace ride along for callers that want them.
    #[error("{diagnostic}")]
    Syntax {
        file: PathBuf,
        diagnostic: String,
        context: Vec<ChainLink>,
        trace: Vec<String>,
    },

    #[error("Internal analyser error: {0}")]
    Internal(String),
}

impl CheckError {
    /// Trace lines emitted before the failure, if any were collected.
    pub fn trace(&self) -> &[String] {
        match self {
            CheckError::Scan { trace, .. } | CheckError::Syntax { trace, .. } => trace,
            _ => &[],
        }
    }

    /// Enclosing productions, innermost first, as `while parsing <N>` lines.
    pub fn context_lines(&self) -> Vec<String> {
        match self {
            CheckError::Syntax { context, .. } => context
                .iter()
                .rev()
                .filter_map(|link| link.nonterminal)
                .map(|n| format!("while parsing {}", n))
                .collect(),
            _ => Vec::new(),
        }
    }
}
