//! Checker driver that loads a source file and runs the syntax analyser.

use std::path::PathBuf;
use tally_lexer::Scanner;
use tally_parser::{LexerAdapter, ParseError, RecordingSink, SyntaxAnalyser};
use crate::error::{CheckError, Result};

/// Result of a successful check
#[derive(Debug)]
pub struct CheckOutput {
    /// Source file that was checked
    pub source_file: PathBuf,
    /// Parse trace, one line per event, ending with `SUCCESS`; empty unless
    /// [`CheckOptions::trace`] was set
    pub trace: Vec<String>,
    /// Number of terminals accepted
    pub terminals: usize,
}

/// Options for checking
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Input source file
    pub input: PathBuf,
    /// Keep the parse trace in the output and in errors
    pub trace: bool,
}

impl CheckOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            trace: false,
        }
    }

    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// The Tally syntax checker
pub struct Checker {
    options: CheckOptions,
}

impl Checker {
    /// Create a new checker with the given options
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Load the input file and check it
    pub fn check(&self) -> Result<CheckOutput> {
        let source = self.read_source()?;
        tracing::info!(file = %self.options.input.display(), bytes = source.len(), "checking");
        self.check_source(&source)
    }

    /// Check source text as if it came from the input file
    pub fn check_source(&self, source: &str) -> Result<CheckOutput> {
        let mut sink = RecordingSink::new();
        let result = SyntaxAnalyser::new(LexerAdapter::new(Scanner::new(source)), &mut sink).parse();
        let trace = if self.options.trace {
            sink.trace_lines()
        } else {
            Vec::new()
        };

        match result {
            Ok(()) => {
                tracing::debug!(events = sink.events().len(), "check succeeded");
                Ok(CheckOutput {
                    source_file: self.options.input.clone(),
                    terminals: sink.terminals().len(),
                    trace,
                })
            }
            Err(e) => {
                tracing::debug!(depth = e.depth(), "check failed");
                Err(self.convert_error(e, trace))
            }
        }
    }

    fn convert_error(&self, error: ParseError, trace: Vec<String>) -> CheckError {
        let file = self.options.input.clone();
        match error {
            ParseError::Scan(source) => CheckError::Scan { file, source, trace },
            other @ ParseError::AlreadyParsed => CheckError::Internal(other.to_string()),
            other => CheckError::Syntax {
                file,
                diagnostic: other.diagnostic(),
                context: other.chain(),
                trace,
            },
        }
    }

    /// Read the source file
    fn read_source(&self) -> Result<String> {
        if !self.options.input.exists() {
            return Err(CheckError::FileNotFound(self.options.input.clone()));
        }

        std::fs::read_to_string(&self.options.input).map_err(CheckError::from)
    }
}
