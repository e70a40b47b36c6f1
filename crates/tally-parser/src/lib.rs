//! Syntax analyser for the Tally language.
//!
//! The analyser validates a token stream against the Tally grammar and
//! reports what it recognises to an [`EventSink`]. It builds no tree and
//! stops at the first error, which comes back as a [`ParseError`] carrying
//! the chain of productions that were open when it happened.

pub mod adapter;
pub mod analyser;
pub mod error;
pub mod grammar;
pub mod sink;
pub mod trace;

pub use adapter::{LexerAdapter, TokenList, TokenSource};
pub use analyser::{AnalyserState, SyntaxAnalyser};
pub use error::{ChainLink, ParseError};
pub use grammar::Nonterminal;
pub use sink::EventSink;
pub use tally_lexer::{tokenize, ScanError, Scanner, Symbol, Token};
pub use trace::{Event, RecordingSink, TraceSink};

/// Scan and check a source string, reporting events to `sink`.
pub fn check_str<S: EventSink>(input: &str, sink: S) -> Result<(), ParseError> {
    SyntaxAnalyser::new(LexerAdapter::new(Scanner::new(input)), sink).parse()
}
