//! The capability interface the syntax analyser reports its progress through.

use tally_lexer::Token;

use crate::error::ParseError;
use crate::grammar::Nonterminal;

/// Receives the structural events of a parse, in program order.
///
/// `commence_nonterminal` fires on every production attempt, but
/// `finish_nonterminal` only fires for productions that complete. A sink can
/// therefore tell exactly which productions were abandoned by a failure.
pub trait EventSink {
    /// A terminal was accepted. Called once per token, left to right.
    fn insert_terminal(&mut self, token: &Token);

    /// A production is being attempted.
    fn commence_nonterminal(&mut self, nonterminal: Nonterminal);

    /// A production completed without error.
    fn finish_nonterminal(&mut self, nonterminal: Nonterminal);

    /// The whole input was accepted.
    fn report_success(&mut self);

    /// The analyser cannot continue at `token`.
    ///
    /// Returns the error the analyser propagates; there is no way to resume
    /// parsing from here.
    fn report_error(&mut self, token: &Token, message: &str) -> ParseError {
        ParseError::unexpected(token, message)
    }
}

/// Discards every event.
impl EventSink for () {
    fn insert_terminal(&mut self, _token: &Token) {}
    fn commence_nonterminal(&mut self, _nonterminal: Nonterminal) {}
    fn finish_nonterminal(&mut self, _nonterminal: Nonterminal) {}
    fn report_success(&mut self) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn insert_terminal(&mut self, token: &Token) {
        (**self).insert_terminal(token)
    }

    fn commence_nonterminal(&mut self, nonterminal: Nonterminal) {
        (**self).commence_nonterminal(nonterminal)
    }

    fn finish_nonterminal(&mut self, nonterminal: Nonterminal) {
        (**self).finish_nonterminal(nonterminal)
    }

    fn report_success(&mut self) {
        (**self).report_success()
    }

    fn report_error(&mut self, token: &Token, message: &str) -> ParseError {
        (**self).report_error(token, message)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn insert_terminal(&mut self, token: &Token) {
        (**self).insert_terminal(token)
    }

    fn commence_nonterminal(&mut self, nonterminal: Nonterminal) {
        (**self).commence_nonterminal(nonterminal)
    }

    fn finish_nonterminal(&mut self, nonterminal: Nonterminal) {
        (**self).finish_nonterminal(nonterminal)
    }

    fn report_success(&mut self) {
        (**self).report_success()
    }

    fn report_error(&mut self, token: &Token, message: &str) -> ParseError {
        (**self).report_error(token, message)
    }
}
