//! Syntax errors and the production context they collect while unwinding.

use std::fmt::Write as FmtWrite;

use tally_lexer::{ScanError, Token};
use thiserror::Error;

use crate::grammar::Nonterminal;

/// Error type for the syntax analyser.
///
/// An `UnexpectedToken` is raised once, at the point of failure. Every
/// production it unwinds through wraps it in one `Context` layer, so the
/// outermost value names the top-level production and the innermost still
/// holds the offending token and message.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Raised by the token source; passes through productions unwrapped.
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(
        "SYNTAX ERROR on line {}: {message} (Encountered token: {} '{}')",
        .token.line() + 1,
        .token.symbol(),
        .token.text()
    )]
    UnexpectedToken { token: Token, message: String },

    #[error("Error while parsing {nonterminal}")]
    Context {
        nonterminal: Nonterminal,
        #[source]
        source: Box<ParseError>,
    },

    #[error("syntax analysis has already been run")]
    AlreadyParsed,
}

/// One link of a rendered context chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    /// The enclosing production, or `None` for the underlying failure.
    pub nonterminal: Option<Nonterminal>,
    pub message: String,
}

impl ParseError {
    pub fn unexpected(token: &Token, message: impl Into<String>) -> Self {
        ParseError::UnexpectedToken {
            token: token.clone(),
            message: message.into(),
        }
    }

    /// Add the context of an enclosing production.
    ///
    /// Scan errors are left as they are.
    pub fn within(self, nonterminal: Nonterminal) -> Self {
        match self {
            ParseError::Scan(_) | ParseError::AlreadyParsed => self,
            other => ParseError::Context {
                nonterminal,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error at the bottom of the context chain.
    pub fn innermost(&self) -> &ParseError {
        let mut current = self;
        while let ParseError::Context { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// The single-line diagnostic for the underlying failure.
    pub fn diagnostic(&self) -> String {
        self.innermost().to_string()
    }

    /// The offending token, if the failure was grammatical.
    pub fn token(&self) -> Option<&Token> {
        match self.innermost() {
            ParseError::UnexpectedToken { token, .. } => Some(token),
            _ => None,
        }
    }

    /// The innermost explanatory message, without the diagnostic framing.
    pub fn message(&self) -> Option<&str> {
        match self.innermost() {
            ParseError::UnexpectedToken { message, .. } => Some(message),
            _ => None,
        }
    }

    /// 1-based line of the failure.
    pub fn line(&self) -> Option<usize> {
        match self.innermost() {
            ParseError::UnexpectedToken { token, .. } => Some(token.line() + 1),
            ParseError::Scan(e) => Some(e.line() + 1),
            _ => None,
        }
    }

    /// Number of productions wrapped around the underlying failure.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let ParseError::Context { source, .. } = current {
            depth += 1;
            current = &**source;
        }
        depth
    }

    /// Enclosing productions, outermost first.
    pub fn productions(&self) -> Vec<Nonterminal> {
        let mut productions = Vec::new();
        let mut current = self;
        while let ParseError::Context { nonterminal, source } = current {
            productions.push(*nonterminal);
            current = &**source;
        }
        productions
    }

    /// The chain as `(production, message)` links, outermost first, ending
    /// with the underlying failure.
    pub fn chain(&self) -> Vec<ChainLink> {
        let mut links: Vec<ChainLink> = self
            .productions()
            .into_iter()
            .map(|nonterminal| ChainLink {
                nonterminal: Some(nonterminal),
                message: format!("Error while parsing {}", nonterminal),
            })
            .collect();
        links.push(ChainLink {
            nonterminal: None,
            message: self.diagnostic(),
        });
        links
    }

    /// The diagnostic followed by one line per enclosing production,
    /// innermost first.
    pub fn render_chain(&self) -> String {
        let mut out = self.diagnostic();
        for nonterminal in self.productions().iter().rev() {
            // Writing to a String cannot fail
            let _ = write!(out, "\n  while parsing {}", nonterminal);
        }
        out
    }
}
