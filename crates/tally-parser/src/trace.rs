//! Concrete event sinks: a line-oriented trace printer and an in-memory
//! recorder.

use std::fmt;
use std::io::{self, Write};

use tally_lexer::Token;

use crate::error::ParseError;
use crate::grammar::Nonterminal;
use crate::sink::EventSink;

/// One event observed by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Terminal(Token),
    Commence(Nonterminal),
    Finish(Nonterminal),
    Success,
    /// The token rejected and the explanatory message
    Error { token: Token, message: String },
}

impl Event {
    /// True for events that appear in the trace output.
    pub fn is_traced(&self) -> bool {
        !matches!(self, Event::Error { .. })
    }
}

/// Renders the trace line for an event.
///
/// Errors render as their diagnostic, which is not part of the trace itself.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Terminal(token) => write!(f, "{}", TerminalLine(token)),
            Event::Commence(nonterminal) => write!(f, "BEGIN {}", nonterminal.name()),
            Event::Finish(nonterminal) => write!(f, "END {}", nonterminal.name()),
            Event::Success => f.write_str("SUCCESS"),
            Event::Error { token, message } => {
                write!(f, "{}", ParseError::unexpected(token, message.as_str()))
            }
        }
    }
}

/// `TOKEN <symbol>[ '<text>'] on line <line>`, quoting text only for literals.
struct TerminalLine<'a>(&'a Token);

impl fmt::Display for TerminalLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.0;
        write!(f, "TOKEN {}", token.symbol())?;
        if token.symbol().has_literal_text() {
            write!(f, " '{}'", token.text())?;
        }
        write!(f, " on line {}", token.line())
    }
}

/// Records every event for later inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// The trace lines, as a [`TraceSink`] would print them.
    pub fn trace_lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| e.is_traced())
            .map(ToString::to_string)
            .collect()
    }

    /// Productions still open once every event is replayed, outermost first.
    ///
    /// `None` if a production finishes that is not the innermost open one.
    pub fn open_productions(&self) -> Option<Vec<Nonterminal>> {
        let mut stack = Vec::new();
        for event in &self.events {
            match event {
                Event::Commence(nonterminal) => stack.push(*nonterminal),
                Event::Finish(nonterminal) => {
                    if stack.pop() != Some(*nonterminal) {
                        return None;
                    }
                }
                _ => {}
            }
        }
        Some(stack)
    }

    pub fn succeeded(&self) -> bool {
        self.events.contains(&Event::Success)
    }

    /// The accepted tokens, in order.
    pub fn terminals(&self) -> Vec<&Token> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Terminal(token) => Some(token),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn insert_terminal(&mut self, token: &Token) {
        self.events.push(Event::Terminal(token.clone()));
    }

    fn commence_nonterminal(&mut self, nonterminal: Nonterminal) {
        self.events.push(Event::Commence(nonterminal));
    }

    fn finish_nonterminal(&mut self, nonterminal: Nonterminal) {
        self.events.push(Event::Finish(nonterminal));
    }

    fn report_success(&mut self) {
        self.events.push(Event::Success);
    }

    fn report_error(&mut self, token: &Token, message: &str) -> ParseError {
        self.events.push(Event::Error {
            token: token.clone(),
            message: message.to_string(),
        });
        ParseError::unexpected(token, message)
    }
}

/// Writes the trace to any writer, one event per line.
///
/// The first write failure is kept and returned by [`TraceSink::finish`];
/// later events are dropped.
pub struct TraceSink<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TraceSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", args) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> EventSink for TraceSink<W> {
    fn insert_terminal(&mut self, token: &Token) {
        self.emit(format_args!("{}", TerminalLine(token)));
    }

    fn commence_nonterminal(&mut self, nonterminal: Nonterminal) {
        self.emit(format_args!("BEGIN {}", nonterminal.name()));
    }

    fn finish_nonterminal(&mut self, nonterminal: Nonterminal) {
        self.emit(format_args!("END {}", nonterminal.name()));
    }

    fn report_success(&mut self) {
        self.emit(format_args!("SUCCESS"));
    }
}
