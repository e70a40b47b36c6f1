//! Recursive-descent syntax analyser.
//!
//! One method per nonterminal, each choosing its alternative from the single
//! lookahead token. Productions report entry and exit to the [`EventSink`]
//! and wrap any error passing through them with their own name.

use tally_lexer::{Symbol, Token};

use crate::adapter::TokenSource;
use crate::error::ParseError;
use crate::grammar::{self, Nonterminal};
use crate::sink::EventSink;

/// Lifecycle of a [`SyntaxAnalyser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyserState {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

/// Validates a token stream against the Tally grammar.
///
/// An analyser runs once. Parsing the same tokens again means building a new
/// analyser, which reports an identical sequence of events.
pub struct SyntaxAnalyser<L, S> {
    source: L,
    sink: S,
    /// Next unconsumed token; a placeholder until parsing starts
    lookahead: Token,
    state: AnalyserState,
}

impl<L: TokenSource, S: EventSink> SyntaxAnalyser<L, S> {
    pub fn new(source: L, sink: S) -> Self {
        Self {
            source,
            sink,
            lookahead: Token::end_of_input(0),
            state: AnalyserState::NotStarted,
        }
    }

    pub fn state(&self) -> AnalyserState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Parse the whole input: a statement part followed by end of input.
    ///
    /// Stops at the first error. Trailing tokens after the final `end` are
    /// an error.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        if self.state != AnalyserState::NotStarted {
            return Err(ParseError::AlreadyParsed);
        }
        self.state = AnalyserState::Running;
        tracing::debug!("starting syntax analysis");

        let result = self.run();
        match &result {
            Ok(()) => {
                self.state = AnalyserState::Succeeded;
                tracing::debug!("syntax analysis succeeded");
            }
            Err(e) => {
                self.state = AnalyserState::Failed;
                tracing::debug!(depth = e.depth(), "syntax analysis failed: {}", e.diagnostic());
            }
        }
        result
    }

    fn run(&mut self) -> Result<(), ParseError> {
        self.lookahead = self.source.next_token()?;
        self.statement_part()?;
        if !self.lookahead.is(Symbol::EndOfInput) {
            return Err(self.mismatch(Symbol::EndOfInput));
        }
        self.sink.report_success();
        Ok(())
    }

    fn peek(&self) -> Symbol {
        self.lookahead.symbol()
    }

    /// Consume the lookahead if it is `expected`.
    fn accept(&mut self, expected: Symbol) -> Result<(), ParseError> {
        if !self.lookahead.is(expected) {
            return Err(self.mismatch(expected));
        }
        tracing::trace!(line = self.lookahead.line(), "accept {}", self.lookahead);
        self.sink.insert_terminal(&self.lookahead);
        self.lookahead = self.source.next_token()?;
        Ok(())
    }

    /// Consume the lookahead, whatever it is; used once a dispatch has
    /// already matched it.
    fn accept_current(&mut self) -> Result<(), ParseError> {
        self.accept(self.peek())
    }

    fn mismatch(&mut self, expected: Symbol) -> ParseError {
        let message = format!("Expected token {} but found {}", expected, self.peek());
        self.reject(&message)
    }

    fn reject(&mut self, message: &str) -> ParseError {
        self.sink.report_error(&self.lookahead, message)
    }

    /// Run `body` as production `nonterminal`.
    fn production<F>(&mut self, nonterminal: Nonterminal, body: F) -> Result<(), ParseError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParseError>,
    {
        self.sink.commence_nonterminal(nonterminal);
        body(self).map_err(|e| e.within(nonterminal))?;
        self.sink.finish_nonterminal(nonterminal);
        Ok(())
    }

    /// StatementPart ::= begin StatementList end
    fn statement_part(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::StatementPart, |p| {
            p.accept(Symbol::Begin)?;
            p.statement_list()?;
            p.accept(Symbol::End)
        })
    }

    /// StatementList ::= Statement { ; Statement }
    fn statement_list(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::StatementList, |p| {
            p.statement()?;
            while p.peek() == Symbol::Semicolon {
                p.accept(Symbol::Semicolon)?;
                p.statement()?;
            }
            Ok(())
        })
    }

    fn statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::Statement, |p| match p.peek() {
            Symbol::Identifier => p.assignment_statement(),
            Symbol::If => p.if_statement(),
            Symbol::While => p.while_statement(),
            Symbol::Call => p.procedure_statement(),
            Symbol::Do => p.until_statement(),
            Symbol::For => p.for_statement(),
            _ => {
                let expected = grammar::describe_expected(&grammar::first(Nonterminal::Statement));
                Err(p.reject(&format!(
                    "Invalid start of {}; expecting {}",
                    Nonterminal::Statement,
                    expected
                )))
            }
        })
    }

    /// AssignmentStatement ::= identifier := ( stringConstant | Expression )
    fn assignment_statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::AssignmentStatement, |p| {
            p.accept(Symbol::Identifier)?;
            p.accept(Symbol::Becomes)?;

            match p.peek() {
                Symbol::StringConstant => p.accept(Symbol::StringConstant),
                symbol if grammar::starts(Nonterminal::Expression, symbol) => p.expression(),
                _ => {
                    let expected = grammar::leading(grammar::ASSIGNMENT_VALUE);
                    Err(p.reject(&format!(
                        "Expected {} in {}",
                        grammar::describe_expected(&expected),
                        Nonterminal::AssignmentStatement
                    )))
                }
            }
        })
    }

    /// IfStatement ::= if Condition then StatementList [ else StatementList ] end if
    fn if_statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::IfStatement, |p| {
            p.accept(Symbol::If)?;
            p.condition()?;
            p.accept(Symbol::Then)?;
            p.statement_list()?;

            if p.peek() == Symbol::Else {
                p.accept(Symbol::Else)?;
                p.statement_list()?;
            }
            p.accept(Symbol::End)?;
            p.accept(Symbol::If)
        })
    }

    /// WhileStatement ::= while Condition loop StatementList end loop
    fn while_statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::WhileStatement, |p| {
            p.accept(Symbol::While)?;
            p.condition()?;
            p.accept(Symbol::Loop)?;
            p.statement_list()?;
            p.accept(Symbol::End)?;
            p.accept(Symbol::Loop)
        })
    }

    /// ProcedureStatement ::= call identifier ( ArgumentList )
    fn procedure_statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::ProcedureStatement, |p| {
            p.accept(Symbol::Call)?;
            p.accept(Symbol::Identifier)?;
            p.accept(Symbol::LParen)?;
            p.argument_list()?;
            p.accept(Symbol::RParen)
        })
    }

    /// UntilStatement ::= do StatementList until Condition
    fn until_statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::UntilStatement, |p| {
            p.accept(Symbol::Do)?;
            p.statement_list()?;
            p.accept(Symbol::Until)?;
            p.condition()
        })
    }

    /// ForStatement ::= for ( AssignmentStatement ; Condition ; AssignmentStatement )
    ///                  do StatementList end loop
    fn for_statement(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::ForStatement, |p| {
            p.accept(Symbol::For)?;
            p.accept(Symbol::LParen)?;
            p.assignment_statement()?;
            p.accept(Symbol::Semicolon)?;
            p.condition()?;
            p.accept(Symbol::Semicolon)?;
            p.assignment_statement()?;
            p.accept(Symbol::RParen)?;
            p.accept(Symbol::Do)?;
            p.statement_list()?;
            p.accept(Symbol::End)?;
            p.accept(Symbol::Loop)
        })
    }

    /// ArgumentList ::= identifier { , identifier }
    fn argument_list(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::ArgumentList, |p| {
            p.accept(Symbol::Identifier)?;
            while p.peek() == Symbol::Comma {
                p.accept(Symbol::Comma)?;
                p.accept(Symbol::Identifier)?;
            }
            Ok(())
        })
    }

    /// Condition ::= identifier ConditionalOperator ( identifier | numberConstant | stringConstant )
    fn condition(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::Condition, |p| {
            p.accept(Symbol::Identifier)?;
            p.conditional_operator()?;

            let operands = grammar::leading(grammar::CONDITION_OPERAND);
            if operands.contains(&p.peek()) {
                p.accept_current()
            } else {
                Err(p.reject(&format!(
                    "Expected {} in {}",
                    grammar::describe_expected(&operands),
                    Nonterminal::Condition
                )))
            }
        })
    }

    fn conditional_operator(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::ConditionalOperator, |p| {
            if grammar::starts(Nonterminal::ConditionalOperator, p.peek()) {
                return p.accept_current();
            }
            let operators: Vec<&str> = grammar::first(Nonterminal::ConditionalOperator)
                .iter()
                .map(|s| s.name())
                .collect();
            Err(p.reject(&format!(
                "Expected a conditional operator ({})",
                operators.join(" ")
            )))
        })
    }

    /// Expression ::= Term { ( + | - ) Term }
    fn expression(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::Expression, |p| {
            p.term()?;
            while grammar::ADDING_OPERATORS.contains(&p.peek()) {
                p.accept_current()?;
                p.term()?;
            }
            Ok(())
        })
    }

    /// Term ::= Factor { ( * | / | % ) Factor }
    fn term(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::Term, |p| {
            p.factor()?;
            while grammar::MULTIPLYING_OPERATORS.contains(&p.peek()) {
                p.accept_current()?;
                p.factor()?;
            }
            Ok(())
        })
    }

    /// Factor ::= identifier | numberConstant | ( Expression )
    fn factor(&mut self) -> Result<(), ParseError> {
        self.production(Nonterminal::Factor, |p| match p.peek() {
            Symbol::Identifier | Symbol::NumberConstant => p.accept_current(),
            Symbol::LParen => {
                p.accept(Symbol::LParen)?;
                p.expression()?;
                p.accept(Symbol::RParen)
            }
            _ => {
                let expected = grammar::describe_expected(&grammar::first(Nonterminal::Factor));
                Err(p.reject(&format!("Expected {} in {}", expected, Nonterminal::Factor)))
            }
        })
    }
}
