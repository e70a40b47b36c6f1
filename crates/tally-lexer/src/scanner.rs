//! Logos-generated scanner turning Tally source text into tokens.

use logos::{Lexer, Logos, Skip};
use try_next::TryNextWithContext;

use crate::error::ScanError;
use crate::token::{Symbol, Token};

/// Why logos could not produce a token.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum LexFailure {
    /// No rule matches here; the scanner inspects the offending text.
    #[default]
    Unrecognised,
    UnterminatedString,
    MalformedNumber,
}

fn newline(lex: &mut Lexer<RawToken>) -> Skip {
    lex.extras += 1;
    Skip
}

fn closed_string(lex: &mut Lexer<RawToken>) -> Result<(), LexFailure> {
    let text = lex.slice();
    if text.len() >= 2 && text.ends_with('"') {
        Ok(())
    } else {
        Err(LexFailure::UnterminatedString)
    }
}

fn complete_number(lex: &mut Lexer<RawToken>) -> Result<(), LexFailure> {
    if lex.slice().ends_with('.') {
        Err(LexFailure::MalformedNumber)
    } else {
        Ok(())
    }
}

/// Raw lexical rules. `extras` holds the 0-based line of the next character.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(extras = usize)]
#[logos(error = LexFailure)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("\n", newline)]
    Newline,

    #[token("begin")]
    Begin,
    #[token("end")]
    End,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("loop")]
    Loop,
    #[token("call")]
    Call,
    #[token("do")]
    Do,
    #[token("until")]
    Until,
    #[token("for")]
    For,

    #[token(":=")]
    Becomes,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Times,
    #[token("/")]
    Divide,
    #[token("%")]
    Modulus,
    #[token("=")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterEqual,

    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,
    #[regex(r"[0-9]+(\.[0-9]*)?", complete_number)]
    NumberConstant,
    // Quotes are part of the lexeme; the closing one is checked by the callback
    #[regex(r#""[^"\n]*"?"#, closed_string)]
    StringConstant,
}

impl RawToken {
    /// The grammar symbol for a token that reaches the parser.
    fn symbol(self) -> Option<Symbol> {
        let symbol = match self {
            RawToken::Newline => return None,
            RawToken::Begin => Symbol::Begin,
            RawToken::End => Symbol::End,
            RawToken::If => Symbol::If,
            RawToken::Then => Symbol::Then,
            RawToken::Else => Symbol::Else,
            RawToken::While => Symbol::While,
            RawToken::Loop => Symbol::Loop,
            RawToken::Call => Symbol::Call,
            RawToken::Do => Symbol::Do,
            RawToken::Until => Symbol::Until,
            RawToken::For => Symbol::For,
            RawToken::Becomes => Symbol::Becomes,
            RawToken::Semicolon => Symbol::Semicolon,
            RawToken::Comma => Symbol::Comma,
            RawToken::LParen => Symbol::LParen,
            RawToken::RParen => Symbol::RParen,
            RawToken::Plus => Symbol::Plus,
            RawToken::Minus => Symbol::Minus,
            RawToken::Times => Symbol::Times,
            RawToken::Divide => Symbol::Divide,
            RawToken::Modulus => Symbol::Modulus,
            RawToken::Equal => Symbol::Equal,
            RawToken::NotEqual => Symbol::NotEqual,
            RawToken::LessThan => Symbol::LessThan,
            RawToken::LessEqual => Symbol::LessEqual,
            RawToken::GreaterThan => Symbol::GreaterThan,
            RawToken::GreaterEqual => Symbol::GreaterEqual,
            RawToken::Identifier => Symbol::Identifier,
            RawToken::NumberConstant => Symbol::NumberConstant,
            RawToken::StringConstant => Symbol::StringConstant,
        };
        Some(symbol)
    }
}

/// Scanner over a borrowed source string.
///
/// Yields every token in order, then exactly one end-of-input token, then
/// nothing. A scan error ends the stream.
pub struct Scanner<'input> {
    lexer: Lexer<'input, RawToken>,
    finished: bool,
}

impl<'input> Scanner<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            lexer: RawToken::lexer(input),
            finished: false,
        }
    }

    /// Scan the next token; end of input is reported as a token, repeatedly.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        loop {
            // Read after `next`, which has already skipped any newlines before the token
            let raw = match self.lexer.next() {
                None => return Ok(Token::end_of_input(self.lexer.extras)),
                Some(Ok(raw)) => raw,
                Some(Err(failure)) => return Err(self.scan_error(failure)),
            };
            let line = self.lexer.extras;
            let Some(symbol) = raw.symbol() else {
                continue;
            };
            return Ok(if symbol.has_literal_text() {
                Token::literal(symbol, self.lexer.slice(), line)
            } else {
                Token::fixed(symbol, line)
            });
        }
    }

    /// The next token, or `None` once end of input or an error was yielded.
    fn advance(&mut self) -> Option<Result<Token, ScanError>> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.is(Symbol::EndOfInput) => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        Some(result)
    }

    fn scan_error(&self, failure: LexFailure) -> ScanError {
        let line = self.lexer.extras;
        match failure {
            LexFailure::UnterminatedString => ScanError::UnterminatedString { line },
            LexFailure::MalformedNumber => ScanError::MalformedNumber {
                text: self.lexer.slice().to_string(),
                line,
            },
            LexFailure::Unrecognised => {
                let mut rest = self.lexer.source()[self.lexer.span().start..].chars();
                match rest.next() {
                    Some(':') => ScanError::IncompleteOperator {
                        expected: ":=",
                        found: rest.next(),
                        line,
                    },
                    Some('!') => ScanError::IncompleteOperator {
                        expected: "!=",
                        found: rest.next(),
                        line,
                    },
                    ch => ScanError::UnexpectedCharacter {
                        ch: ch.unwrap_or(char::REPLACEMENT_CHARACTER),
                        line,
                    },
                }
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl TryNextWithContext<()> for Scanner<'_> {
    type Item = Token;
    type Error = ScanError;

    fn try_next_with_context(&mut self, _context: &mut ()) -> Result<Option<Self::Item>, Self::Error> {
        self.advance().transpose()
    }
}

/// Scan a whole string, including the trailing end-of-input token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(input).collect()
}
