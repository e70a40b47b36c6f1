use std::fmt;

/// Every kind of lexical unit the Tally grammar knows about.
///
/// The set is closed: keywords, operators, punctuation, the three literal
/// classes and an explicit end-of-input marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    // Keywords
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Loop,
    Call,
    Do,
    Until,
    For,

    // Punctuation
    Becomes,
    Semicolon,
    Comma,
    LParen,
    RParen,

    // Arithmetic operators
    Plus,
    Minus,
    Times,
    Divide,
    Modulus,

    // Conditional operators
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Literal classes
    Identifier,
    NumberConstant,
    StringConstant,

    // Special
    EndOfInput,
}

impl Symbol {
    /// All symbols, in declaration order.
    pub const ALL: [Symbol; 31] = [
        Symbol::Begin,
        Symbol::End,
        Symbol::If,
        Symbol::Then,
        Symbol::Else,
        Symbol::While,
        Symbol::Loop,
        Symbol::Call,
        Symbol::Do,
        Symbol::Until,
        Symbol::For,
        Symbol::Becomes,
        Symbol::Semicolon,
        Symbol::Comma,
        Symbol::LParen,
        Symbol::RParen,
        Symbol::Plus,
        Symbol::Minus,
        Symbol::Times,
        Symbol::Divide,
        Symbol::Modulus,
        Symbol::Equal,
        Symbol::NotEqual,
        Symbol::LessThan,
        Symbol::LessEqual,
        Symbol::GreaterThan,
        Symbol::GreaterEqual,
        Symbol::Identifier,
        Symbol::NumberConstant,
        Symbol::StringConstant,
        Symbol::EndOfInput,
    ];

    /// Canonical display name, used in traces and diagnostics.
    ///
    /// Keywords and operators display as their spelling; literal classes and
    /// the end marker have descriptive names.
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Begin => "begin",
            Symbol::End => "end",
            Symbol::If => "if",
            Symbol::Then => "then",
            Symbol::Else => "else",
            Symbol::While => "while",
            Symbol::Loop => "loop",
            Symbol::Call => "call",
            Symbol::Do => "do",
            Symbol::Until => "until",
            Symbol::For => "for",
            Symbol::Becomes => ":=",
            Symbol::Semicolon => ";",
            Symbol::Comma => ",",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Times => "*",
            Symbol::Divide => "/",
            Symbol::Modulus => "%",
            Symbol::Equal => "=",
            Symbol::NotEqual => "!=",
            Symbol::LessThan => "<",
            Symbol::LessEqual => "<=",
            Symbol::GreaterThan => ">",
            Symbol::GreaterEqual => ">=",
            Symbol::Identifier => "identifier",
            Symbol::NumberConstant => "numberConstant",
            Symbol::StringConstant => "stringConstant",
            Symbol::EndOfInput => "end-of-input",
        }
    }

    /// Look up a reserved word. Matching is case-sensitive.
    pub fn keyword(word: &str) -> Option<Symbol> {
        let symbol = match word {
            "begin" => Symbol::Begin,
            "end" => Symbol::End,
            "if" => Symbol::If,
            "then" => Symbol::Then,
            "else" => Symbol::Else,
            "while" => Symbol::While,
            "loop" => Symbol::Loop,
            "call" => Symbol::Call,
            "do" => Symbol::Do,
            "until" => Symbol::Until,
            "for" => Symbol::For,
            _ => return None,
        };
        Some(symbol)
    }

    /// True for the literal classes, whose tokens carry scanned text.
    pub fn has_literal_text(self) -> bool {
        matches!(
            self,
            Symbol::Identifier | Symbol::NumberConstant | Symbol::StringConstant
        )
    }

    /// The text a token of this symbol carries when it is not a literal.
    fn canonical_text(self) -> &'static str {
        match self {
            Symbol::EndOfInput => "",
            other => other.name(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical unit: its symbol, the text as scanned and the 0-based line it
/// started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    symbol: Symbol,
    text: String,
    line: usize,
}

impl Token {
    /// Build a literal-class token carrying its exact lexeme.
    pub fn literal(symbol: Symbol, text: impl Into<String>, line: usize) -> Self {
        debug_assert!(symbol.has_literal_text(), "{symbol} carries no literal text");
        let text = text.into();
        debug_assert!(!text.is_empty(), "empty lexeme for {symbol}");
        Self { symbol, text, line }
    }

    /// Build a keyword, operator or end-of-input token with its canonical text.
    pub fn fixed(symbol: Symbol, line: usize) -> Self {
        Self {
            symbol,
            text: symbol.canonical_text().to_string(),
            line,
        }
    }

    pub fn end_of_input(line: usize) -> Self {
        Self::fixed(Symbol::EndOfInput, line)
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is(&self, symbol: Symbol) -> bool {
        self.symbol == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.has_literal_text() {
            write!(f, "{} '{}'", self.symbol, self.text)
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}
