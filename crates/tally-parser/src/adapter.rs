use try_next::TryNextWithContext;
use tally_lexer::{ScanError, Scanner, Symbol, Token};

/// Supplies the analyser with tokens one at a time.
///
/// End of input is an ordinary token with [`Symbol::EndOfInput`]; asking
/// again after it keeps returning end-of-input tokens.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, ScanError>;
}

impl TokenSource for Scanner<'_> {
    fn next_token(&mut self) -> Result<Token, ScanError> {
        Scanner::next_token(self)
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Result<Token, ScanError> {
        (**self).next_token()
    }
}

/// Adapter that turns a token producer into a [`TokenSource`].
///
/// When the producer runs dry it keeps answering with end-of-input tokens on
/// the last line it saw, so a pre-scanned token list need not carry its own
/// end marker.
pub struct LexerAdapter<L>
where
    L: TryNextWithContext<(), Item = Token, Error = ScanError>,
{
    lexer: L,
    last_line: usize,
    exhausted: bool,
}

impl<L> LexerAdapter<L>
where
    L: TryNextWithContext<(), Item = Token, Error = ScanError>,
{
    pub fn new(lexer: L) -> Self {
        Self {
            lexer,
            last_line: 0,
            exhausted: false,
        }
    }
}

impl LexerAdapter<TokenList> {
    /// Adapt a pre-scanned token list.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new(TokenList::new(tokens))
    }
}

impl<L> TokenSource for LexerAdapter<L>
where
    L: TryNextWithContext<(), Item = Token, Error = ScanError>,
{
    fn next_token(&mut self) -> Result<Token, ScanError> {
        if !self.exhausted {
            match self.lexer.try_next_with_context(&mut ())? {
                Some(token) => {
                    self.last_line = token.line();
                    if token.is(Symbol::EndOfInput) {
                        self.exhausted = true;
                    }
                    return Ok(token);
                }
                None => self.exhausted = true,
            }
        }
        Ok(Token::end_of_input(self.last_line))
    }
}

/// Tokens scanned ahead of time, replayed in order.
pub struct TokenList {
    tokens: std::vec::IntoIter<Token>,
}

impl TokenList {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl TryNextWithContext<()> for TokenList {
    type Item = Token;
    type Error = ScanError;

    fn try_next_with_context(&mut self, _context: &mut ()) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.tokens.next())
    }
}
