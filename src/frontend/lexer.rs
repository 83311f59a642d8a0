use crate::frontend::token::{Op, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

/// A numeric lexeme that could not be converted to a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{line}:{col}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

/// Where the lexer gave up: the first character no rule recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub span: Span,
    pub found: char,
}

/// Tokenizer for zfx source text.
///
/// Rules are tried in a fixed order at every position: numeric literal,
/// identifier or keyword, two-character operator, one-character operator.
/// Whitespace between tokens is skipped. When none of the rules applies the
/// lexer stops without error; the stop position is available through
/// [`Lexer::truncation`].
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    truncation: Option<Truncation>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            truncation: None,
        }
    }

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        if ch == Some('\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        ch
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            col: self.col,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_ident(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' || ch == '@'
    }

    fn starts_number(&self) -> bool {
        match self.current() {
            Some(ch) if ch.is_ascii_digit() => true,
            Some('.') => self.peek().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Digits and dots are taken greedily; the text is validated only by the
    /// conversion to `f32`/`i32`.
    fn read_number(&mut self) -> Result<Token, LexerError> {
        let start = self.span();

        let mut digits = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() || ch == '.' {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if digits.contains('.') {
            let invalid = || LexerError {
                message: format!("invalid float: {}", digits),
                line: start.line,
                col: start.col,
            };
            // `parse` saturates out-of-range text to infinity
            let value: f32 = digits.parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            Ok(Token::Float(value))
        } else {
            let value: i32 = digits.parse().map_err(|_| LexerError {
                message: format!("invalid integer: {}", digits),
                line: start.line,
                col: start.col,
            })?;
            Ok(Token::Int(value))
        }
    }

    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(ch) = self.current() {
            if Self::is_ident(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match Op::keyword(&ident) {
            Some(op) => Token::Op(op),
            None => Token::Ident(ident),
        }
    }

    fn read_operator(&mut self) -> Option<Token> {
        let ch = self.current()?;

        if let Some(op) = self.peek().and_then(|next| Op::from_pair(ch, next)) {
            self.advance();
            self.advance();
            return Some(Token::Op(op));
        }

        let op = Op::from_char(ch)?;
        self.advance();
        Some(Token::Op(op))
    }

    /// Tokenizes the whole source, or as much of it as the rules recognize.
    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, LexerError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let span = self.span();

            let Some(ch) = self.current() else {
                break;
            };

            let token = if self.starts_number() {
                self.read_number()?
            } else if Self::is_ident(ch) {
                self.read_identifier()
            } else if let Some(token) = self.read_operator() {
                token
            } else {
                self.truncation = Some(Truncation { span, found: ch });
                break;
            };

            tokens.push(Spanned { token, span });
        }

        Ok(tokens)
    }

    /// The position of the first unrecognized character, if lexing stopped
    /// before the end of the input.
    pub fn truncation(&self) -> Option<Truncation> {
        self.truncation
    }
}
