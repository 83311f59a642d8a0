use crate::frontend::lexer::Spanned;
use crate::frontend::token::{Op, Token};

pub struct TokenDumper {
    pub color: bool,
    pub show_debug_repr: bool, // if false, prints the source lexeme instead
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_debug_repr: true,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";
    const BLU: &'static str = "\x1b[34m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.show_debug_repr = false;
        self
    }

    pub fn dump(&self, tokens: &[Spanned]) {
        for s in tokens {
            println!("{}", self.line(s));
        }
    }

    fn line(&self, s: &Spanned) -> String {
        let kind = Self::kind(&s.token);
        let colr = if self.color { Self::color(&s.token) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };

        let text = if self.show_debug_repr {
            format!("{:?}", s.token)
        } else {
            s.token.to_string()
        };

        format!(
            "[{:02}:{:02}] {}{:<8} {}{}",
            s.span.line, s.span.col, colr, kind, text, reset
        )
    }

    fn kind(t: &Token) -> &'static str {
        match t {
            Token::Int(_) => "INT",
            Token::Float(_) => "FLOAT",
            Token::Ident(_) => "IDENT",
            Token::Op(op) => match op {
                Op::KeywordIf
                | Op::KeywordElse
                | Op::KeywordFor
                | Op::KeywordWhile
                | Op::KeywordReturn => "KEYWORD",
                Op::LeftParen
                | Op::RightParen
                | Op::LeftBracket
                | Op::RightBracket
                | Op::LeftBlock
                | Op::RightBlock
                | Op::Comma
                | Op::Semicolon => "PUNCT",
                Op::CmpEqual
                | Op::CmpNotEqual
                | Op::CmpLessThan
                | Op::CmpLessEqual
                | Op::CmpGreaterThan
                | Op::CmpGreaterEqual => "CMP",
                op if op.is_assignment() => "ASSIGN",
                _ => "OP",
            },
        }
    }

    fn color(t: &Token) -> &'static str {
        match Self::kind(t) {
            "INT" | "FLOAT" => Self::CYN,
            "IDENT" => Self::YEL,
            "KEYWORD" => Self::BLU,
            "PUNCT" => Self::DIM,
            _ => Self::MAG,
        }
    }
}
