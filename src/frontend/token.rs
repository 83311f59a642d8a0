/// Operator and keyword kinds.
///
/// Every punctuation lexeme and every reserved word maps to exactly one
/// variant. The same enumeration tags AST operator nodes and IR operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    // Assignment
    Assign,
    PlusAssign,
    MinusAssign,
    MultiplyAssign,
    DivideAssign,
    ModulusAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,

    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,

    Member,

    // Bitwise
    BitInverse,
    BitAnd,
    BitOr,
    BitXor,
    BitShl,
    BitShr,

    // Logic
    LogicNot,
    LogicAnd,
    LogicOr,

    // Comparison
    CmpEqual,
    CmpNotEqual,
    CmpLessThan,
    CmpLessEqual,
    CmpGreaterThan,
    CmpGreaterEqual,

    // Delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    LeftBlock,    // {
    RightBlock,   // }
    Ternary,
    TernaryElse,
    Comma,
    Semicolon,

    // Keywords
    KeywordIf,
    KeywordElse,
    KeywordFor,
    KeywordWhile,
    KeywordReturn,
}

impl Op {
    /// All single-character operators, in lookup order.
    pub const SINGLE: [(char, Op); 24] = [
        ('=', Op::Assign),
        ('+', Op::Plus),
        ('-', Op::Minus),
        ('*', Op::Multiply),
        ('/', Op::Divide),
        ('%', Op::Modulus),
        ('.', Op::Member),
        ('~', Op::BitInverse),
        ('&', Op::BitAnd),
        ('|', Op::BitOr),
        ('^', Op::BitXor),
        ('<', Op::CmpLessThan),
        ('>', Op::CmpGreaterThan),
        ('!', Op::LogicNot),
        ('(', Op::LeftParen),
        (')', Op::RightParen),
        ('[', Op::LeftBracket),
        (']', Op::RightBracket),
        ('{', Op::LeftBlock),
        ('}', Op::RightBlock),
        ('?', Op::Ternary),
        (':', Op::TernaryElse),
        (',', Op::Comma),
        (';', Op::Semicolon),
    ];

    /// All two-character operators.
    pub const DOUBLE: [((char, char), Op); 16] = [
        (('&', '&'), Op::LogicAnd),
        (('|', '|'), Op::LogicOr),
        (('=', '='), Op::CmpEqual),
        (('!', '='), Op::CmpNotEqual),
        (('<', '='), Op::CmpLessEqual),
        (('>', '='), Op::CmpGreaterEqual),
        (('<', '<'), Op::BitShl),
        (('>', '>'), Op::BitShr),
        (('+', '='), Op::PlusAssign),
        (('-', '='), Op::MinusAssign),
        (('*', '='), Op::MultiplyAssign),
        (('/', '='), Op::DivideAssign),
        (('%', '='), Op::ModulusAssign),
        (('&', '='), Op::BitAndAssign),
        (('^', '='), Op::BitXorAssign),
        (('|', '='), Op::BitOrAssign),
    ];

    /// Reserved words.
    pub const KEYWORDS: [(&'static str, Op); 5] = [
        ("if", Op::KeywordIf),
        ("else", Op::KeywordElse),
        ("for", Op::KeywordFor),
        ("while", Op::KeywordWhile),
        ("return", Op::KeywordReturn),
    ];

    pub fn from_char(ch: char) -> Option<Op> {
        Self::SINGLE
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, op)| *op)
    }

    pub fn from_pair(a: char, b: char) -> Option<Op> {
        Self::DOUBLE
            .iter()
            .find(|(pair, _)| *pair == (a, b))
            .map(|(_, op)| *op)
    }

    pub fn keyword(ident: &str) -> Option<Op> {
        Self::KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == ident)
            .map(|(_, op)| *op)
    }

    /// Returns true for `=` and the compound assignments.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Op::Assign
                | Op::PlusAssign
                | Op::MinusAssign
                | Op::MultiplyAssign
                | Op::DivideAssign
                | Op::ModulusAssign
                | Op::BitAndAssign
                | Op::BitOrAssign
                | Op::BitXorAssign
        )
    }

    /// Source lexeme of this operator.
    pub fn lexeme(self) -> &'static str {
        match self {
            Op::Assign => "=",
            Op::PlusAssign => "+=",
            Op::MinusAssign => "-=",
            Op::MultiplyAssign => "*=",
            Op::DivideAssign => "/=",
            Op::ModulusAssign => "%=",
            Op::BitAndAssign => "&=",
            Op::BitOrAssign => "|=",
            Op::BitXorAssign => "^=",
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Modulus => "%",
            Op::Member => ".",
            Op::BitInverse => "~",
            Op::BitAnd => "&",
            Op::BitOr => "|",
            Op::BitXor => "^",
            Op::BitShl => "<<",
            Op::BitShr => ">>",
            Op::LogicNot => "!",
            Op::LogicAnd => "&&",
            Op::LogicOr => "||",
            Op::CmpEqual => "==",
            Op::CmpNotEqual => "!=",
            Op::CmpLessThan => "<",
            Op::CmpLessEqual => "<=",
            Op::CmpGreaterThan => ">",
            Op::CmpGreaterEqual => ">=",
            Op::LeftParen => "(",
            Op::RightParen => ")",
            Op::LeftBracket => "[",
            Op::RightBracket => "]",
            Op::LeftBlock => "{",
            Op::RightBlock => "}",
            Op::Ternary => "?",
            Op::TernaryElse => ":",
            Op::Comma => ",",
            Op::Semicolon => ";",
            Op::KeywordIf => "if",
            Op::KeywordElse => "else",
            Op::KeywordFor => "for",
            Op::KeywordWhile => "while",
            Op::KeywordReturn => "return",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.lexeme())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Op(Op),

    /// Identifier text, sigil included (`@pos`, `$F`).
    Ident(String),

    // Literals
    Float(f32),
    Int(i32),
}

impl Token {
    pub fn as_op(&self) -> Option<Op> {
        match self {
            Token::Op(op) => Some(*op),
            _ => None,
        }
    }
}

impl From<Op> for Token {
    fn from(op: Op) -> Self {
        Token::Op(op)
    }
}

impl std::fmt::Display for Token {
    /// Canonical source form. Floats always carry a `.` so they lex back
    /// as floats.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Op(op) => write!(f, "{}", op),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(x) => {
                let text = x.to_string();
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
        }
    }
}
