use crate::frontend::token::Op;

// =============================================================================
// BC - Bytecode opcodes
// =============================================================================

/// One opcode word. The discriminant is the encoded value.
///
/// Instructions carry no length prefix: each opcode is followed by a fixed
/// number of operand words, see [`Bc::arity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Bc {
    // loads
    LoadConstInt = 0,   // dst, i32 bits
    LoadConstFloat = 1, // dst, f32 bits
    AddrSymbol = 2,     // symbol id

    // arithmetic
    Plus = 3,
    Minus = 4,
    Multiply = 5,
    Divide = 6,
    Modulus = 7,

    // bitwise
    BitInverse = 8,
    BitAnd = 9,
    BitOr = 10,
    BitXor = 11,
    BitShl = 12,
    BitShr = 13,

    // logic
    LogicNot = 14,
    LogicAnd = 15,
    LogicOr = 16,

    // comparison
    CmpEqual = 17,
    CmpNotEqual = 18,
    CmpLessThan = 19,
    CmpLessEqual = 20,
    CmpGreaterThan = 21,
    CmpGreaterEqual = 22,
}

impl Bc {
    pub const ALL: [Bc; 23] = [
        Bc::LoadConstInt,
        Bc::LoadConstFloat,
        Bc::AddrSymbol,
        Bc::Plus,
        Bc::Minus,
        Bc::Multiply,
        Bc::Divide,
        Bc::Modulus,
        Bc::BitInverse,
        Bc::BitAnd,
        Bc::BitOr,
        Bc::BitXor,
        Bc::BitShl,
        Bc::BitShr,
        Bc::LogicNot,
        Bc::LogicAnd,
        Bc::LogicOr,
        Bc::CmpEqual,
        Bc::CmpNotEqual,
        Bc::CmpLessThan,
        Bc::CmpLessEqual,
        Bc::CmpGreaterThan,
        Bc::CmpGreaterEqual,
    ];

    pub fn word(self) -> u32 {
        self as u32
    }

    pub fn from_word(word: u32) -> Option<Bc> {
        Self::ALL.get(word as usize).copied()
    }

    /// The opcode computing `op`, if the operator has one.
    pub fn for_op(op: Op) -> Option<Bc> {
        Some(match op {
            Op::Plus => Bc::Plus,
            Op::Minus => Bc::Minus,
            Op::Multiply => Bc::Multiply,
            Op::Divide => Bc::Divide,
            Op::Modulus => Bc::Modulus,
            Op::BitInverse => Bc::BitInverse,
            Op::BitAnd => Bc::BitAnd,
            Op::BitOr => Bc::BitOr,
            Op::BitXor => Bc::BitXor,
            Op::BitShl => Bc::BitShl,
            Op::BitShr => Bc::BitShr,
            Op::LogicNot => Bc::LogicNot,
            Op::LogicAnd => Bc::LogicAnd,
            Op::LogicOr => Bc::LogicOr,
            Op::CmpEqual => Bc::CmpEqual,
            Op::CmpNotEqual => Bc::CmpNotEqual,
            Op::CmpLessThan => Bc::CmpLessThan,
            Op::CmpLessEqual => Bc::CmpLessEqual,
            Op::CmpGreaterThan => Bc::CmpGreaterThan,
            Op::CmpGreaterEqual => Bc::CmpGreaterEqual,
            _ => return None,
        })
    }

    /// Number of operand words following the opcode word.
    pub fn arity(self) -> usize {
        match self {
            Bc::LoadConstInt | Bc::LoadConstFloat => 2,
            Bc::AddrSymbol => 1,
            Bc::BitInverse | Bc::LogicNot => 2,
            _ => 3,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Bc::LoadConstInt => "LOADI",
            Bc::LoadConstFloat => "LOADF",
            Bc::AddrSymbol => "ADDR",
            Bc::Plus => "ADD",
            Bc::Minus => "SUB",
            Bc::Multiply => "MUL",
            Bc::Divide => "DIV",
            Bc::Modulus => "MOD",
            Bc::BitInverse => "INV",
            Bc::BitAnd => "AND",
            Bc::BitOr => "OR",
            Bc::BitXor => "XOR",
            Bc::BitShl => "SHL",
            Bc::BitShr => "SHR",
            Bc::LogicNot => "LNOT",
            Bc::LogicAnd => "LAND",
            Bc::LogicOr => "LOR",
            Bc::CmpEqual => "EQ",
            Bc::CmpNotEqual => "NE",
            Bc::CmpLessThan => "LT",
            Bc::CmpLessEqual => "LE",
            Bc::CmpGreaterThan => "GT",
            Bc::CmpGreaterEqual => "GE",
        }
    }
}
