use serde::{Deserialize, Serialize};

/// A compiled zfx program.
///
/// This is everything a compilation hands back to its caller:
/// - `codes`: the instruction word stream
/// - `syms`: symbol names, indexed by the ids used by `AddrSymbol`
/// - `nregs`: number of registers the word stream refers to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub codes: Vec<u32>,
    pub syms: Vec<String>,
    pub nregs: usize,
}

impl Program {
    /// Encodes the program with postcard.
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Decodes a program written by [`Program::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
