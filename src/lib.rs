//! Compiler front end and bytecode back end for zfx, a small expression
//! language for per-element field computations.
//!
//! The pipeline is lexer → parser → lowering → register scan → emission.
//! [`compile`] runs all of it with default options and returns the
//! [`Program`]: the word stream, the symbol names and the register count.

pub mod bytecode;
pub mod frontend;
pub mod lang;
pub mod logging;

pub use bytecode::{CompileError, CompileOptions, Compiled, Compiler, Program};

/// Compiles `source` with default options.
///
/// Warnings (dropped input) are logged and discarded; use [`Compiler`]
/// directly to inspect or deny them.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    Compiler::new().compile(source).map(|out| out.program)
}
