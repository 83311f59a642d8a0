pub mod compile;
pub mod compile_error;
pub mod disasm;
pub mod emit;
pub mod ir;
pub mod lower;
pub mod op;
pub mod program;
pub mod scan;

pub use compile::{CompileOptions, Compiled, Compiler};
pub use compile_error::CompileError;
pub use op::Bc;
pub use program::Program;
