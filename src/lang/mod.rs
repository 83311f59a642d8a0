//! # zfx Abstract Syntax Tree
//!
//! The AST is produced by the parser and consumed by the lowering pass.
//! Nodes reuse the token shape as their tag; see [`node::Node`].

pub mod node;
