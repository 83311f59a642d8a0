use crate::{
    bytecode::{emit::Unsupported, ir::IrId},
    frontend::{
        lexer::{LexerError, Spanned, Truncation},
        parser_error::ParserError,
        token::{Op, Token},
    },
};

/// Everything that can stop or taint a compilation.
///
/// `MalformedLiteral`, `ParseRejected` and `Internal` always abort.
/// `LexTruncated`, `TrailingTokens` and `UnsupportedOperator` describe input
/// that was silently dropped; they are reported as warnings unless the
/// compiler is told to deny them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The lexer met a character no rule recognizes and stopped there.
    #[error("{line}:{col}: lexing stopped at unrecognized character {found:?}")]
    LexTruncated { line: usize, col: usize, found: char },

    /// A numeric literal could not be converted.
    #[error("malformed literal: {0}")]
    MalformedLiteral(#[from] LexerError),

    /// Not a single statement could be parsed.
    #[error("parse error: {0}")]
    ParseRejected(#[from] ParserError),

    /// Tokens after the last complete statement were ignored.
    #[error("{line}:{col}: ignored trailing input starting at '{token}'")]
    TrailingTokens {
        line: usize,
        col: usize,
        token: Token,
    },

    /// An operation was lowered but no instruction exists for it.
    #[error("no instruction for operator '{op}' (node {node}); nothing was emitted")]
    UnsupportedOperator { node: IrId, op: Op },

    /// Internal compiler error (shouldn't happen in normal use)
    #[error("internal compiler error: {0}")]
    Internal(String),
}

impl CompileError {
    pub fn internal(msg: impl Into<String>) -> Self {
        CompileError::Internal(msg.into())
    }

    pub fn truncated(stop: Truncation) -> Self {
        CompileError::LexTruncated {
            line: stop.span.line,
            col: stop.span.col,
            found: stop.found,
        }
    }

    pub fn trailing(first: &Spanned) -> Self {
        CompileError::TrailingTokens {
            line: first.span.line,
            col: first.span.col,
            token: first.token.clone(),
        }
    }

    pub fn unsupported(skipped: Unsupported) -> Self {
        CompileError::UnsupportedOperator {
            node: skipped.node,
            op: skipped.op,
        }
    }

    /// True for the conditions that are warnings by default. Only these may
    /// go through the compiler's warning channel.
    pub fn is_deniable(&self) -> bool {
        matches!(
            self,
            CompileError::LexTruncated { .. }
                | CompileError::TrailingTokens { .. }
                | CompileError::UnsupportedOperator { .. }
        )
    }
}
