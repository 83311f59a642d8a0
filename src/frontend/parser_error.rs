/// A parsing error with source location.
///
/// `line` and `col` are 1-based and point at the first token that could not
/// start a statement. On empty input the location is `1:1`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{line}:{col}: {message}")]
pub struct ParserError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}
