use thiserror::Error;

/// Faults in user input. Always recoverable: the caller reports and
/// re-prompts; no partial parse result is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token '{found}' at position {position}")]
    UnexpectedToken { position: usize, found: String },
    #[error("unmatched '(' at position {position}")]
    UnmatchedParen { position: usize },
    #[error("ran out of input while parsing")]
    ExhaustedInput,
}
