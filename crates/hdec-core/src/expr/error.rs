use thiserror::Error;

/// Reasons an expression failed to lex, parse or evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("invalid integer literal '{literal}'")]
    InvalidLiteral { literal: String },
    #[error("unexpected token '{token}' at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unknown identifier '{name}'")]
    UnknownIdentifier { name: String },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("negative length: {value}")]
    NegativeLength { value: i128 },
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
    #[error("expression has {tokens} tokens, more than {limit}")]
    TooLong { tokens: usize, limit: usize },
}
