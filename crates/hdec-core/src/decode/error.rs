use thiserror::Error;

use crate::expr::ExprError;

/// Fatal decode errors. Any of these aborts the run.
///
/// # Examples
/// ```
/// use hdec_core::decode::DecodeError;
/// use hdec_core::expr::ExprError;
///
/// let err = DecodeError::InvalidLengthExpression {
///     field: "payload".to_string(),
///     expr: "len * 8".to_string(),
///     substituted: "len * 8".to_string(),
///     source: ExprError::UnknownIdentifier { name: "len".to_string() },
/// };
/// assert!(err.to_string().contains("invalid length expression"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid length expression for field '{field}': {expr} ({source})")]
    InvalidLengthExpression {
        field: String,
        expr: String,
        substituted: String,
        source: ExprError,
    },
    #[error("invalid condition for field '{field}': {expr} (parsed to {substituted}) ({source})")]
    InvalidConditionExpression {
        field: String,
        expr: String,
        substituted: String,
        source: ExprError,
    },
}

impl DecodeError {
    pub fn field(&self) -> &str {
        match self {
            DecodeError::InvalidLengthExpression { field, .. }
            | DecodeError::InvalidConditionExpression { field, .. } => field,
        }
    }
}
