use thiserror::Error;

/// Errors returned by [`crate::bits::BitCursor`] reads.
///
/// # Examples
/// ```
/// use hdec_core::bits::BitsError;
///
/// let err = BitsError::InsufficientBits { requested: 16, remaining: 8, position: 8 };
/// assert!(err.to_string().contains("insufficient bits"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsError {
    #[error("insufficient bits: need {requested} at bit {position}, {remaining} remaining")]
    InsufficientBits {
        requested: u64,
        remaining: usize,
        position: usize,
    },
}
