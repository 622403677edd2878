//! The decode loop.
//!
//! [`decode_with`] walks the field list once, in order, keeping the bit
//! position and the [`Environment`](crate::expr::Environment) of decoded
//! values as explicit state. For every field it evaluates the length, then the
//! condition, then reads. Failures are split by severity:
//!
//! - a length or condition that does not evaluate is fatal ([`DecodeError`]);
//! - a read past the end of the input only drops that field, reported through
//!   [`DecodeObserver::on_read_failure`]; the next field starts at the same
//!   position.
//!
//! Observers see events in schema order while the loop runs, so output
//! written before a fatal error stays written.

pub mod engine;
pub mod error;

pub use engine::{
    DecodeObserver, DecodeSummary, Decoded, DecodedField, ReadFailure, decode, decode_with,
};
pub use error::DecodeError;

use std::path::Path;

use thiserror::Error;

use crate::source::{InputEncoding, SourceError, load_input, load_schema_files};

/// Errors of a whole file-to-output run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Load `schemas` and `input`, then decode, streaming events to `observer`.
///
/// Both files are read before the first field is decoded, so unreadable
/// sources never produce partial output.
pub fn decode_files<P, O>(
    input: &Path,
    encoding: InputEncoding,
    schemas: &[P],
    observer: &mut O,
) -> Result<DecodeSummary, RunError>
where
    P: AsRef<Path>,
    O: DecodeObserver + ?Sized,
{
    let fields = load_schema_files(schemas)?;
    let buffer = load_input(input, encoding)?;
    Ok(decode_with(&fields, &buffer, observer)?)
}
