//! Bit-level access to the input dump.
//!
//! The input is held in a [`BitBuffer`] (bytes plus an exact bit length, since
//! hex text may end on a nibble). A [`BitCursor`] walks it forward, MSB first,
//! handing out [`RawBits`] patterns that keep both the numeric value and the
//! exact width needed by the renderer.
//!
//! Layering:
//! - `buffer`: immutable storage and single-bit access
//! - `cursor`: forward-only reads with explicit shortfall errors
//! - `raw`: the decoded bit pattern and its textual forms
//! - `error`: read errors

pub mod buffer;
pub mod cursor;
pub mod error;
pub mod raw;

pub use buffer::BitBuffer;
pub use cursor::BitCursor;
pub use error::BitsError;
pub use raw::RawBits;
