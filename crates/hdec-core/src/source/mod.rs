//! File-backed sources: the input dump and the schema files.
//!
//! All file I/O of the library lives here. Everything downstream (schema
//! parsing, decoding, rendering) works on in-memory values.

mod input;
mod schema;

pub use input::{InputEncoding, load_input, parse_bin_text, parse_hex_text};
pub use schema::{load_schema_file, load_schema_files};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid binary digit '{ch}' at offset {offset}")]
    InvalidBinDigit { ch: char, offset: usize },
}

impl SourceError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
