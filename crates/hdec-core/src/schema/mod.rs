//! Schema text parsing.
//!
//! A schema is a line-oriented text file; each significant line describes one
//! field:
//!
//! ```text
//! name : length-expr [ : type1,type2,... [ : condition-expr ] ]
//! ```
//!
//! Lines with fewer than two `:`-separated parts, and lines whose first
//! non-space character is a comment marker, are skipped without error.
//! Expressions are kept as text here; they are only checked when the decode
//! engine evaluates them, since they may name fields that are decoded later.
//!
//! - `layout`: separators, comment markers and defaults
//! - `types`: [`FieldSpec`] and output type descriptors
//! - `parser`: line parsing

pub mod layout;
pub mod parser;
pub mod types;

pub use parser::parse_schema;
pub use types::{FieldSpec, OutputKind, OutputType};
