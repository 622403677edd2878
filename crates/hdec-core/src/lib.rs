//! hdec core library: schema-driven decoding of binary header dumps.
//!
//! A schema lists fields in order; each field has a bit length and an
//! activation condition written as small expressions that may refer to fields
//! decoded earlier in the same run. The pipeline is:
//!
//! `source` (files → schema text and bit buffer) → `schema` (field specs) →
//! `decode` (ordered loop over a `bits` cursor, evaluating `expr`) → `render`
//! (text lines) or `report` (serializable record).
//!
//! Invariants:
//! - Fields are decoded strictly in schema order; nothing is reordered.
//! - The environment of decoded values is append-only and lives for one run.
//! - Only a read past the end of the input is recoverable; expression failures
//!   end the run.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use hdec_core::InputEncoding;
//! use hdec_core::decode::decode_files;
//! use hdec_core::render::TextOutput;
//!
//! let mut out = TextOutput::new(std::io::stdout());
//! decode_files(Path::new("dump.hex"), InputEncoding::Hex, &["ip.def"], &mut out)?;
//! out.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod bits;
pub mod decode;
pub mod expr;
pub mod render;
pub mod report;
pub mod schema;
pub mod source;

pub use source::{InputEncoding, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Record of one decode run, as emitted by `hdec --format json`.
///
/// # Examples
/// ```
/// use hdec_core::{InputEncoding, make_stub_report};
///
/// let report = make_stub_report("dump.hex", InputEncoding::Hex, vec!["ip.def".to_string()]);
/// assert_eq!(report.report_version, hdec_core::REPORT_VERSION);
/// assert!(report.fields.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    /// Schema sources in load order.
    pub schemas: Vec<String>,
    /// Decoded fields in decode order.
    pub fields: Vec<FieldRecord>,
    /// Active fields the input was too short for.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub read_failures: Vec<ReadFailureRecord>,
    pub bits_consumed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input dump metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided.
    pub path: String,
    pub encoding: InputEncoding,
    /// Total bits available in the input.
    pub bits: usize,
}

/// One decoded field.
///
/// # Examples
/// ```
/// use hdec_core::FieldRecord;
///
/// let record = FieldRecord {
///     name: "version".to_string(),
///     source: "ip.def".to_string(),
///     offset: 0,
///     bits: 4,
///     value: Some(4),
///     hex: "4".to_string(),
///     bin: "0100".to_string(),
///     rendered: "version: 0x4 4 0b0100 ".to_string(),
/// };
/// assert_eq!(record.bits, 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub source: String,
    /// Bit offset the field was read from.
    pub offset: usize,
    /// Field width in bits.
    pub bits: usize,
    /// Unsigned value, absent when wider than 64 bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    pub hex: String,
    pub bin: String,
    /// The text-mode line for this field.
    pub rendered: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadFailureRecord {
    pub name: String,
    pub requested: u64,
    pub position: usize,
}

/// Build a report with input metadata filled in and no fields yet.
pub fn make_stub_report(
    input_path: &str,
    encoding: InputEncoding,
    schemas: Vec<String>,
) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "hdec".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            encoding,
            bits: 0,
        },
        schemas,
        fields: vec![],
        read_failures: vec![],
        bits_consumed: 0,
    }
}
