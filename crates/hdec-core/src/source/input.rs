use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::SourceError;
use crate::bits::BitBuffer;

/// How the bytes of the input file become bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    /// Hex digits as text, four bits per digit.
    Hex,
    /// `0`/`1` characters as text, one bit per digit.
    Bin,
    /// The file bytes as-is.
    Raw,
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEncoding::Hex => f.write_str("hex"),
            InputEncoding::Bin => f.write_str("bin"),
            InputEncoding::Raw => f.write_str("raw"),
        }
    }
}

pub fn load_input(path: &Path, encoding: InputEncoding) -> Result<BitBuffer, SourceError> {
    let buffer = match encoding {
        InputEncoding::Raw => {
            let bytes = fs::read(path).map_err(|err| SourceError::io(path, err))?;
            BitBuffer::from_bytes(bytes)
        }
        InputEncoding::Hex => {
            let text = fs::read_to_string(path).map_err(|err| SourceError::io(path, err))?;
            parse_hex_text(&text)?
        }
        InputEncoding::Bin => {
            let text = fs::read_to_string(path).map_err(|err| SourceError::io(path, err))?;
            parse_bin_text(&text)?
        }
    };
    debug!(
        "loaded {} bits from {} ({})",
        buffer.bit_len(),
        path.display(),
        encoding
    );
    Ok(buffer)
}

/// Parse hex text. Whitespace is ignored, a leading `0x` is allowed, and an
/// odd number of digits leaves a trailing half byte.
///
/// # Examples
/// ```
/// use hdec_core::source::parse_hex_text;
///
/// let buffer = parse_hex_text("0x02 FF f\n")?;
/// assert_eq!(buffer.bit_len(), 20);
/// assert_eq!(buffer.as_bytes(), &[0x02, 0xff, 0xf0]);
/// # Ok::<(), hdec_core::source::SourceError>(())
/// ```
pub fn parse_hex_text(text: &str) -> Result<BitBuffer, SourceError> {
    let compact = strip_whitespace(text);
    let digits = strip_prefix(&compact, "0x", "0X");
    let bit_len = digits.len() * 4;
    let bytes = if digits.len() % 2 == 1 {
        hex::decode(format!("{digits}0"))?
    } else {
        hex::decode(digits)?
    };
    Ok(BitBuffer::with_bit_len(bytes, bit_len))
}

/// Parse binary text. Whitespace is ignored and a leading `0b` is allowed.
///
/// # Examples
/// ```
/// use hdec_core::source::parse_bin_text;
///
/// let buffer = parse_bin_text("0b1010 1")?;
/// assert_eq!(buffer.bit_len(), 5);
/// assert_eq!(buffer.as_bytes(), &[0b1010_1000]);
/// # Ok::<(), hdec_core::source::SourceError>(())
/// ```
pub fn parse_bin_text(text: &str) -> Result<BitBuffer, SourceError> {
    let compact = strip_whitespace(text);
    let digits = strip_prefix(&compact, "0b", "0B");
    let mut bytes = vec![0u8; digits.len().div_ceil(8)];
    for (offset, ch) in digits.chars().enumerate() {
        match ch {
            '0' => {}
            '1' => bytes[offset / 8] |= 0x80 >> (offset % 8),
            _ => return Err(SourceError::InvalidBinDigit { ch, offset }),
        }
    }
    Ok(BitBuffer::with_bit_len(bytes, digits.len()))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn strip_prefix<'a>(text: &'a str, lower: &str, upper: &str) -> &'a str {
    text.strip_prefix(lower)
        .or_else(|| text.strip_prefix(upper))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_ignores_whitespace_and_case() {
        let buffer = parse_hex_text(" 41 42\n4a\t4B ").unwrap();
        assert_eq!(buffer.as_bytes(), &[0x41, 0x42, 0x4a, 0x4b]);
        assert_eq!(buffer.bit_len(), 32);
    }

    #[test]
    fn hex_rejects_non_digits() {
        let err = parse_hex_text("41 4g").unwrap_err();
        assert!(matches!(err, SourceError::InvalidHex(_)));
    }

    #[test]
    fn empty_hex_is_empty_buffer() {
        let buffer = parse_hex_text("\n").unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn bin_packs_msb_first() {
        let buffer = parse_bin_text("0100 0001 0100 0010").unwrap();
        assert_eq!(buffer.as_bytes(), &[0x41, 0x42]);
        assert_eq!(buffer.bit_len(), 16);
    }

    #[test]
    fn bin_rejects_other_characters() {
        let err = parse_bin_text("0102").unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidBinDigit { ch: '2', offset: 3 }
        ));
    }

    #[test]
    fn raw_input_is_read_verbatim() {
        let dir = std::env::temp_dir().join(format!("hdec_raw_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dump.bin");
        fs::write(&path, [0x00, 0xff, 0x10]).unwrap();
        let buffer = load_input(&path, InputEncoding::Raw).unwrap();
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(buffer.as_bytes(), &[0x00, 0xff, 0x10]);
        assert_eq!(buffer.bit_len(), 24);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_input(Path::new("/nonexistent/hdec/input.hex"), InputEncoding::Hex)
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/hdec/input.hex"));
    }
}
