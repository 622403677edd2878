//! Text rendering of decoded fields.
//!
//! A field line is `name: ` followed by each requested rendering in schema
//! order. `hex`, `int`, `bin` and `text` renderings end with a space; the
//! legacy `str` rendering appends its characters with no separator at all.
//! Fields are grouped by schema source: an empty line precedes the first field
//! of each new source.

use std::io::{self, Write};

use crate::decode::{DecodeError, DecodeObserver, DecodedField, ReadFailure};
use crate::schema::{FieldSpec, OutputKind};

/// Byte-swap `value` when `width` is 16 or 32; any other width passes
/// through unchanged.
///
/// # Examples
/// ```
/// use hdec_core::render::swap_bytes;
///
/// assert_eq!(swap_bytes(0x1234, 16), 0x3412);
/// assert_eq!(swap_bytes(0x12345678, 32), 0x78563412);
/// assert_eq!(swap_bytes(0x123456, 24), 0x123456);
/// ```
pub fn swap_bytes(value: u64, width: usize) -> u64 {
    match width {
        16 => u64::from((value as u16).swap_bytes()),
        32 => u64::from((value as u32).swap_bytes()),
        _ => value,
    }
}

/// Render one field line, without any group separator.
///
/// # Examples
/// ```
/// use hdec_core::bits::RawBits;
/// use hdec_core::decode::DecodedField;
/// use hdec_core::render::render_line;
/// use hdec_core::schema::FieldSpec;
///
/// let spec = FieldSpec::new("a", "8", "demo.def");
/// let field = DecodedField {
///     name: "a".to_string(),
///     source: "demo.def".to_string(),
///     offset: 0,
///     bits: RawBits::from_value(8, 0x41),
/// };
/// assert_eq!(render_line(&spec, &field), "a: 0x41 65 0b01000001 ");
/// ```
pub fn render_line(spec: &FieldSpec, field: &DecodedField) -> String {
    let bits = &field.bits;
    let mut out = format!("{}: ", spec.name);
    for ty in &spec.output_types {
        match &ty.kind {
            OutputKind::Hex => {
                out.push_str("0x");
                out.push_str(&bits.to_hex());
                out.push(' ');
            }
            OutputKind::Int => {
                let text = match bits.value() {
                    Some(value) if ty.swap_bytes => swap_bytes(value, bits.width()).to_string(),
                    _ => bits.to_decimal(),
                };
                out.push_str(&text);
                out.push(' ');
            }
            OutputKind::Bin => {
                out.push_str("0b");
                out.push_str(&bits.to_bin());
                out.push(' ');
            }
            OutputKind::Str => push_legacy_chars(&mut out, &bits.to_hex()),
            OutputKind::Text => {
                out.push('"');
                out.extend(
                    bits.as_bytes()
                        .iter()
                        .flat_map(|byte| std::ascii::escape_default(*byte))
                        .map(char::from),
                );
                out.push_str("\" ");
            }
            OutputKind::Unknown(_) => {}
        }
    }
    out
}

// Hex digits taken in pairs, each pair pushed as the character with that
// code point. A lone trailing digit becomes a character of its own value.
fn push_legacy_chars(out: &mut String, hex_digits: &str) {
    let nibbles: Vec<u8> = hex_digits
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    for pair in nibbles.chunks(2) {
        let code = match pair {
            [hi, lo] => (hi << 4) | lo,
            [single] => *single,
            _ => continue,
        };
        out.push(char::from(code));
    }
}

pub fn render_read_failure(failure: &ReadFailure) -> String {
    format!(
        "Could not read field {} with {} bits!",
        failure.name, failure.requested
    )
}

/// User-facing description of a fatal decode error.
pub fn render_fatal(err: &DecodeError) -> String {
    match err {
        DecodeError::InvalidLengthExpression { expr, .. } => {
            format!("{expr} is not a valid size!")
        }
        DecodeError::InvalidConditionExpression {
            expr, substituted, ..
        } => format!("{expr} is not a valid condition! (Parsed to {substituted})"),
    }
}

/// Tracks schema-source changes between rendered fields.
#[derive(Debug, Default)]
pub struct Renderer {
    last_source: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a field, prefixed with an empty line when its source differs
    /// from the previous rendered field's (or when it is the first).
    pub fn render(&mut self, spec: &FieldSpec, field: &DecodedField) -> String {
        let line = render_line(spec, field);
        if self.last_source.as_deref() == Some(field.source.as_str()) {
            return line;
        }
        self.last_source = Some(field.source.clone());
        format!("\n{line}")
    }
}

/// Observer writing rendered lines to `out` as fields are decoded.
///
/// The first write error stops further output and is returned by
/// [`TextOutput::finish`].
pub struct TextOutput<W: Write> {
    out: W,
    renderer: Renderer,
    error: Option<io::Error>,
}

impl<W: Write> TextOutput<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            renderer: Renderer::new(),
            error: None,
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}") {
            self.error = Some(err);
        }
    }
}

impl<W: Write> DecodeObserver for TextOutput<W> {
    fn on_decoded(&mut self, spec: &FieldSpec, field: &DecodedField) {
        let text = self.renderer.render(spec, field);
        self.write_line(&text);
    }

    fn on_read_failure(&mut self, _spec: &FieldSpec, failure: &ReadFailure) {
        self.write_line(&render_read_failure(failure));
    }
}
