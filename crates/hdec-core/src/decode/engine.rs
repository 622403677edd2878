use log::{debug, warn};

use crate::bits::{BitBuffer, BitCursor, BitsError, RawBits};
use crate::expr::{Environment, evaluate_condition, evaluate_length, substitute};
use crate::schema::FieldSpec;

use super::error::DecodeError;

/// A field that was active and fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: String,
    pub source: String,
    /// Bit position the field was read from.
    pub offset: usize,
    pub bits: RawBits,
}

impl DecodedField {
    pub fn value(&self) -> Option<u64> {
        self.bits.value()
    }
}

/// An active field the input was too short for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    pub name: String,
    pub requested: u64,
    pub position: usize,
    pub remaining: usize,
}

/// Receives per-field events in schema order as the decode progresses.
pub trait DecodeObserver {
    fn on_decoded(&mut self, _spec: &FieldSpec, _field: &DecodedField) {}
    fn on_read_failure(&mut self, _spec: &FieldSpec, _failure: &ReadFailure) {}
    fn on_skipped(&mut self, _spec: &FieldSpec) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeSummary {
    pub bits_consumed: usize,
    pub bits_total: usize,
    pub decoded: usize,
    pub read_failures: usize,
    pub skipped: usize,
    pub environment: Environment,
}

/// Everything a decode produced, collected in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub fields: Vec<DecodedField>,
    pub read_failures: Vec<ReadFailure>,
    pub summary: DecodeSummary,
}

/// Decode `buffer` against `fields`, reporting each field to `observer`.
///
/// Fields are processed strictly in order. Length and condition failures are
/// fatal; a read past the end of the input only drops that field and the
/// next one is tried at the same position.
pub fn decode_with<O: DecodeObserver + ?Sized>(
    fields: &[FieldSpec],
    buffer: &BitBuffer,
    observer: &mut O,
) -> Result<DecodeSummary, DecodeError> {
    let mut cursor = BitCursor::new(buffer);
    let mut env = Environment::new();
    let mut pos = 0usize;
    let mut decoded = 0usize;
    let mut read_failures = 0usize;
    let mut skipped = 0usize;

    for spec in fields {
        let length = evaluate_length(&spec.length_expr, &env).map_err(|source| {
            DecodeError::InvalidLengthExpression {
                field: spec.name.clone(),
                expr: spec.length_expr.clone(),
                substituted: substitute(&spec.length_expr, &env),
                source,
            }
        })?;

        let active = evaluate_condition(&spec.condition, &env).map_err(|source| {
            DecodeError::InvalidConditionExpression {
                field: spec.name.clone(),
                expr: spec.condition.clone(),
                substituted: substitute(&spec.condition, &env),
                source,
            }
        })?;

        if !active {
            debug!("{}: condition '{}' false, skipped", spec.name, spec.condition);
            skipped += 1;
            observer.on_skipped(spec);
            continue;
        }

        cursor.seek(pos);
        match cursor.read_bits(length) {
            Ok(bits) => {
                debug!("{}: {} bits at {}", spec.name, length, pos);
                match bits.value() {
                    Some(value) => {
                        if !env.bind(&spec.name, value) {
                            debug!("{}: already bound, keeping first value", spec.name);
                        }
                    }
                    None => warn!(
                        "{}: {}-bit value does not fit in 64 bits and cannot be referenced",
                        spec.name,
                        bits.width()
                    ),
                }
                let field = DecodedField {
                    name: spec.name.clone(),
                    source: spec.source.clone(),
                    offset: pos,
                    bits,
                };
                pos += field.bits.width();
                decoded += 1;
                observer.on_decoded(spec, &field);
            }
            Err(BitsError::InsufficientBits {
                requested,
                remaining,
                position,
            }) => {
                debug!(
                    "{}: need {} bits at {}, {} remaining",
                    spec.name, requested, position, remaining
                );
                read_failures += 1;
                observer.on_read_failure(
                    spec,
                    &ReadFailure {
                        name: spec.name.clone(),
                        requested,
                        position,
                        remaining,
                    },
                );
            }
        }
    }

    Ok(DecodeSummary {
        bits_consumed: pos,
        bits_total: buffer.bit_len(),
        decoded,
        read_failures,
        skipped,
        environment: env,
    })
}

/// Decode and collect every event.
///
/// # Examples
/// ```
/// use hdec_core::bits::BitBuffer;
/// use hdec_core::decode::decode;
/// use hdec_core::schema::parse_schema;
///
/// let fields = parse_schema("a: 8\nb: a * 2 : hex\n", "demo.def");
/// let buffer = BitBuffer::from_bytes(vec![0x02, 0xff, 0xff]);
/// let decoded = decode(&fields, &buffer)?;
/// assert_eq!(decoded.fields[1].bits.to_hex(), "f");
/// assert_eq!(decoded.summary.bits_consumed, 12);
/// # Ok::<(), hdec_core::decode::DecodeError>(())
/// ```
pub fn decode(fields: &[FieldSpec], buffer: &BitBuffer) -> Result<Decoded, DecodeError> {
    let mut collector = Collector::default();
    let summary = decode_with(fields, buffer, &mut collector)?;
    Ok(Decoded {
        fields: collector.fields,
        read_failures: collector.read_failures,
        summary,
    })
}

#[derive(Default)]
struct Collector {
    fields: Vec<DecodedField>,
    read_failures: Vec<ReadFailure>,
}

impl DecodeObserver for Collector {
    fn on_decoded(&mut self, _spec: &FieldSpec, field: &DecodedField) {
        self.fields.push(field.clone());
    }

    fn on_read_failure(&mut self, _spec: &FieldSpec, failure: &ReadFailure) {
        self.read_failures.push(failure.clone());
    }
}
