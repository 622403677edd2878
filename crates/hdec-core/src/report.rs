use crate::decode::{DecodeObserver, DecodeSummary, DecodedField, ReadFailure};
use crate::render::render_line;
use crate::schema::FieldSpec;
use crate::{DecodeReport, FieldRecord, ReadFailureRecord};

/// Observer that accumulates a [`DecodeReport`].
///
/// # Examples
/// ```
/// use hdec_core::bits::BitBuffer;
/// use hdec_core::decode::decode_with;
/// use hdec_core::report::ReportCollector;
/// use hdec_core::schema::parse_schema;
/// use hdec_core::{InputEncoding, make_stub_report};
///
/// let fields = parse_schema("a: 8 : int\n", "demo.def");
/// let buffer = BitBuffer::from_bytes(vec![0x2a]);
/// let stub = make_stub_report("dump.hex", InputEncoding::Hex, vec!["demo.def".to_string()]);
/// let mut collector = ReportCollector::new(stub);
/// let summary = decode_with(&fields, &buffer, &mut collector)?;
/// let report = collector.finish(&summary);
/// assert_eq!(report.fields[0].value, Some(42));
/// assert_eq!(report.bits_consumed, 8);
/// # Ok::<(), hdec_core::decode::DecodeError>(())
/// ```
pub struct ReportCollector {
    report: DecodeReport,
}

impl ReportCollector {
    pub fn new(report: DecodeReport) -> Self {
        Self { report }
    }

    pub fn finish(mut self, summary: &DecodeSummary) -> DecodeReport {
        self.report.input.bits = summary.bits_total;
        self.report.bits_consumed = summary.bits_consumed;
        self.report
    }
}

impl DecodeObserver for ReportCollector {
    fn on_decoded(&mut self, spec: &FieldSpec, field: &DecodedField) {
        self.report.fields.push(FieldRecord {
            name: field.name.clone(),
            source: field.source.clone(),
            offset: field.offset,
            bits: field.bits.width(),
            value: field.value(),
            hex: field.bits.to_hex(),
            bin: field.bits.to_bin(),
            rendered: render_line(spec, field),
        });
    }

    fn on_read_failure(&mut self, _spec: &FieldSpec, failure: &ReadFailure) {
        self.report.read_failures.push(ReadFailureRecord {
            name: failure.name.clone(),
            requested: failure.requested,
            position: failure.position,
        });
    }
}
