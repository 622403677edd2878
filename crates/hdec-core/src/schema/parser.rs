use log::{debug, trace};

use super::layout;
use super::types::{FieldSpec, OutputKind, OutputType};

/// Parse schema `text` read from `source` into field specs, in line order.
///
/// # Examples
/// ```
/// use hdec_core::schema::parse_schema;
///
/// let fields = parse_schema("# header\nversion: 4\nihl: 4 : int\n", "ip.def");
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].name, "ihl");
/// assert_eq!(fields[1].line, 3);
/// ```
pub fn parse_schema(text: &str, source: &str) -> Vec<FieldSpec> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| parse_line(line, source, index + 1))
        .collect()
}

fn parse_line(line: &str, source: &str, line_no: usize) -> Option<FieldSpec> {
    let parts: Vec<&str> = line.split(layout::PART_SEPARATOR).collect();
    if parts.len() < 2 {
        trace!("{source}:{line_no}: no field separator, skipped");
        return None;
    }
    if let Some(first) = line.trim_start().chars().next() {
        if layout::COMMENT_MARKERS.contains(&first) {
            trace!("{source}:{line_no}: comment, skipped");
            return None;
        }
    }

    let name = parts[layout::NAME_PART].trim();
    if name.is_empty() {
        trace!("{source}:{line_no}: empty field name, skipped");
        return None;
    }

    let mut field = FieldSpec::new(name, parts[layout::LENGTH_PART].trim(), source);
    field.line = line_no;
    if !field.is_referable() {
        debug!("{source}:{line_no}: field '{name}' cannot be named in expressions");
    }

    if let Some(types) = non_empty_part(&parts, layout::TYPES_PART) {
        field.output_types = parse_output_types(types);
        for ty in &field.output_types {
            if let OutputKind::Unknown(token) = &ty.kind {
                debug!("{source}:{line_no}: unknown output type '{token}' for {name}");
            }
        }
    }
    if let Some(condition) = non_empty_part(&parts, layout::CONDITION_PART) {
        field.condition = condition.to_string();
    }

    Some(field)
}

fn non_empty_part<'a>(parts: &[&'a str], index: usize) -> Option<&'a str> {
    parts
        .get(index)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
}

fn parse_output_types(raw: &str) -> Vec<OutputType> {
    raw.split(layout::TYPE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(OutputType::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_schema;
    use crate::schema::{OutputKind, OutputType};

    #[test]
    fn full_line_is_parsed() {
        let fields = parse_schema("  flags : 2*4 : hex, intE ,str : version == 4  ", "a.def");
        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert_eq!(field.name, "flags");
        assert_eq!(field.length_expr, "2*4");
        assert_eq!(
            field.output_types,
            vec![
                OutputType::new(OutputKind::Hex),
                OutputType {
                    kind: OutputKind::Int,
                    swap_bytes: true,
                },
                OutputType::new(OutputKind::Str),
            ]
        );
        assert_eq!(field.condition, "version == 4");
        assert_eq!(field.source, "a.def");
        assert_eq!(field.line, 1);
    }

    #[test]
    fn defaults_apply_when_parts_are_missing() {
        let fields = parse_schema("a: 8", "s");
        assert_eq!(fields[0].output_types, OutputType::defaults());
        assert_eq!(fields[0].condition, "true");
    }

    #[test]
    fn empty_parts_fall_back_to_defaults() {
        let fields = parse_schema("a: 8 : : a == 1", "s");
        assert_eq!(fields[0].output_types, OutputType::defaults());
        assert_eq!(fields[0].condition, "a == 1");
    }

    #[test]
    fn comments_and_malformed_lines_are_skipped() {
        let text = "\
# comment: 8
// comment: 8
\"quoted: 8
; semi: 8
, comma: 8
   # indented: 8
no separator here

: 8
kept: 8
";
        let fields = parse_schema(text, "s");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "kept");
        assert_eq!(fields[0].line, 10);
    }

    #[test]
    fn length_expression_is_not_evaluated() {
        let fields = parse_schema("payload: later_field * 8", "s");
        assert_eq!(fields[0].length_expr, "later_field * 8");
    }

    #[test]
    fn order_follows_lines() {
        let fields = parse_schema("c: 1\na: 2\nb: 3\n", "s");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        let fields = parse_schema("a: 8 : int\r\nb: 4\r\n", "s");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].output_types, vec![OutputType::new(OutputKind::Int)]);
        assert_eq!(fields[1].length_expr, "4");
    }
}
