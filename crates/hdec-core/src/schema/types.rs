use std::fmt;

use super::layout;
use crate::expr::lexer::{Token, tokenize};

/// Rendering requested for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    Hex,
    Int,
    Bin,
    /// Legacy character dump appended straight onto the line.
    Str,
    /// Quoted, escaped byte string.
    Text,
    /// Unrecognized token; renders nothing.
    Unknown(String),
}

impl OutputKind {
    pub fn from_token(token: &str) -> Self {
        match token {
            "hex" => OutputKind::Hex,
            "int" => OutputKind::Int,
            "bin" => OutputKind::Bin,
            "str" => OutputKind::Str,
            "text" => OutputKind::Text,
            other => OutputKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::Hex => f.write_str("hex"),
            OutputKind::Int => f.write_str("int"),
            OutputKind::Bin => f.write_str("bin"),
            OutputKind::Str => f.write_str("str"),
            OutputKind::Text => f.write_str("text"),
            OutputKind::Unknown(token) => f.write_str(token),
        }
    }
}

/// One output type token, resolved at load time.
///
/// # Examples
/// ```
/// use hdec_core::schema::{OutputKind, OutputType};
///
/// let ty = OutputType::parse("intE");
/// assert_eq!(ty.kind, OutputKind::Int);
/// assert!(ty.swap_bytes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputType {
    pub kind: OutputKind,
    pub swap_bytes: bool,
}

impl OutputType {
    pub fn new(kind: OutputKind) -> Self {
        Self {
            kind,
            swap_bytes: false,
        }
    }

    pub fn parse(token: &str) -> Self {
        match token.strip_suffix(layout::SWAP_MARKER) {
            Some(base) => Self {
                kind: OutputKind::from_token(base),
                swap_bytes: true,
            },
            None => Self::new(OutputKind::from_token(token)),
        }
    }

    pub fn defaults() -> Vec<Self> {
        layout::DEFAULT_OUTPUT_TYPES
            .iter()
            .map(|token| Self::parse(token))
            .collect()
    }
}

/// A field description as loaded from a schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    /// Bit length expression, evaluated at decode time.
    pub length_expr: String,
    pub output_types: Vec<OutputType>,
    /// Activation condition, evaluated at decode time.
    pub condition: String,
    /// Schema source the field was read from.
    pub source: String,
    /// 1-based line number within `source`.
    pub line: usize,
}

impl FieldSpec {
    /// Field with default output types and an always-true condition.
    pub fn new(name: &str, length_expr: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            length_expr: length_expr.to_string(),
            output_types: OutputType::defaults(),
            condition: layout::DEFAULT_CONDITION.to_string(),
            source: source.to_string(),
            line: 0,
        }
    }

    pub fn with_output_types(mut self, output_types: Vec<OutputType>) -> Self {
        self.output_types = output_types;
        self
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.condition = condition.to_string();
        self
    }

    /// Whether later expressions can name this field: the name must lex as a
    /// single identifier (no spaces, dashes or keywords).
    pub fn is_referable(&self) -> bool {
        matches!(
            tokenize(&self.name).as_deref(),
            Ok([only]) if matches!(&only.token, Token::Ident(name) if *name == self.name)
        )
    }
}
