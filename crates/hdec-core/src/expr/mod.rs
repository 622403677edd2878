//! Restricted expression language for field lengths and conditions.
//!
//! Schema fields carry two small expressions: a bit length (integer) and an
//! activation condition (boolean). Both may name fields decoded earlier in the
//! same run. Expressions are lexed, parsed into a tiny AST and evaluated
//! against the run's [`Environment`]; nothing else is reachable from them.
//!
//! Identifiers are lexed with maximal munch, so a bound name is only ever
//! matched as a whole word: with `len` and `length` both bound, `length` always
//! resolves to its own value and never to `len` followed by `gth`.
//!
//! Grammar, loosest binding first: `or`/`||`, `and`/`&&`, `not`/`!`,
//! comparisons (`< <= > >= == !=`, non-associative), `+ -`, `* / // %`, unary
//! `+ -`, then literals (`12`, `0x0c`, `0b1100`, `true`, `false`), identifiers
//! and parentheses.
//!
//! Integer arithmetic is checked and runs over `i128`, so every unsigned
//! 64-bit field value can be used as-is. Nesting depth and token count are
//! capped ([`parser::MAX_DEPTH`], [`parser::MAX_TOKENS`]).

pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use env::Environment;
pub use error::ExprError;
pub use eval::{Mode, Value, evaluate, evaluate_condition, evaluate_length, substitute};
