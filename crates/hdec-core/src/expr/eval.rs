use super::env::Environment;
use super::error::ExprError;
use super::lexer::{is_identifier, word_spans};
use super::parser::{BinaryOp, Expr, UnaryOp, parse};

/// Result type an expression is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Integer,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i128),
    Bool(bool),
}

impl Value {
    fn type_name(self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
        }
    }

    fn as_int(self) -> Result<i128, ExprError> {
        match self {
            Value::Int(value) => Ok(value),
            other => Err(ExprError::TypeMismatch {
                expected: "integer",
                found: other.type_name(),
            }),
        }
    }

    fn as_bool(self) -> Result<bool, ExprError> {
        match self {
            Value::Bool(value) => Ok(value),
            other => Err(ExprError::TypeMismatch {
                expected: "boolean",
                found: other.type_name(),
            }),
        }
    }
}

/// Evaluate `source` against `env`, requiring a result of the given mode.
///
/// # Examples
/// ```
/// use hdec_core::expr::{Environment, Mode, Value, evaluate};
///
/// let mut env = Environment::new();
/// env.bind("count", 3);
/// assert_eq!(evaluate("count * 8", &env, Mode::Integer)?, Value::Int(24));
/// assert_eq!(evaluate("count > 2", &env, Mode::Boolean)?, Value::Bool(true));
/// assert!(evaluate("count", &env, Mode::Boolean).is_err());
/// # Ok::<(), hdec_core::expr::ExprError>(())
/// ```
pub fn evaluate(source: &str, env: &Environment, mode: Mode) -> Result<Value, ExprError> {
    let expr = parse(source)?;
    let value = eval(&expr, env)?;
    match mode {
        Mode::Integer => value.as_int().map(Value::Int),
        Mode::Boolean => value.as_bool().map(Value::Bool),
    }
}

/// Evaluate a bit-length expression. Negative results are rejected.
pub fn evaluate_length(source: &str, env: &Environment) -> Result<u64, ExprError> {
    let value = evaluate(source, env, Mode::Integer)?.as_int()?;
    if value < 0 {
        return Err(ExprError::NegativeLength { value });
    }
    u64::try_from(value).map_err(|_| ExprError::Overflow)
}

pub fn evaluate_condition(source: &str, env: &Environment) -> Result<bool, ExprError> {
    evaluate(source, env, Mode::Boolean)?.as_bool()
}

/// Replace every bound identifier in `source` with its decimal value,
/// leaving everything else untouched. Used to show users what an expression
/// looked like once the known fields were filled in.
///
/// # Examples
/// ```
/// use hdec_core::expr::{Environment, substitute};
///
/// let mut env = Environment::new();
/// env.bind("a", 1);
/// env.bind("ab", 2);
/// assert_eq!(substitute("ab + a == abc", &env), "2 + 1 == abc");
/// ```
pub fn substitute(source: &str, env: &Environment) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for span in word_spans(source) {
        let word = &source[span.clone()];
        if !is_identifier(word) {
            continue;
        }
        if let Some(value) = env.get(word) {
            out.push_str(&source[last..span.start]);
            out.push_str(&value.to_string());
            last = span.end;
        }
    }
    out.push_str(&source[last..]);
    out
}

fn eval(expr: &Expr, env: &Environment) -> Result<Value, ExprError> {
    match expr {
        Expr::Int(value) => Ok(Value::Int(*value)),
        Expr::Bool(value) => Ok(Value::Bool(*value)),
        Expr::Ident(name) => {
            let value = env.get(name).ok_or_else(|| ExprError::UnknownIdentifier {
                name: name.clone(),
            })?;
            Ok(Value::Int(i128::from(value)))
        }
        Expr::Unary(op, operand) => {
            let value = eval(operand, env)?;
            match op {
                UnaryOp::Neg => value
                    .as_int()?
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or(ExprError::Overflow),
                UnaryOp::Plus => value.as_int().map(Value::Int),
                UnaryOp::Not => value.as_bool().map(|b| Value::Bool(!b)),
            }
        }
        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            if !eval(lhs, env)?.as_bool()? {
                return Ok(Value::Bool(false));
            }
            eval(rhs, env)?.as_bool().map(Value::Bool)
        }
        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            if eval(lhs, env)?.as_bool()? {
                return Ok(Value::Bool(true));
            }
            eval(rhs, env)?.as_bool().map(Value::Bool)
        }
        Expr::Binary(op, lhs, rhs) => {
            let lhs = eval(lhs, env)?;
            let rhs = eval(rhs, env)?;
            eval_binary(*op, lhs, rhs)
        }
    }
}

fn eval_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    // Equality also applies to two booleans.
    if let (Value::Bool(a), Value::Bool(b)) = (lhs, rhs) {
        match op {
            BinaryOp::Eq => return Ok(Value::Bool(a == b)),
            BinaryOp::Ne => return Ok(Value::Bool(a != b)),
            _ => {}
        }
    }

    let a = lhs.as_int()?;
    let b = rhs.as_int()?;
    let value = match op {
        BinaryOp::Add => Value::Int(a.checked_add(b).ok_or(ExprError::Overflow)?),
        BinaryOp::Sub => Value::Int(a.checked_sub(b).ok_or(ExprError::Overflow)?),
        BinaryOp::Mul => Value::Int(a.checked_mul(b).ok_or(ExprError::Overflow)?),
        BinaryOp::Div => Value::Int(floor_div(a, b)?),
        BinaryOp::Rem => {
            let q = floor_div(a, b)?;
            let r = q
                .checked_mul(b)
                .and_then(|qb| a.checked_sub(qb))
                .ok_or(ExprError::Overflow)?;
            Value::Int(r)
        }
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::Le => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::Ge => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::Ne => Value::Bool(a != b),
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit operators handled in eval"),
    };
    Ok(value)
}

fn floor_div(a: i128, b: i128) -> Result<i128, ExprError> {
    if b == 0 {
        return Err(ExprError::DivisionByZero);
    }
    let q = a.checked_div(b).ok_or(ExprError::Overflow)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, u64)]) -> Environment {
        let mut env = Environment::new();
        for (name, value) in pairs {
            env.bind(name, *value);
        }
        env
    }

    #[test]
    fn arithmetic_over_bound_fields() {
        let env = env(&[("ihl", 5), ("total", 40)]);
        assert_eq!(evaluate_length("ihl * 32 - 160", &env).unwrap(), 0);
        assert_eq!(evaluate_length("(total - ihl * 4) * 8", &env).unwrap(), 160);
        assert_eq!(evaluate_length("-(-3)", &env).unwrap(), 3);
    }

    #[test]
    fn longest_name_wins() {
        let env = env(&[("a", 1), ("ab", 7)]);
        assert_eq!(evaluate_length("ab", &env).unwrap(), 7);
        assert_eq!(evaluate_length("ab * 2 + a", &env).unwrap(), 15);
    }

    #[test]
    fn short_name_never_substituted_inside_long_name() {
        let env = env(&[("len", 1), ("length", 16)]);
        assert_eq!(substitute("length - len", &env), "16 - 1");
        assert_eq!(evaluate_length("length - len", &env).unwrap(), 15);
    }

    #[test]
    fn own_or_unknown_name_fails() {
        let env = env(&[("a", 1)]);
        assert_eq!(
            evaluate_length("b * 8", &env).unwrap_err(),
            ExprError::UnknownIdentifier {
                name: "b".to_string()
            }
        );
    }

    #[test]
    fn division_floors_like_integer_division() {
        let env = Environment::new();
        assert_eq!(evaluate("7 / 2", &env, Mode::Integer).unwrap(), Value::Int(3));
        assert_eq!(evaluate("7 // 2", &env, Mode::Integer).unwrap(), Value::Int(3));
        assert_eq!(evaluate("-7 / 2", &env, Mode::Integer).unwrap(), Value::Int(-4));
        assert_eq!(evaluate("-7 % 2", &env, Mode::Integer).unwrap(), Value::Int(1));
        assert_eq!(evaluate("7 % -2", &env, Mode::Integer).unwrap(), Value::Int(-1));
        assert_eq!(
            evaluate("1 / 0", &env, Mode::Integer).unwrap_err(),
            ExprError::DivisionByZero
        );
        assert_eq!(
            evaluate("1 % 0", &env, Mode::Integer).unwrap_err(),
            ExprError::DivisionByZero
        );
    }

    #[test]
    fn overflow_is_reported() {
        let env = Environment::new();
        assert_eq!(
            evaluate("170141183460469231731687303715884105727 + 1", &env, Mode::Integer)
                .unwrap_err(),
            ExprError::Overflow
        );
    }

    #[test]
    fn negative_length_is_rejected() {
        let env = env(&[("a", 2)]);
        assert_eq!(
            evaluate_length("a - 3", &env).unwrap_err(),
            ExprError::NegativeLength { value: -1 }
        );
    }

    #[test]
    fn conditions_combine_comparisons() {
        let env = env(&[("version", 4), ("flags", 2)]);
        assert!(evaluate_condition("version == 4 and flags != 0", &env).unwrap());
        assert!(evaluate_condition("version == 6 || flags >= 2", &env).unwrap());
        assert!(!evaluate_condition("not (version <= 4)", &env).unwrap());
        assert!(evaluate_condition("!false", &env).unwrap());
        assert!(evaluate_condition("True", &env).unwrap());
        assert!(evaluate_condition("(version > 3) == true", &env).unwrap());
    }

    #[test]
    fn boolean_operators_short_circuit() {
        let env = Environment::new();
        assert!(!evaluate_condition("false and missing == 1", &env).unwrap());
        assert!(evaluate_condition("true or missing == 1", &env).unwrap());
        assert!(evaluate_condition("true and missing == 1", &env).is_err());
    }

    #[test]
    fn mode_mismatch_is_a_type_error() {
        let env = env(&[("a", 1)]);
        assert_eq!(
            evaluate_length("a == 1", &env).unwrap_err(),
            ExprError::TypeMismatch {
                expected: "integer",
                found: "boolean",
            }
        );
        assert_eq!(
            evaluate_condition("a + 1", &env).unwrap_err(),
            ExprError::TypeMismatch {
                expected: "boolean",
                found: "integer",
            }
        );
        assert!(evaluate_condition("true + 1 == 2", &env).is_err());
        assert!(evaluate_condition("true < false", &env).is_err());
    }

    #[test]
    fn full_width_unsigned_values_are_usable() {
        let env = env(&[("big", u64::MAX), ("flags", 0x8000_0000_0000_0001)]);
        assert!(evaluate_condition("flags != 0", &env).unwrap());
        assert!(evaluate_condition("flags > 9223372036854775807", &env).unwrap());
        assert!(evaluate_condition("big == 0xffffffffffffffff", &env).unwrap());
        assert_eq!(evaluate_length("big - big + 8", &env).unwrap(), 8);
        assert_eq!(evaluate_length("flags % 16", &env).unwrap(), 1);
        assert_eq!(evaluate_length("big", &env).unwrap(), u64::MAX);
        assert_eq!(
            evaluate_length("big + 1", &env).unwrap_err(),
            ExprError::Overflow
        );
    }

    #[test]
    fn substitute_leaves_unbound_and_literals_alone() {
        let env = env(&[("a", 65), ("x1", 3)]);
        assert_eq!(substitute("a==65 and 0x1f > x1", &env), "65==65 and 0x1f > 3");
        assert_eq!(substitute("b*2", &env), "b*2");
    }
}
