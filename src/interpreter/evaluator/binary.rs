use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a binary operator applied to two values.
///
/// Semantics by operator:
/// - `+`: numeric addition when both operands are numbers; otherwise both
///   operands are stringified and concatenated.
/// - `-`, `*`, `/`: numeric only; anything else is a type error.
/// - `%`: numeric only; the result is the representative of `a mod b` in
///   `[0, b)` for positive `b` (`-1 % 3` is `2`).
/// - `<`, `<=`, `>`, `>=`: numeric comparison for two numbers, lexicographic
///   comparison for two strings, type error for any other pairing.
/// - `==`, `!=`: the value-equality rules; never a type error.
///
/// Comparison results are the numbers `1` (true) and `0` (false).
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand value.
/// - `right`: Right operand value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The computed value.
///
/// # Example
/// ```
/// use amta::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::core::Value},
/// };
///
/// let modulo = eval_binary(BinaryOperator::Mod,
///                          &Value::Number(-1.0),
///                          &Value::Number(3.0),
///                          1).unwrap();
/// assert_eq!(modulo, Value::Number(2.0));
///
/// let glued = eval_binary(BinaryOperator::Add,
///                         &Value::Str("n = ".into()),
///                         &Value::Number(4.0),
///                         1).unwrap();
/// assert_eq!(glued, Value::Str("n = 4".into()));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => Ok(eval_add(left, right)),
        BinaryOperator::Sub => {
            let (a, b) = numeric_operands(op, left, right, line)?;
            Ok(Value::Number(a - b))
        },
        BinaryOperator::Mul => {
            let (a, b) = numeric_operands(op, left, right, line)?;
            Ok(Value::Number(a * b))
        },
        BinaryOperator::Div => {
            let (a, b) = numeric_operands(op, left, right, line)?;
            Ok(Value::Number(a / b))
        },
        BinaryOperator::Mod => {
            let (a, b) = numeric_operands(op, left, right, line)?;
            Ok(Value::Number(a.rem_euclid(b)))
        },
        BinaryOperator::Less => eval_ordering(op, left, right, line, Ordering::is_lt),
        BinaryOperator::LessEqual => eval_ordering(op, left, right, line, Ordering::is_le),
        BinaryOperator::Greater => eval_ordering(op, left, right, line, Ordering::is_gt),
        BinaryOperator::GreaterEqual => eval_ordering(op, left, right, line, Ordering::is_ge),
        BinaryOperator::Equal => Ok(Value::from(left == right)),
        BinaryOperator::NotEqual => Ok(Value::from(left != right)),
    }
}

/// Adds two numbers, or concatenates the stringifications of any other
/// operand pairing.
fn eval_add(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
        _ => Value::Str(format!("{left}{right}").into()),
    }
}

/// Extracts two numeric operands, or reports a type error naming the
/// operator and the offending values.
fn numeric_operands(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    line: usize)
                    -> EvalResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::TypeError { details: format!("operands of '{op}' must be numbers, found {left} and {right}"),
                                           line }),
    }
}

/// Evaluates an ordering comparison.
///
/// Two numbers compare numerically and two strings compare
/// lexicographically; any other pairing is a type error. An unordered
/// numeric comparison (a NaN operand) is false.
fn eval_ordering(op: BinaryOperator,
                 left: &Value,
                 right: &Value,
                 line: usize,
                 accept: impl Fn(Ordering) -> bool)
                 -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => {
            return Err(RuntimeError::TypeError { details: format!("cannot compare {left} and {right} with '{op}'"),
                                                 line });
        },
    };

    Ok(Value::from(ordering.is_some_and(accept)))
}
