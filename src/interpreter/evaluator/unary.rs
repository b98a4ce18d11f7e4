use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a unary operator applied to a value.
///
/// - `+` requires a string and returns the number it spells; a string that
///   is not a valid number is an error.
/// - `-` requires a number and negates it.
/// - `!` returns `1` when the operand is not truthy, else `0`.
///
/// # Parameters
/// - `op`: The unary operator.
/// - `value`: The operand value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The computed value.
///
/// # Example
/// ```
/// use amta::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::core::Value},
/// };
///
/// let parsed = eval_unary(UnaryOperator::Plus, &Value::Str("42".into()), 1).unwrap();
/// assert_eq!(parsed, Value::Number(42.0));
///
/// let negated = eval_unary(UnaryOperator::Not, &Value::Nil, 1).unwrap();
/// assert_eq!(negated, Value::Number(1.0));
/// ```
pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Plus => match value {
            Value::Str(s) => {
                s.parse::<f64>()
                 .map(Value::Number)
                 .map_err(|_| RuntimeError::InvalidNumber { value: s.to_string(),
                                                            line })
            },
            _ => Err(RuntimeError::TypeError { details: format!("unary '{op}' expects a string, found {value}"),
                                               line }),
        },
        UnaryOperator::Negate => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::TypeError { details: format!("unary '{op}' expects a number, found {value}"),
                                               line }),
        },
        UnaryOperator::Not => Ok(Value::from(!value.is_truthy())),
    }
}
