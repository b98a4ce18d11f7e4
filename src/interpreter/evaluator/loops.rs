use std::rc::Rc;

use crate::{
    ast::{Expr, Statement, VarRef},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{self, EvalResult, Flow, eval_expr},
        scope::Scope,
        value::core::Value,
    },
};

/// Executes a `while` loop.
///
/// Before each iteration the condition is evaluated in the current scope;
/// while it is truthy, the body runs in a fresh child scope. Each completed
/// iteration counts against the scope's loop budget; exceeding it is a
/// loop-overflow error. An unbounded budget disables the check.
///
/// # Parameters
/// - `condition`: The loop condition.
/// - `body`: The loop body statements.
/// - `line`: Line number of the `while` statement.
/// - `scope`: The current scope.
///
/// # Returns
/// The loop's control-flow outcome.
pub fn exec_while(condition: &Expr,
                  body: &[Statement],
                  line: usize,
                  scope: &Rc<Scope>)
                  -> EvalResult<Flow> {
    let mut iterations: u64 = 0;

    loop {
        if !eval_expr(condition, scope)?.is_truthy() {
            return Ok(Flow::Normal);
        }

        if let Flow::Returned(value) = core::exec_block(body, &Scope::child(scope))? {
            return Ok(Flow::Returned(value));
        }

        iterations += 1;
        if let Some(limit) = scope.max_loop_iterations()
           && iterations > limit
        {
            return Err(RuntimeError::LoopOverflow { limit, line });
        }
    }
}

/// Executes a `for` loop over an array-convention object.
///
/// The iterable is evaluated once and must be an object satisfying the
/// array convention. For each index `i` in `0..length`, a fresh child scope
/// is created, the iterator left-value is assigned the element stored under
/// the key `i`, and the body runs in that scope.
///
/// # Parameters
/// - `target`: The left-value bound to each element.
/// - `iterable`: Expression producing the iterable.
/// - `body`: The loop body statements.
/// - `line`: Line number of the `for` statement.
/// - `scope`: The current scope.
///
/// # Returns
/// The loop's control-flow outcome.
pub fn exec_for_in(target: &VarRef,
                   iterable: &Expr,
                   body: &[Statement],
                   line: usize,
                   scope: &Rc<Scope>)
                   -> EvalResult<Flow> {
    let value = eval_expr(iterable, scope)?;
    let Value::Object(object) = &value else {
        return Err(RuntimeError::TypeError { details: format!("cannot iterate over {value}"),
                                             line });
    };

    let Some(length) = object.array_length() else {
        return Err(RuntimeError::TypeError { details: "for loops iterate over objects following the array convention".to_string(),
                                             line });
    };

    for index in 0..length {
        let element = object.get(&index.to_string());

        let iteration = Scope::child(scope);
        core::assign(target, element, &iteration)?;

        if let Flow::Returned(result) = core::exec_block(body, &iteration)? {
            return Ok(Flow::Returned(result));
        }
    }

    Ok(Flow::Normal)
}
