use std::rc::Rc;

use crate::{
    ast::{Expr, Param, VarRef},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{self, EvalResult, Flow, eval_expr},
        scope::Scope,
        value::{core::Value, function::FunctionValue},
    },
};

/// Evaluates a function call.
///
/// The callee left-value is resolved first and must be a function. The
/// accepted parameter list is selected by argument count, the arguments are
/// then evaluated in the caller's scope left-to-right and checked against
/// the declared kinds, and finally a child scope of the caller's current
/// scope is created and each parameter name is assigned its argument there.
///
/// A user-defined body runs until it returns; falling off the end yields
/// nil. A host action runs against the populated call scope.
///
/// # Parameters
/// - `callee`: Left-value resolving to the function.
/// - `arguments`: Argument expressions.
/// - `line`: Line number of the call.
/// - `scope`: The caller's current scope.
///
/// # Returns
/// The call's result.
pub fn eval_call(callee: &VarRef,
                 arguments: &[Expr],
                 line: usize,
                 scope: &Rc<Scope>)
                 -> EvalResult<Value> {
    let value = core::resolve(callee, scope)?;
    let Value::Function(function) = &value else {
        return Err(RuntimeError::TypeError { details: format!("{value} is not callable"),
                                             line });
    };

    let params = select_signature(function, arguments.len(), line)?;

    let mut args = Vec::with_capacity(arguments.len());
    for expr in arguments {
        args.push(eval_expr(expr, scope)?);
    }

    check_kinds(params, &args, line)?;

    let call_scope = Scope::child(scope);
    for (param, arg) in params.iter().zip(args) {
        call_scope.set(&param.name, arg);
    }

    match function.as_ref() {
        FunctionValue::User { body, .. } => match core::exec_block(body, &call_scope)? {
            Flow::Returned(result) => Ok(result),
            Flow::Normal => Ok(Value::Nil),
        },
        FunctionValue::Host { action, .. } => action(&call_scope, line),
    }
}

/// Picks the parameter list whose count matches the argument count.
///
/// User functions have exactly one; host functions may accept several
/// arities. No match is an arity error reporting the largest accepted
/// count.
fn select_signature(function: &FunctionValue,
                    found: usize,
                    line: usize)
                    -> EvalResult<&[Param]> {
    let signatures = function.signatures();

    signatures.iter()
              .find(|params| params.len() == found)
              .copied()
              .ok_or_else(|| {
                  let expected = signatures.iter().map(|params| params.len()).max().unwrap_or(0);
                  RuntimeError::ArityError { expected,
                                            found,
                                            line }
              })
}

/// Checks each argument against its parameter's declared kind.
fn check_kinds(params: &[Param], args: &[Value], line: usize) -> EvalResult<()> {
    for (param, arg) in params.iter().zip(args) {
        if !param.kind.matches(arg) {
            return Err(RuntimeError::TypeError { details: format!("parameter ${} expects a {}, found {arg}",
                                                                  param.name, param.kind),
                                                 line });
        }
    }
    Ok(())
}
