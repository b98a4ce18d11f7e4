use std::rc::Rc;

use crate::{
    ast::{Expr, IndexStep, Statement, VarRef},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary, call, loops, unary},
        scope::Scope,
        value::{core::Value, function::FunctionValue},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of running a statement.
///
/// `return` does not unwind through an exception; every statement reports
/// whether execution continues normally or a function result is being
/// carried outward.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` was executed; the value unwinds to the enclosing call (or
    /// to the program's top level).
    Returned(Value),
}

/// Evaluates an expression against a scope and returns the resulting value.
///
/// This is the main entry point for expression evaluation. The evaluator
/// dispatches based on expression variant: literals, variable references,
/// function literals, calls, and unary and binary operations.
///
/// # Parameters
/// - `expr`: Expression to evaluate.
/// - `scope`: The current scope.
///
/// # Returns
/// The computed value.
pub fn eval_expr(expr: &Expr, scope: &Rc<Scope>) -> EvalResult<Value> {
    match expr {
        Expr::Literal { value, .. } => Ok(Value::from(value)),
        Expr::Variable { var } => resolve(var, scope),
        Expr::Function { params, body, .. } => {
            Ok(Value::Function(Rc::new(FunctionValue::User { params: params.clone(),
                                                             body:   Rc::clone(body), })))
        },
        Expr::Call { callee,
                     arguments,
                     line, } => call::eval_call(callee, arguments, *line, scope),
        Expr::UnaryOp { op, expr, line } => {
            let value = eval_expr(expr, scope)?;
            unary::eval_unary(*op, &value, *line)
        },
        Expr::BinaryOp { left, op, right, line } => {
            let lval = eval_expr(left, scope)?;
            let rval = eval_expr(right, scope)?;
            binary::eval_binary(*op, &lval, &rval, *line)
        },
    }
}

/// Executes a single statement.
///
/// Handles assignments, call statements, conditionals, loops and `return`.
/// `if` branches run in a fresh child scope; loops create one child scope
/// per iteration.
///
/// # Parameters
/// - `statement`: Statement to execute.
/// - `scope`: The current scope.
///
/// # Returns
/// The statement's control-flow outcome.
pub fn exec_statement(statement: &Statement, scope: &Rc<Scope>) -> EvalResult<Flow> {
    match statement {
        Statement::Assignment { target, value, .. } => {
            let value = eval_expr(value, scope)?;
            assign(target, value, scope)?;
            Ok(Flow::Normal)
        },
        Statement::Expression { expr, .. } => {
            eval_expr(expr, scope)?;
            Ok(Flow::Normal)
        },
        Statement::If { condition,
                        then_block,
                        else_block,
                        .. } => {
            if eval_expr(condition, scope)?.is_truthy() {
                exec_block(then_block, &Scope::child(scope))
            } else if let Some(block) = else_block {
                exec_block(block, &Scope::child(scope))
            } else {
                Ok(Flow::Normal)
            }
        },
        Statement::While { condition, body, line } => {
            loops::exec_while(condition, body, *line, scope)
        },
        Statement::ForIn { target,
                           iterable,
                           body,
                           line, } => loops::exec_for_in(target, iterable, body, *line, scope),
        Statement::Return { value, .. } => {
            let value = match value {
                Some(expr) => eval_expr(expr, scope)?,
                None => Value::Nil,
            };
            Ok(Flow::Returned(value))
        },
    }
}

/// Executes a sequence of statements in the given scope.
///
/// Execution stops early when a statement returns, and the `Returned`
/// outcome is carried outward unchanged.
///
/// # Parameters
/// - `statements`: Statements to execute, in order.
/// - `scope`: The scope the statements run in.
///
/// # Returns
/// The block's control-flow outcome.
pub fn exec_block(statements: &[Statement], scope: &Rc<Scope>) -> EvalResult<Flow> {
    for statement in statements {
        if let Flow::Returned(value) = exec_statement(statement, scope)? {
            return Ok(Flow::Returned(value));
        }
    }
    Ok(Flow::Normal)
}

/// Resolves a left-value to the value it currently refers to.
///
/// The base identifier is read through the scope's sigil rules, then each
/// index step descends into the current value, which must be an object.
/// Absent keys read as nil; indexing into a non-object is a type error.
///
/// # Parameters
/// - `var`: The left-value to read.
/// - `scope`: The current scope.
///
/// # Returns
/// The referenced value.
pub fn resolve(var: &VarRef, scope: &Rc<Scope>) -> EvalResult<Value> {
    let mut value = scope.get(&var.base);

    for step in &var.steps {
        let key = step_key(step, scope)?;
        let Value::Object(object) = &value else {
            return Err(RuntimeError::TypeError { details: format!("cannot index into {value}"),
                                                 line:    var.line, });
        };
        value = object.get(&key);
    }

    Ok(value)
}

/// Assigns a value through a left-value.
///
/// Without index steps the write goes through the scope's sigil rules.
/// With steps, the base and all intermediate steps must resolve to objects;
/// the final step's key is written on the innermost object (writing nil
/// removes the key).
///
/// # Parameters
/// - `var`: The left-value to write.
/// - `value`: The value to store.
/// - `scope`: The current scope.
pub fn assign(var: &VarRef, value: Value, scope: &Rc<Scope>) -> EvalResult<()> {
    let Some((last, rest)) = var.steps.split_last() else {
        scope.set(&var.base, value);
        return Ok(());
    };

    let mut current = scope.get(&var.base);

    for step in rest {
        let key = step_key(step, scope)?;
        let Value::Object(object) = &current else {
            return Err(RuntimeError::TypeError { details: format!("cannot index into {current}"),
                                                 line:    var.line, });
        };
        current = object.get(&key);
    }

    let key = step_key(last, scope)?;
    let Value::Object(object) = &current else {
        return Err(RuntimeError::TypeError { details: format!("cannot index into {current}"),
                                             line:    var.line, });
    };

    object.set(&key, value);
    Ok(())
}

/// Computes the object key named by an index step.
///
/// Static segments are used verbatim; dynamic index expressions are
/// evaluated in the current scope and stringified, so `$o[1]` and `$o["1"]`
/// address the same entry.
fn step_key(step: &IndexStep, scope: &Rc<Scope>) -> EvalResult<String> {
    match step {
        IndexStep::Static(segment) => Ok(segment.clone()),
        IndexStep::Dynamic(expr) => Ok(eval_expr(expr, scope)?.to_string()),
    }
}
