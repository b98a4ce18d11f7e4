use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    ast::Param,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        scope::Scope,
        stdlib::{ascii, is_array, math, print, range, type_of},
        value::{
            core::{Value, ValueKind},
            function::{FunctionValue, HostAction},
        },
    },
};

/// Where `print` writes.
///
/// The driver passes stdout; tests pass a byte buffer and read it back.
pub type OutputSink = Rc<RefCell<dyn Write>>;

/// Registers the whole standard library into a global scope.
///
/// Must run before evaluation starts. The registered names are `print`,
/// `pow`, `range`, `typeof`, `ascii` and `isarray`.
///
/// # Parameters
/// - `global`: The program's global scope.
/// - `out`: Sink that `print` writes to.
pub fn register(global: &Rc<Scope>, out: &OutputSink) {
    print::register(global, out);
    math::register(global);
    range::register(global);
    type_of::register(global);
    ascii::register(global);
    is_array::register(global);
}

/// Builds a parameter for a host signature.
///
/// Host parameters use force-local names (`!name`) so that binding and
/// reading stay inside the call scope no matter what the caller's scope
/// chain defines.
pub(in crate::interpreter::stdlib) fn param(name: &str, kind: ValueKind) -> Param {
    Param { name: name.to_string(),
            kind }
}

/// Wraps signatures and an action into a host function value.
pub(in crate::interpreter::stdlib) fn host(signatures: Vec<Vec<Param>>,
                                           action: HostAction)
                                           -> Value {
    Value::Function(Rc::new(FunctionValue::Host { signatures, action }))
}

/// Reads a bound argument that the signature declared as a number.
///
/// The call-site kind check guarantees the binding, so a miss here means the
/// host function was registered inconsistently.
pub(in crate::interpreter::stdlib) fn bound_number(scope: &Rc<Scope>,
                                                   name: &str,
                                                   line: usize)
                                                   -> EvalResult<f64> {
    match scope.get(name) {
        Value::Number(n) => Ok(n),
        other => {
            Err(RuntimeError::HostError { details: format!("expected {name} to be bound to a number, found {other}"),
                                          line })
        },
    }
}
