use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        scope::Scope,
        stdlib::core::{host, param},
        value::{
            core::{Value, ValueKind},
            function::HostAction,
        },
    },
};

/// Registers `isarray(o object)`.
///
/// Returns `1` when the object satisfies the array-convention predicate,
/// else `0`.
pub fn register(global: &Rc<Scope>) {
    let action: HostAction = Rc::new(|scope: &Rc<Scope>, line: usize| {
        let Value::Object(object) = scope.get("!o") else {
            return Err(RuntimeError::HostError { details: "expected !o to be bound to an object".to_string(),
                                                 line });
        };

        Ok(Value::from(object.array_length().is_some()))
    });

    global.set("isarray",
               host(vec![vec![param("!o", ValueKind::Object)]], action));
}
