use std::rc::Rc;

use crate::interpreter::{
    scope::Scope,
    stdlib::core::{host, param},
    value::{
        core::{Value, ValueKind},
        function::HostAction,
    },
};

/// Registers `typeof(value)`.
///
/// Returns one of `"number"`, `"string"`, `"object"`, `"function"`, `"nil"`.
pub fn register(global: &Rc<Scope>) {
    let action: HostAction = Rc::new(|scope: &Rc<Scope>, _line: usize| {
        let value = scope.get("!value");

        Ok(Value::from(value.type_name()))
    });

    global.set("typeof",
               host(vec![vec![param("!value", ValueKind::Any)]], action));
}
