use std::rc::Rc;

use crate::interpreter::{
    scope::Scope,
    stdlib::core::{bound_number, host, param},
    value::{
        core::{Value, ValueKind},
        function::HostAction,
    },
};

/// Registers `pow(a number, b number)`, returning `a` raised to `b`.
pub fn register(global: &Rc<Scope>) {
    let action: HostAction = Rc::new(|scope: &Rc<Scope>, line: usize| {
        let base = bound_number(scope, "!a", line)?;
        let exponent = bound_number(scope, "!b", line)?;

        Ok(Value::Number(base.powf(exponent)))
    });

    global.set("pow",
               host(vec![vec![param("!a", ValueKind::Number),
                              param("!b", ValueKind::Number)]],
                    action));
}
