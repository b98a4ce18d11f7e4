use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        scope::Scope,
        stdlib::core::{OutputSink, host, param},
        value::{
            core::{Value, ValueKind},
            function::HostAction,
        },
    },
};

/// Registers `print(value)`.
///
/// Writes the stringification of its argument to the output sink, without a
/// trailing newline, and returns nil.
pub fn register(global: &Rc<Scope>, out: &OutputSink) {
    let out = Rc::clone(out);

    let action: HostAction = Rc::new(move |scope: &Rc<Scope>, line: usize| {
        let value = scope.get("!value");

        write!(out.borrow_mut(), "{value}").map_err(|e| {
                                               RuntimeError::HostError { details: format!("print failed: {e}"),
                                                                         line }
                                           })?;

        Ok(Value::Nil)
    });

    global.set("print",
               host(vec![vec![param("!value", ValueKind::Any)]], action));
}
