use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        scope::Scope,
        stdlib::core::{bound_number, host, param},
        value::{
            core::{Value, ValueKind},
            function::HostAction,
            object::Object,
        },
    },
};

/// Registers `range`, in its three arities.
///
/// - `range(stop)` counts from `0` to `stop` in steps of `1`,
/// - `range(start, stop)` counts from `start`,
/// - `range(start, stop, step)` also sets the step, which may be negative.
///
/// The result is an array-convention object of the visited numbers; `stop`
/// itself is excluded. A step of zero is an error.
pub fn register(global: &Rc<Scope>) {
    let action: HostAction = Rc::new(|scope: &Rc<Scope>, line: usize| {
        let stop = bound_number(scope, "!stop", line)?;
        let start = match scope.get("!start") {
            Value::Number(n) => n,
            _ => 0.0,
        };
        let step = match scope.get("!step") {
            Value::Number(n) => n,
            _ => 1.0,
        };

        if step == 0.0 {
            return Err(RuntimeError::HostError { details: "range step must not be zero".to_string(),
                                                 line });
        }

        let object = Object::new();
        let mut count: u64 = 0;
        let mut current = start;

        while (step > 0.0 && current < stop) || (step < 0.0 && current > stop) {
            object.set(&count.to_string(), Value::Number(current));
            count += 1;
            current += step;
        }

        #[allow(clippy::cast_precision_loss)]
        object.set("length", Value::Number(count as f64));

        Ok(Value::Object(object))
    });

    global.set("range",
               host(vec![vec![param("!stop", ValueKind::Number)],
                         vec![param("!start", ValueKind::Number),
                              param("!stop", ValueKind::Number)],
                         vec![param("!start", ValueKind::Number),
                              param("!stop", ValueKind::Number),
                              param("!step", ValueKind::Number)]],
                    action));
}
