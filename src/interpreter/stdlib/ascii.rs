use std::rc::Rc;

use crate::interpreter::{
    scope::Scope,
    stdlib::core::{host, param},
    value::{
        core::{Value, ValueKind},
        function::HostAction,
    },
};

/// Registers `ascii(value)`.
///
/// - For a number `n` with `0 <= n <= 255`, returns the one-character
///   string for that character code.
/// - For a single-character string, returns its character code.
/// - Anything else yields nil.
pub fn register(global: &Rc<Scope>) {
    let action: HostAction = Rc::new(|scope: &Rc<Scope>, _line: usize| {
        let result = match scope.get("!value") {
            Value::Number(n) if (0.0..=255.0).contains(&n) && n.fract() == 0.0 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let code = n as u8;
                Value::Str(char::from(code).to_string().into())
            },
            Value::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Number(f64::from(c as u32)),
                    _ => Value::Nil,
                }
            },
            _ => Value::Nil,
        };

        Ok(result)
    });

    global.set("ascii",
               host(vec![vec![param("!value", ValueKind::Any)]], action));
}
