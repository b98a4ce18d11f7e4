use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use crate::interpreter::value::core::Value;

/// A lexically nested variable environment with sigil-directed resolution.
///
/// Every scope owns a mapping from bare names to values, a pointer to its
/// outer scope, and a pointer to the global scope. The global scope is its
/// own global; it is the only scope without an outer. Names reaching `get`
/// and `set` are raw, including any sigil prefix but without the leading `$`:
///
/// - `!name` targets the receiving scope itself (force-local),
/// - `:name` restarts resolution at the global scope,
/// - a bare `name` resolves to the nearest scope that defines it, falling
///   back (for writes) to the receiver and (for reads) to nil.
///
/// Reads never fail, and assigning nil deletes the resolved binding.
pub struct Scope {
    vars:                RefCell<HashMap<String, Value>>,
    outer:               Option<Rc<Scope>>,
    global:              Weak<Scope>,
    max_loop_iterations: Option<u64>,
}

impl Scope {
    /// Creates the global scope of a program run.
    ///
    /// The global scope references itself as its global, and carries the
    /// loop budget every child inherits. `None` disables the budget.
    #[must_use]
    pub fn global(max_loop_iterations: Option<u64>) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self { vars:                RefCell::new(HashMap::new()),
                                     outer:               None,
                                     global:              weak.clone(),
                                     max_loop_iterations, })
    }

    /// Creates a child scope of `outer`.
    ///
    /// Children are created when entering a function body, an `if`/`el`
    /// branch, or a loop iteration, and dropped when the block exits.
    #[must_use]
    pub fn child(outer: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { vars:                RefCell::new(HashMap::new()),
                       outer:               Some(Rc::clone(outer)),
                       global:              outer.global.clone(),
                       max_loop_iterations: outer.max_loop_iterations, })
    }

    /// The `while` iteration budget inherited from the global scope, or
    /// `None` when unbounded.
    #[must_use]
    pub const fn max_loop_iterations(&self) -> Option<u64> {
        self.max_loop_iterations
    }

    fn global_scope(&self) -> Rc<Self> {
        self.global.upgrade().expect("global scope outlives its children")
    }

    /// Reads a variable, following the sigil rules.
    ///
    /// Unresolved names read as [`Value::Nil`]; `get` never fails.
    ///
    /// # Example
    /// ```
    /// use amta::interpreter::{scope::Scope, value::core::Value};
    ///
    /// let global = Scope::global(None);
    /// global.set("x", Value::Number(1.0));
    ///
    /// let inner = Scope::child(&global);
    /// inner.set("!x", Value::Number(2.0));
    ///
    /// assert_eq!(inner.get("x"), Value::Number(2.0));
    /// assert_eq!(inner.get(":x"), Value::Number(1.0));
    /// assert_eq!(global.get("x"), Value::Number(1.0));
    /// assert_eq!(inner.get("missing"), Value::Nil);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        if let Some(rest) = name.strip_prefix('!') {
            return self.vars.borrow().get(rest).cloned().unwrap_or(Value::Nil);
        }

        if let Some(rest) = name.strip_prefix(':') {
            return self.global_scope().get(rest);
        }

        let mut scope = self;
        loop {
            if let Some(value) = scope.vars.borrow().get(name) {
                return value.clone();
            }
            match &scope.outer {
                Some(outer) => scope = outer.as_ref(),
                None => return Value::Nil,
            }
        }
    }

    /// Writes a variable, following the sigil rules.
    ///
    /// A bare name targets the nearest scope that already defines it, or the
    /// receiver when none does. Assigning [`Value::Nil`] deletes the binding
    /// from the resolved target scope.
    ///
    /// # Example
    /// ```
    /// use amta::interpreter::{scope::Scope, value::core::Value};
    ///
    /// let global = Scope::global(None);
    /// let inner = Scope::child(&global);
    ///
    /// global.set("x", Value::Number(1.0));
    /// inner.set("x", Value::Number(2.0));
    /// assert_eq!(global.get("x"), Value::Number(2.0));
    ///
    /// inner.set("x", Value::Nil);
    /// assert_eq!(inner.get("x"), Value::Nil);
    /// ```
    pub fn set(&self, name: &str, value: Value) {
        if let Some(rest) = name.strip_prefix('!') {
            Self::bind(&self.vars, rest, value);
            return;
        }

        if let Some(rest) = name.strip_prefix(':') {
            self.global_scope().set(rest, value);
            return;
        }

        let mut scope = self;
        loop {
            if scope.vars.borrow().contains_key(name) {
                Self::bind(&scope.vars, name, value);
                return;
            }
            match &scope.outer {
                Some(outer) => scope = outer.as_ref(),
                None => break,
            }
        }

        Self::bind(&self.vars, name, value);
    }

    fn bind(vars: &RefCell<HashMap<String, Value>>, name: &str, value: Value) {
        if matches!(value, Value::Nil) {
            vars.borrow_mut().remove(name);
        } else {
            vars.borrow_mut().insert(name.to_string(), value);
        }
    }
}
