use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// Largest integer length exactly representable as an `f64` (`2^53 - 1`).
const MAX_SAFE_LENGTH: f64 = 9_007_199_254_740_991.0;

/// A mutable mapping from string keys to values, shared by reference.
///
/// Cloning an `Object` clones the handle, not the entries: all copies observe
/// the same mutations. Absent keys read as [`Value::Nil`] and assigning
/// [`Value::Nil`] removes a key, so `get` and `set` never fail.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: Rc<RefCell<HashMap<String, Value>>>,
}

impl Object {
    /// Creates a new, empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value stored under `key`, or [`Value::Nil`] for absent keys.
    ///
    /// # Example
    /// ```
    /// use amta::interpreter::value::{core::Value, object::Object};
    ///
    /// let object = Object::new();
    /// assert_eq!(object.get("missing"), Value::Nil);
    ///
    /// object.set("x", Value::Number(3.0));
    /// assert_eq!(object.get("x"), Value::Number(3.0));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        self.entries
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or(Value::Nil)
    }

    /// Stores `value` under `key`. Storing [`Value::Nil`] removes the key.
    ///
    /// # Example
    /// ```
    /// use amta::interpreter::value::{core::Value, object::Object};
    ///
    /// let object = Object::new();
    /// object.set("x", Value::Number(3.0));
    /// object.set("x", Value::Nil);
    ///
    /// assert_eq!(object.get("x"), Value::Nil);
    /// assert_eq!(object.len(), 0);
    /// ```
    pub fn set(&self, key: &str, value: Value) {
        if matches!(value, Value::Nil) {
            self.entries.borrow_mut().remove(key);
        } else {
            self.entries.borrow_mut().insert(key.to_string(), value);
        }
    }

    /// Returns the number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` when the object holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Tests the array convention and returns the element count when it
    /// holds.
    ///
    /// An object is an array iff it has a `length` key holding a non-negative
    /// integer number `n`, exactly `n + 1` keys in total, and keys
    /// `"0"` through `"n-1"` all present.
    ///
    /// # Example
    /// ```
    /// use amta::interpreter::value::{core::Value, object::Object};
    ///
    /// let object = Object::new();
    /// object.set("0", Value::Str("a".into()));
    /// object.set("1", Value::Str("b".into()));
    /// object.set("length", Value::Number(2.0));
    ///
    /// assert_eq!(object.array_length(), Some(2));
    ///
    /// object.set("extra", Value::Number(1.0));
    /// assert_eq!(object.array_length(), None);
    /// ```
    #[must_use]
    pub fn array_length(&self) -> Option<u64> {
        let entries = self.entries.borrow();

        let Some(Value::Number(n)) = entries.get("length") else {
            return None;
        };

        if !(*n >= 0.0) || n.fract() != 0.0 || *n > MAX_SAFE_LENGTH {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let length = *n as u64;

        if entries.len() as u64 != length + 1 {
            return None;
        }

        for index in 0..length {
            if !entries.contains_key(&index.to_string()) {
                return None;
            }
        }

        Some(length)
    }

    /// Returns the entries ordered for dumping: integer-like keys first in
    /// numeric order, then the remaining keys lexicographically.
    fn ordered_entries(&self) -> Vec<(String, Value)> {
        let entries = self.entries.borrow();

        let mut numeric: Vec<(u64, &String)> = Vec::new();
        let mut textual: Vec<&String> = Vec::new();

        for key in entries.keys() {
            match key.parse::<u64>() {
                Ok(n) if n.to_string() == *key => numeric.push((n, key)),
                _ => textual.push(key),
            }
        }

        numeric.sort_unstable_by_key(|(n, _)| *n);
        textual.sort_unstable();

        numeric.into_iter()
               .map(|(_, key)| key)
               .chain(textual)
               .map(|key| (key.clone(), entries[key].clone()))
               .collect()
    }
}

impl PartialEq for Object {
    /// Two objects are equal iff they have identical key sets and all
    /// per-key values compare equal. Cyclic object graphs are not detected
    /// and may recurse without terminating.
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.entries, &other.entries) {
            return true;
        }

        let left = self.entries.borrow();
        let right = other.entries.borrow();

        if left.len() != right.len() {
            return false;
        }

        left.iter()
            .all(|(key, value)| right.get(key).is_some_and(|v| v == value))
    }
}

impl std::fmt::Display for Object {
    /// Dumps the object as a brace-delimited block with one `key: value`
    /// entry per line. Cyclic object graphs are not detected.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        writeln!(f, "{{")?;
        for (key, value) in self.ordered_entries() {
            writeln!(f, "  {key}: {value}")?;
        }
        write!(f, "}}")
    }
}
