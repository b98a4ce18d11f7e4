/// Core runtime value representation.
///
/// Defines the `Value` enum covering the five value kinds of the language,
/// together with truthiness, equality, kind classification, and
/// stringification.
pub mod core;
/// Object value representation.
///
/// Defines the `Object` handle, a mutable string-keyed mapping shared by
/// reference. Includes the array-convention predicate used by `for` loops and
/// `isarray`.
pub mod object;
/// Function value representation.
///
/// Defines the `FunctionValue` type covering user-defined functions
/// (parameters plus body) and host-provided functions (signatures plus an
/// opaque action).
pub mod function;
