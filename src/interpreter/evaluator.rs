/// Core evaluation logic.
///
/// Contains the expression dispatcher, statement execution with its explicit
/// control-flow outcome, and left-value resolve/assign.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations: arithmetic,
/// concatenation, and comparisons.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the prefix operators: string-to-number conversion, arithmetic
/// negation, and logical NOT.
pub mod unary;

/// Function call evaluation.
///
/// Handles callee resolution, arity and kind checking, argument binding, and
/// the execution of user-defined bodies and host actions.
pub mod call;

/// Loop statement evaluation.
///
/// Executes `while` loops under the iteration budget and `for` loops over
/// array-convention objects.
pub mod loops;
