/// Parsing errors.
///
/// Defines all error types that can occur during cleaning, lexing and parsing
/// of source code. Parse errors include unknown characters, malformed string
/// literals, unexpected tokens, and unclosed block constructs.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include type mismatches, wrong argument counts, and exceeded loop
/// budgets.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
