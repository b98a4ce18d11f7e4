/// Expression parsing.
///
/// Implements the operator-precedence levels of the expression grammar, from
/// the loosest level down to unary operators and primaries.
pub mod core;

/// Statement and block parsing.
///
/// Splits the token stream into statements at newline tokens, dispatches on
/// the leading token, and reassembles block constructs by matching their
/// closing keywords (`fi`, `ewhil`, `rfo`, `nfu`).
pub mod statement;

/// Variable, argument and parameter parsing.
///
/// Turns `$`-tokens into left-values: sigil handling, expansion of internal
/// `:` segments into static index steps, and `[expr]` index steps. Also
/// parses the `(`-delimited lists attached to them: call arguments and
/// function parameter declarations.
pub mod variable;
