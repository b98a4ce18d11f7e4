/// The cleaner module normalizes raw source text before lexing.
///
/// Cleaning normalizes line endings, joins backslash line continuations,
/// strips comments, and drops blank lines, producing the logical lines the
/// lexer consumes.
///
/// # Responsibilities
/// - Normalizes `\r\n` and `\r` line endings to `\n`.
/// - Joins continuations and removes full-line and in-line comments.
/// - Emits non-empty logical lines joined by `\n`.
pub mod cleaner;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the cleaned source text and produces a stream
/// of tokens, each corresponding to meaningful language elements such as
/// numbers, strings, variables, keywords, and operators. This is the first
/// classifying stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into typed tokens.
/// - Decodes string escapes and tracks line numbers for diagnostics.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of statements
/// and expressions, splitting statements at newlines and matching block
/// keywords.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and syntax, reporting errors with location info.
/// - Expands variable tokens into sigiled left-values with index chains.
pub mod parser;
/// The scope module implements the variable environment.
///
/// Scopes form a chain from the innermost block out to the global scope,
/// and resolution is directed by the sigil prefix of the name being read or
/// written.
///
/// # Responsibilities
/// - Owns the name-to-value bindings of one nesting level.
/// - Resolves reads and writes through the sigil rules.
/// - Carries the `while` iteration budget inherited from the global scope.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value kinds used during execution: numbers,
/// strings, objects, functions and nil. It also provides equality,
/// truthiness, stringification, and the array-convention predicate.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements equality, truthiness and display for every kind.
/// - Provides the shared object and function representations.
pub mod value;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs operator semantics, manages the scope chain, and carries
/// `return` outward as an explicit control-flow outcome. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as kind mismatches or exceeded budgets.
pub mod evaluator;
/// The standard library of host-provided functions.
///
/// Registers `print`, `pow`, `range`, `typeof`, `ascii` and `isarray` into
/// the global scope before evaluation starts, each following the host
/// callable contract.
///
/// # Responsibilities
/// - Declares each builtin's signatures and native action.
/// - Routes `print` output through a configurable sink.
pub mod stdlib;
