//! # amta
//!
//! amta is an interpreter for a small, dynamically-typed scripting language.
//! Source text is cleaned, tokenized, parsed into an abstract syntax tree,
//! and evaluated by a tree walk to produce output and an exit value.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, rc::Rc};

use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{
        cleaner,
        evaluator::core::{Flow, exec_statement},
        lexer::{LexError, LexerExtras, Token},
        parser::statement::parse_program,
        scope::Scope,
        stdlib::{self, core::OutputSink},
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Defines left-values (variable references with index chains) supporting
///   both resolve and assign.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during cleaning,
/// lexing, parsing, or evaluating code. It standardizes error reporting and
/// carries detailed information about failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together cleaning, lexing, parsing, evaluation, value
/// representations, scoping, and the standard library to provide a complete
/// runtime for source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: cleaner, lexer, parser, evaluator.
/// - Provides the shared value, scope and host-callable infrastructure.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Runs a program and returns its exit value, printing to stdout.
///
/// The source is cleaned, tokenized, and parsed; the standard library is
/// registered into a fresh global scope; then the top-level statements run
/// until they end or a top-level `return` executes. A program without a
/// top-level `return` exits with nil.
///
/// # Parameters
/// - `source`: Raw program text.
/// - `max_while_loops`: The `while` iteration budget; `None` disables it.
///
/// # Errors
/// Returns an error if cleaning, lexing, parsing or evaluation fails.
pub fn run_program(source: &str,
                   max_while_loops: Option<u64>)
                   -> Result<Value, Box<dyn std::error::Error>> {
    let sink: OutputSink = Rc::new(RefCell::new(std::io::stdout()));
    run(source, max_while_loops, &sink)
}

/// Runs a program and returns its exit value together with everything it
/// printed.
///
/// Behaves exactly like [`run_program`], but collects the program's output
/// into a `String` instead of writing to stdout. This is the entry point
/// used by the test suite and by embedders.
///
/// # Parameters
/// - `source`: Raw program text.
/// - `max_while_loops`: The `while` iteration budget; `None` disables it.
///
/// # Errors
/// Returns an error if cleaning, lexing, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use amta::run_capture;
///
/// let (value, output) = run_capture("$:print(\"hi\")\nreturn 41 + 1", None).unwrap();
/// assert_eq!(output, "hi");
/// assert_eq!(value.to_string(), "42");
///
/// // An undefined name reads as nil; printing it never fails.
/// let (_, output) = run_capture("$:print($missing)", None).unwrap();
/// assert_eq!(output, "<nil>");
/// ```
pub fn run_capture(source: &str,
                   max_while_loops: Option<u64>)
                   -> Result<(Value, String), Box<dyn std::error::Error>> {
    let buffer: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let sink: OutputSink = buffer.clone();

    let value = run(source, max_while_loops, &sink)?;
    let output = String::from_utf8_lossy(&buffer.borrow()).into_owned();

    Ok((value, output))
}

/// Runs a program against the given output sink.
fn run(source: &str,
       max_while_loops: Option<u64>,
       out: &OutputSink)
       -> Result<Value, Box<dyn std::error::Error>> {
    let tokens = lex(source)?;

    let mut iter = tokens.iter().peekable();
    let program = parse_program(&mut iter)?;

    let global = Scope::global(max_while_loops);
    stdlib::core::register(&global, out);

    let mut result = Value::Nil;
    for statement in &program {
        match exec_statement(statement, &global)? {
            Flow::Returned(value) => {
                result = value;
                break;
            },
            Flow::Normal => {},
        }
    }

    Ok(result)
}

/// Cleans and tokenizes source text.
///
/// Adjacent newline tokens are collapsed to one, and leading newlines are
/// dropped. Lexer errors are paired with the line they occurred on.
///
/// # Errors
/// Returns a [`ParseError`] describing the first span of input no lexer
/// rule accepts.
///
/// # Examples
/// ```
/// use amta::{interpreter::lexer::Token, lex};
///
/// let tokens = lex("$x = 1").unwrap();
/// assert_eq!(tokens[0].0, Token::Variable("$x".to_string()));
/// assert_eq!(tokens[1].0, Token::Assign);
/// assert_eq!(tokens[2].0, Token::Number(1.0));
/// ```
pub fn lex(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let cleaned = cleaner::clean(source);

    let mut lexer = Token::lexer_with_extras(&cleaned, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::NewLine) => {
                if !matches!(tokens.last(), None | Some((Token::NewLine, _))) {
                    tokens.push((Token::NewLine, lexer.extras.line));
                }
            },
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(e) => return Err(lex_error(e, lexer.slice(), lexer.extras.line)),
        }
    }

    Ok(tokens)
}

/// Pairs a lexer error with its line and offending text.
fn lex_error(error: LexError, slice: &str, line: usize) -> ParseError {
    match error {
        LexError::UnknownCharacter => ParseError::UnknownCharacter { found: slice.to_string(),
                                                                     line },
        LexError::UnterminatedString => ParseError::UnterminatedString { line },
        LexError::InvalidEscape(sequence) => ParseError::InvalidEscape { sequence, line },
        LexError::UnknownWord(word) => ParseError::UnknownWord { word, line },
    }
}
