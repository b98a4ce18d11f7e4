use std::iter::Peekable;

use crate::{
    ast::{Expr, IndexStep, Param, VarRef},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_expression},
        value::core::ValueKind,
    },
};

/// Parses a variable left-value.
///
/// The next token must be a `$`-variable. Its raw name is split into a base
/// identifier (keeping the `:` or `!` sigil when present) and any internal
/// `:`-separated segments, which become static index steps. Zero or more
/// `[expr]` steps may follow, each extending the left-value by a dynamic
/// index.
///
/// Examples of the expansion:
///
/// ```text
///     $x        base "x",   no steps
///     $!x       base "!x",  no steps
///     $:a:b     base ":a",  static step "b"
///     $o:k[$i]  base "o",   static step "k", dynamic step $i
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at a variable token.
///
/// # Returns
/// The parsed [`VarRef`].
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not a variable, or its name is empty,
/// - an index expression fails to parse,
/// - a `[` is not closed by `]`.
pub fn parse_var_ref<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<VarRef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (raw, line) = match tokens.next() {
        Some((Token::Variable(raw), line)) => (raw.as_str(), *line),
        Some((_, line)) => return Err(ParseError::ExpectedVariable { line: *line }),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let (base, mut steps) = split_segments(&raw[1..], line)?;

    while let Some((Token::LBracket, bracket_line)) = tokens.peek() {
        let bracket_line = *bracket_line;
        tokens.next();

        let index = parse_expression(tokens)?;
        match tokens.next() {
            Some((Token::RBracket, _)) => steps.push(IndexStep::Dynamic(index)),
            _ => {
                return Err(ParseError::MissingKeyword { keyword: "]",
                                                        opened:  "[",
                                                        line:    bracket_line, });
            },
        }
    }

    Ok(VarRef { base, steps, line })
}

/// Parses a variable reference or, when `(` immediately follows, a call.
///
/// Call arguments are comma-separated expressions terminated by the matching
/// `)`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a variable token.
///
/// # Returns
/// An [`Expr::Variable`] or an [`Expr::Call`].
pub fn parse_variable_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = parse_var_ref(tokens)?;

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_call_arguments(tokens)?;
        let line = var.line;

        return Ok(Expr::Call { callee: var,
                               arguments,
                               line });
    }

    Ok(Expr::Variable { var })
}

/// Parses the argument list of a call, consuming through the closing `)`.
///
/// Arguments are full expressions separated by commas; commas nested inside
/// a further `(`...`)` belong to the inner call and are consumed by the
/// recursive expression parser. An empty argument list is allowed.
///
/// Grammar: `arguments := (expression ("," expression)*)? ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening `(`.
///
/// # Returns
/// The argument expressions, in call order.
pub fn parse_call_arguments<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut arguments = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_expression(tokens)?);

        match tokens.next() {
            Some((Token::RParen, _)) => return Ok(arguments),
            Some((Token::Comma, _)) => {},
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("expected ',' or ')' after argument, found '{tok}'"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
}

/// Parses a function parameter list, consuming through the closing `)`.
///
/// A parameter is a `$name` optionally followed by a type name; an omitted
/// type name means the parameter accepts any kind.
///
/// Grammar: `params := ("$name" type-name? ("," "$name" type-name?)*)? ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening `(`.
///
/// # Returns
/// The declared parameters.
pub fn parse_param_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Param>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(params);
    }

    loop {
        params.push(parse_param(tokens)?);

        match tokens.next() {
            Some((Token::RParen, _)) => return Ok(params),
            Some((Token::Comma, _)) => {},
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("expected ',' or ')' after parameter, found '{tok}'"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
}

/// Parses a single parameter declaration.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = match tokens.next() {
        Some((Token::Variable(raw), line)) => {
            let name = &raw[1..];
            if name.is_empty() || name == ":" || name == "!" {
                return Err(ParseError::ExpectedVariable { line: *line });
            }
            name.to_string()
        },
        Some((_, line)) => return Err(ParseError::ExpectedVariable { line: *line }),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let kind = if let Some((Token::Type(kind), _)) = tokens.peek() {
        let kind = *kind;
        tokens.next();
        kind
    } else {
        ValueKind::Any
    };

    Ok(Param { name, kind })
}

/// Splits a raw variable name (sigil included, `$` stripped) into its base
/// identifier and the static index steps spelled with internal `:`.
fn split_segments(name: &str, line: usize) -> ParseResult<(String, Vec<IndexStep>)> {
    let (sigil, rest) = match name.chars().next() {
        Some(':') => (":", &name[1..]),
        Some('!') => ("!", &name[1..]),
        _ => ("", name),
    };

    let mut segments = rest.split(':');
    let first = segments.next().unwrap_or("");

    if first.is_empty() {
        return Err(ParseError::ExpectedVariable { line });
    }

    let base = format!("{sigil}{first}");
    let steps = segments.map(|segment| IndexStep::Static(segment.to_string()))
                        .collect();

    Ok((base, steps))
}
