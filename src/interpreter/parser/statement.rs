use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            variable::{parse_call_arguments, parse_param_list, parse_var_ref},
        },
    },
};

/// Parses a whole program: statements separated by newlines, until the token
/// stream is exhausted.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// The program's top-level statements.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        while let Some((Token::NewLine, _)) = tokens.peek() {
            tokens.next();
        }
        if tokens.peek().is_none() {
            break;
        }

        statements.push(parse_statement(tokens)?);
        expect_newline(tokens)?;
    }

    Ok(statements)
}

/// Consumes a single newline token.
///
/// Block constructs require a newline after their header (`if expr`,
/// `while expr`, `for var expr`, `fun(...)`), and statements end at one.
/// The end of input also counts, so a file may end mid-construct and fail
/// later with a more precise missing-keyword error.
fn expect_newline<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::NewLine, _)) => {
            tokens.next();
            Ok(())
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected end of line, found '{tok}'"),
                                              line:  *line, })
        },
        None => Ok(()),
    }
}

/// Parses a single statement, dispatching on the leading token.
///
/// A statement may be one of:
/// - an `if` statement (with optional `el` block, closed by `fi`),
/// - a `while` loop (closed by `ewhil`),
/// - a `for` loop (closed by `rfo`),
/// - a `return` statement,
/// - an assignment (`$var = expr`),
/// - a call used as a statement (`$var(...)`).
///
/// `continue` is reserved and has no statement form.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, _)) => parse_if(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::For, _)) => parse_for(tokens),
        Some((Token::Return, _)) => parse_return(tokens),
        Some((Token::Variable(_), _)) => parse_assignment_or_call(tokens),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("'{tok}'"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the statements of a block until one of `closers` appears at this
/// nesting depth, consuming the closer.
///
/// Nested block constructs are consumed whole by the recursive statement
/// parser, so a closer seen here always belongs to the block being parsed.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the block header's newline.
/// - `closers`: The keyword tokens that may end this block.
/// - `keyword`: The expected closing keyword, for error reporting.
/// - `opened`: The opening keyword, for error reporting.
/// - `open_line`: The line of the opening keyword.
///
/// # Returns
/// The block's statements and the closing token that ended it.
fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                      closers: &[Token],
                      keyword: &'static str,
                      opened: &'static str,
                      open_line: usize)
                      -> ParseResult<(Vec<Statement>, Token)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        while let Some((Token::NewLine, _)) = tokens.peek() {
            tokens.next();
        }

        match tokens.peek() {
            None => {
                return Err(ParseError::MissingKeyword { keyword,
                                                        opened,
                                                        line: open_line });
            },
            Some((tok, _)) if closers.contains(tok) => {
                let closer = tok.clone();
                tokens.next();
                return Ok((statements, closer));
            },
            _ => {
                statements.push(parse_statement(tokens)?);
                match tokens.peek() {
                    Some((Token::NewLine, _)) => {
                        tokens.next();
                    },
                    Some((tok, _)) if closers.contains(tok) => {},
                    Some((tok, line)) => {
                        return Err(ParseError::UnexpectedToken { token: format!("expected end of line, found '{tok}'"),
                                                                 line:  *line, });
                    },
                    None => {},
                }
            },
        }
    }
}

/// Parses an `if` statement.
///
/// Syntax:
/// ```text
///     if <condition>
///         <statements>
///     el
///         <statements>
///     fi
/// ```
/// The `el` block is optional. The matching `el`/`fi` is found at the same
/// nesting depth as the opening `if`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// A [`Statement::If`] node.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().expect("peeked 'if'");

    let condition = parse_expression(tokens)?;
    expect_newline(tokens)?;

    let (then_block, closer) =
        parse_block(tokens, &[Token::El, Token::Fi], "fi", "if", line)?;

    let else_block = if closer == Token::El {
        let (block, _) = parse_block(tokens, &[Token::Fi], "fi", "if", line)?;
        Some(block)
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_block,
                       else_block,
                       line })
}

/// Parses a `while` loop.
///
/// Syntax:
/// ```text
///     while <condition>
///         <statements>
///     ewhil
/// ```
/// # Parameters
/// - `tokens`: Token stream positioned at the `while` keyword.
///
/// # Returns
/// A [`Statement::While`] node.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().expect("peeked 'while'");

    let condition = parse_expression(tokens)?;
    expect_newline(tokens)?;

    let (body, _) = parse_block(tokens, &[Token::Ewhil], "ewhil", "while", line)?;

    Ok(Statement::While { condition,
                          body,
                          line })
}

/// Parses a `for` loop.
///
/// Syntax:
/// ```text
///     for <variable> <iterable>
///         <statements>
///     rfo
/// ```
/// The iterable must evaluate to an array-convention object at run time; the
/// variable is the left-value assigned on each iteration.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `for` keyword.
///
/// # Returns
/// A [`Statement::ForIn`] node.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().expect("peeked 'for'");

    let target = parse_var_ref(tokens)?;
    let iterable = parse_expression(tokens)?;
    expect_newline(tokens)?;

    let (body, _) = parse_block(tokens, &[Token::Rfo], "rfo", "for", line)?;

    Ok(Statement::ForIn { target,
                          iterable,
                          body,
                          line })
}

/// Parses a `return` statement.
///
/// A bare `return` (followed by a newline, a block closer, or the end of
/// input) returns nil; otherwise the returned expression follows on the same
/// line.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `return` keyword.
///
/// # Returns
/// A [`Statement::Return`] node.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().expect("peeked 'return'");

    let value = match tokens.peek() {
        None
        | Some((Token::NewLine
                | Token::El
                | Token::Fi
                | Token::Ewhil
                | Token::Rfo
                | Token::Nfu,
                _)) => None,
        _ => Some(parse_expression(tokens)?),
    };

    Ok(Statement::Return { value, line })
}

/// Parses a statement that begins with a variable: either an assignment or a
/// call used as a statement.
///
/// The token after the left-value decides: `=` starts an assignment, `(`
/// starts a call. Anything else is a parse error, since only calls may stand
/// alone as expression statements.
///
/// # Parameters
/// - `tokens`: Token stream positioned at a variable token.
///
/// # Returns
/// A [`Statement::Assignment`] or a [`Statement::Expression`] wrapping a
/// call.
fn parse_assignment_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let target = parse_var_ref(tokens)?;

    match tokens.peek() {
        Some((Token::Assign, line)) => {
            let line = *line;
            tokens.next();

            if matches!(tokens.peek(), None | Some((Token::NewLine, _))) {
                return Err(ParseError::ExpectedRightHandSide { line });
            }

            let value = parse_expression(tokens)?;
            Ok(Statement::Assignment { target,
                                       value,
                                       line })
        },
        Some((Token::LParen, _)) => {
            tokens.next();
            let arguments = parse_call_arguments(tokens)?;
            let line = target.line;

            Ok(Statement::Expression { expr: Expr::Call { callee: target,
                                                          arguments,
                                                          line },
                                       line })
        },
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected '=' or '(', found '{tok}'"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: target.line }),
    }
}

/// Parses a function literal.
///
/// Syntax:
/// ```text
///     fun($a, $b number, ...)
///         <statements>
///     nfu
/// ```
/// Parameters are `$name` optionally followed by a type name; an omitted
/// type name means the parameter accepts any kind. The body runs until the
/// matching `nfu`.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `fun` keyword.
///
/// # Returns
/// An [`Expr::Function`] node producing a function value when evaluated.
pub fn parse_function_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().expect("peeked 'fun'");

    match tokens.next() {
        Some((Token::LParen, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("expected '(' after 'fun', found '{tok}'"),
                                                     line:  *l, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let params = parse_param_list(tokens)?;
    expect_newline(tokens)?;

    let (body, _) = parse_block(tokens, &[Token::Nfu], "nfu", "fun", line)?;

    Ok(Expr::Function { params,
                        body: body.into(),
                        line })
}
