use logos::Logos;

use crate::interpreter::value::core::ValueKind;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", lex_number)]
    #[regex(r"\.[0-9]+", lex_number)]
    Number(f64),
    /// String literal tokens delimited by `"`, with escapes decoded.
    /// Strings do not span lines; a `"` still open at the end of its line is
    /// an unterminated-string error.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, lex_string)]
    #[regex(r#""([^"\\\n]|\\[^\n])*"#, unterminated_string, priority = 1)]
    Str(String),
    /// Variable tokens. The leading `$` is part of the token value, e.g.
    /// `$x`, `$!local`, `$:global`, `$obj:key`.
    #[regex(r"\$[a-zA-Z0-9_:!]*", |lex| lex.slice().to_string())]
    Variable(String),
    /// `fun`
    #[token("fun")]
    Fun,
    /// `nfu`
    #[token("nfu")]
    Nfu,
    /// `if`
    #[token("if")]
    If,
    /// `el`
    #[token("el")]
    El,
    /// `fi`
    #[token("fi")]
    Fi,
    /// `while`
    #[token("while")]
    While,
    /// `ewhil`
    #[token("ewhil")]
    Ewhil,
    /// `for`
    #[token("for")]
    For,
    /// `rfo`
    #[token("rfo")]
    Rfo,
    /// `return`
    #[token("return")]
    Return,
    /// `continue` (reserved; no statement form)
    #[token("continue")]
    Continue,
    /// Type-name tokens: `number`, `string`, `object`, `function`, `nil`.
    #[token("number", |_| ValueKind::Number)]
    #[token("string", |_| ValueKind::Str)]
    #[token("object", |_| ValueKind::Object)]
    #[token("function", |_| ValueKind::Function)]
    #[token("nil", |_| ValueKind::Nil)]
    Type(ValueKind),
    /// Any other bare word. Always a lex error; keywords and type names must
    /// appear as whole words, and the language has no bare identifiers.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", unknown_word, priority = 1)]
    Word,
    /// `{}`
    #[token("{}")]
    EmptyObject,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Assign,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,

    /// Statement separator.
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    NewLine,
    /// Spaces and tabs between tokens.
    #[regex(r"[ \t\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Errors produced while classifying a span of input.
///
/// These carry no line information; the lexing loop in [`crate::run_capture`]
/// pairs them with the current line and converts them into
/// [`crate::error::ParseError`] values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No rule classified the input span.
    #[default]
    UnknownCharacter,
    /// A string literal was opened but never closed.
    UnterminatedString,
    /// A string literal contained an unrecognized escape sequence.
    InvalidEscape(String),
    /// A bare word that is neither a keyword nor a type name.
    UnknownWord(String),
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed numeric value if successful.
/// - `None`: If the token slice is not a valid number.
fn lex_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Decodes a complete string literal, resolving escape sequences.
///
/// Recognized escapes: `\\`, `\"`, `\n`, and `\xHH` (two hex digits, one
/// byte). Anything else after a backslash is an [`LexError::InvalidEscape`].
fn lex_string(lex: &logos::Lexer<Token>) -> Result<String, LexError> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }

        match chars.next() {
            Some('\\') => decoded.push('\\'),
            Some('"') => decoded.push('"'),
            Some('n') => decoded.push('\n'),
            Some('x') => {
                let high = chars.next();
                let low = chars.next();
                let byte = match (high, low) {
                    (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit() => {
                        let mut hex = String::with_capacity(2);
                        hex.push(h);
                        hex.push(l);
                        u8::from_str_radix(&hex, 16).ok()
                    },
                    _ => None,
                };

                match byte {
                    Some(b) => decoded.push(char::from(b)),
                    None => {
                        let mut sequence = String::from("\\x");
                        sequence.extend(high);
                        sequence.extend(low);
                        return Err(LexError::InvalidEscape(sequence));
                    },
                }
            },
            Some(other) => {
                return Err(LexError::InvalidEscape(format!("\\{other}")));
            },
            None => return Err(LexError::UnterminatedString),
        }
    }

    Ok(decoded)
}

/// Rule for a `"` that opens a string which never closes.
fn unterminated_string(_: &logos::Lexer<Token>) -> Result<String, LexError> {
    Err(LexError::UnterminatedString)
}

/// Rule for bare words that match no keyword or type name.
fn unknown_word(lex: &logos::Lexer<Token>) -> Result<(), LexError> {
    Err(LexError::UnknownWord(lex.slice().to_string()))
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '\\' => write!(f, "\\\\")?,
                        '"' => write!(f, "\\\"")?,
                        '\n' => write!(f, "\\n")?,
                        c if (c as u32) < 0x20 || ((c as u32) >= 0x7f && (c as u32) <= 0xff) => {
                            write!(f, "\\x{:02x}", c as u32)?;
                        },
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            },
            Self::Variable(name) => write!(f, "{name}"),
            Self::Fun => write!(f, "fun"),
            Self::Nfu => write!(f, "nfu"),
            Self::If => write!(f, "if"),
            Self::El => write!(f, "el"),
            Self::Fi => write!(f, "fi"),
            Self::While => write!(f, "while"),
            Self::Ewhil => write!(f, "ewhil"),
            Self::For => write!(f, "for"),
            Self::Rfo => write!(f, "rfo"),
            Self::Return => write!(f, "return"),
            Self::Continue => write!(f, "continue"),
            Self::Type(kind) => write!(f, "{kind}"),
            Self::Word => write!(f, "<word>"),
            Self::EmptyObject => write!(f, "{{}}"),
            Self::LessEqual => write!(f, "<="),
            Self::GreaterEqual => write!(f, ">="),
            Self::EqualEqual => write!(f, "=="),
            Self::BangEqual => write!(f, "!="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Bang => write!(f, "!"),
            Self::Assign => write!(f, "="),
            Self::Comma => write!(f, ","),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::NewLine | Self::Ignored => writeln!(f),
        }
    }
}
