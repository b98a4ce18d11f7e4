/// Normalizes raw source text into a sequence of non-empty logical lines.
///
/// Cleaning happens before lexing and performs, in order:
/// 1. Line-ending normalization: `\r\n` and `\r` become `\n`.
/// 2. Continuation joining: a backslash immediately followed by a newline is
///    deleted, merging the next physical line into the current one.
/// 3. Full-line comment removal: lines whose first non-whitespace character
///    is `#` are dropped.
/// 4. In-line comment removal: on any remaining line, if the last `#` occurs
///    after the last `"`, the line is truncated at that `#`.
/// 5. Blank-line removal: empty or whitespace-only lines are dropped.
///
/// The surviving lines are joined with `\n`, without a trailing newline.
///
/// # Parameters
/// - `source`: Raw source text.
///
/// # Returns
/// The cleaned source, ready for the lexer.
///
/// # Example
/// ```
/// use amta::interpreter::cleaner::clean;
///
/// let source = "# banner\r\n$x = 1 \\\n      + 2  # sum\r\n\r\n$y = \"#\"\n";
/// assert_eq!(clean(source), "$x = 1       + 2  \n$y = \"#\"");
/// ```
#[must_use]
pub fn clean(source: &str) -> String {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    let joined = normalized.replace("\\\n", "");

    let mut lines = Vec::new();

    for line in joined.split('\n') {
        if line.trim_start().starts_with('#') {
            continue;
        }

        let line = strip_inline_comment(line);

        if line.trim().is_empty() {
            continue;
        }

        lines.push(line);
    }

    lines.join("\n")
}

/// Truncates a line at its last `#` when that `#` cannot be inside a string
/// literal, i.e. when it occurs after the last `"` of the line.
///
/// Lines without a qualifying `#` are returned unchanged.
fn strip_inline_comment(line: &str) -> &str {
    let Some(hash) = line.rfind('#') else {
        return line;
    };

    match line.rfind('"') {
        Some(quote) if hash < quote => line,
        _ => &line[..hash],
    }
}
