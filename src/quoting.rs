//! Identifier and literal quoting.
//!
//! Every string that ends up inside a statement and could come from a caller (names,
//! comments, tag values, LIKE patterns, system-function arguments) goes through the
//! functions here. There are no trusted call sites.

/// Render a string literal: wrapped in single quotes, `\` doubled, `'` doubled.
///
/// ```rust
/// use warehouse_client::quoting::quote_literal;
///
/// assert_eq!(quote_literal("it's"), "'it''s'");
/// assert_eq!(quote_literal(r"C:\tmp"), r"'C:\\tmp'");
/// ```
#[must_use]
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Render a single identifier part: wrapped in double quotes, `"` doubled.
///
/// Quoted identifiers keep their case on the service side.
/// ```rust
/// use warehouse_client::quoting::quote_identifier;
///
/// assert_eq!(quote_identifier("my_wh"), "\"my_wh\"");
/// assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
/// ```
#[must_use]
pub fn quote_identifier(part: &str) -> String {
    format!("\"{}\"", part.replace('"', "\"\""))
}

/// Escape `\`, `_` and `%` so a name matches itself literally as a `LIKE` pattern.
///
/// The result still goes through [`quote_literal`] when rendered.
/// ```rust
/// use warehouse_client::quoting::escape_like;
///
/// assert_eq!(escape_like("WH_1%"), r"WH\_1\%");
/// assert_eq!(escape_like(r"a\b"), r"a\\b");
/// ```
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '_' | '%') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Undo [`quote_identifier`] when the input is wrapped in double quotes.
/// Returns `None` for input that is not a complete quoted identifier.
pub(crate) fn unquote_identifier(part: &str) -> Option<String> {
    let inner = part.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            // a lone quote inside means the input was not a single identifier
            if chars.next_if_eq(&'"').is_none() {
                return None;
            }
        }
        out.push(ch);
    }
    Some(out)
}
