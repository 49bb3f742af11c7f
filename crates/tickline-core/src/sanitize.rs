//! Escaping of free text captured from the source before it is stored in the model.
//!
//! Everything the dispatcher captures (titles, lifeline names, state labels, span and arrow
//! labels) ends up inside SVG markup, so the reserved characters are replaced by entities once,
//! here, and the rest of the pipeline treats model strings as already-safe markup text.

/// Escapes `&`, `"`, `'`, `<` and `>`.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '>' => out.push_str("&gt;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Resolves backslash escapes inside a quoted field (`\"` -> `"`, `\\` -> `\`).
///
/// A backslash followed by any other character keeps that character; a trailing lone backslash
/// is kept as-is.
pub fn unescape_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next) => out.push(next),
            None => out.push('\\'),
        }
    }
    out
}

/// Unescapes a captured quoted field and sanitizes the result.
pub fn sanitize_field(raw: &str) -> String {
    sanitize_text(&unescape_quoted(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_reserved_characters() {
        assert_eq!(
            sanitize_text(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &apos;f&apos;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(sanitize_text("Idle state 42"), "Idle state 42");
    }

    #[test]
    fn escaped_quotes_are_resolved_before_sanitizing() {
        assert_eq!(sanitize_field(r#"say \"hi\""#), "say &quot;hi&quot;");
        assert_eq!(sanitize_field(r"back\\slash"), r"back\slash");
    }

    #[test]
    fn trailing_backslash_is_kept() {
        assert_eq!(unescape_quoted(r"oops\"), r"oops\");
    }
}
