//! Line-level cleanup and macro expansion that runs before grammar matching.

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// A preprocessed line together with its 1-based position in the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct PreprocessResult {
    pub lines: Vec<SourceLine>,
    /// Macro name -> expansion, in definition order.
    pub macros: IndexMap<String, String>,
}

fn macro_definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^macro\s+([^\s:]+)(?:\s+(.*))?$").expect("valid regex"))
}

fn macro_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\s:]+").expect("valid regex"))
}

/// Drops comments and blank lines, collects every `macro NAME expansion` definition, then
/// expands macro tokens on the remaining lines.
///
/// Definitions are collected over the whole input before any substitution, so a macro may be
/// used above its definition. Expansion is a single pass: text produced by an expansion is not
/// scanned again.
pub fn preprocess(input: &str) -> PreprocessResult {
    let mut macros: IndexMap<String, String> = IndexMap::new();
    let mut pending: Vec<SourceLine> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        if raw.trim_start().starts_with('#') {
            continue;
        }
        let text = strip_trailing_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        if let Some(caps) = macro_definition_regex().captures(text) {
            let name = caps[1].to_string();
            let expansion = caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            if macros.contains_key(&name) {
                tracing::warn!(line = number, name = %name, "macro redefined; the later definition wins");
            }
            macros.insert(name, expansion);
            continue;
        }

        pending.push(SourceLine {
            number,
            text: text.to_string(),
        });
    }

    let mut lines = Vec::with_capacity(pending.len());
    for line in pending {
        let expanded = expand_macros(&line.text, &macros);
        let expanded = expanded.trim();
        if expanded.is_empty() {
            continue;
        }
        lines.push(SourceLine {
            number: line.number,
            text: expanded.to_string(),
        });
    }

    tracing::debug!(
        lines = lines.len(),
        macros = macros.len(),
        "preprocessed diagram source"
    );
    PreprocessResult { lines, macros }
}

/// Replaces every token delimited by whitespace, `:` or the line ends that names a macro.
pub fn expand_macros(line: &str, macros: &IndexMap<String, String>) -> String {
    if macros.is_empty() {
        return line.to_string();
    }
    macro_token_regex()
        .replace_all(line, |caps: &Captures| {
            let token = &caps[0];
            macros
                .get(token)
                .cloned()
                .unwrap_or_else(|| token.to_string())
        })
        .into_owned()
}

/// Cuts a `# comment` suffix. The `#` must sit outside a quoted field and be at the start of the
/// line or preceded by whitespace.
pub fn strip_trailing_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut prev_is_space = true;
    for (idx, ch) in line.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == '#' && prev_is_space {
            return &line[..idx];
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}
