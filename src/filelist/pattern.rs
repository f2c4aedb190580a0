//! Shell-style glob translation.
//!
//! Manifest templates use Unix shell globs where `*` and `?` never match a
//! path separator. Globs are translated into [`Regex`]es so the file list
//! can apply them against `/`-separated relative paths.

use regex::Regex;

use crate::error::{Result, SrcpackError};

/// Translate a shell glob into an unanchored regex body.
///
/// The returned body matches the whole glob and ends with `\z`; `*` becomes
/// `[^/]*`, `?` becomes `[^/]` and bracket classes are kept. An unterminated
/// `[` is treated as a literal.
pub fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str("[^/]*");
            }
            '?' => out.push_str("[^/]"),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push_str(&translate_class(&chars[i..end]));
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            _ => out.push_str(&regex::escape(&c.to_string())),
        }
    }

    out.push_str(r"\z");
    out
}

/// Index of the `]` closing a class that starts at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn translate_class(body: &[char]) -> String {
    let mut out = String::from("[");
    let mut rest = body;

    if let Some(('!', tail)) = rest.split_first() {
        out.push('^');
        rest = tail;
    }

    let mut prev = None;
    for (idx, &c) in rest.iter().enumerate() {
        match c {
            '-' if idx > 0 && idx + 1 < rest.len() && prev != Some('-') => out.push('-'),
            '\\' | '[' | ']' | '&' | '~' | '^' | '-' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        prev = Some(c);
    }

    out.push(']');
    out
}

/// Translate a template pattern into a compiled regex.
///
/// - `anchor`: the pattern must match from the start of the path.
/// - `prefix`: the pattern must match somewhere below this directory glob;
///   with `pattern == None` everything below the prefix matches.
pub fn translate_pattern(pattern: Option<&str>, anchor: bool, prefix: Option<&str>) -> Result<Regex> {
    let body = pattern.map(glob_to_regex).unwrap_or_default();

    let source = match prefix {
        Some(prefix) => {
            let prefix_re = glob_to_regex(prefix);
            let prefix_re = prefix_re.trim_end_matches(r"\z");
            let prefix_re = prefix_re.trim_end_matches('/');
            format!(r"\A{}/.*{}", prefix_re, body)
        }
        None if anchor => format!(r"\A{}", body),
        None => body,
    };

    compile(&source)
}

/// Compile a raw regular expression used as a pattern.
pub fn compile(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| SrcpackError::TemplateError {
        message: format!("invalid pattern '{}': {}", source, e),
    })
}
