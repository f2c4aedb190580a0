//! Manifest template directives.
//!
//! A template (`MANIFEST.in`) holds one directive per line:
//!
//! | directive | arguments |
//! |-----------|-----------|
//! | `include`, `exclude` | `pattern...`, anchored at the project root |
//! | `global-include`, `global-exclude` | `pattern...`, matched anywhere |
//! | `recursive-include`, `recursive-exclude` | `dir pattern...` |
//! | `graft`, `prune` | `dir` |
//!
//! `#` starts a comment, a trailing `\` joins the next line. A line that
//! cannot be parsed is reported once as a warning and skipped; it never
//! aborts template processing.

use std::fs;
use std::path::Path;

use crate::diagnostics::{Diagnostics, Source};
use crate::error::{Result, SrcpackError};

use super::pattern::translate_pattern;
use super::FileList;

/// A parsed template directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateAction {
    Include(Vec<String>),
    Exclude(Vec<String>),
    GlobalInclude(Vec<String>),
    GlobalExclude(Vec<String>),
    RecursiveInclude { dir: String, patterns: Vec<String> },
    RecursiveExclude { dir: String, patterns: Vec<String> },
    Graft(String),
    Prune(String),
}

impl TemplateAction {
    /// Parse one logical template line.
    ///
    /// `strict_paths` rejects patterns with a leading or trailing `/`, which
    /// cannot be converted to native paths on Windows.
    pub fn parse(line: &str, strict_paths: bool) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (action, args) = match words.split_first() {
            Some((action, args)) => (*action, args),
            None => return Err(template_error("empty directive")),
        };

        let owned = |items: &[&str]| -> Result<Vec<String>> {
            items
                .iter()
                .map(|p| check_path(p, strict_paths).map(|_| p.to_string()))
                .collect()
        };

        match action {
            "include" | "exclude" | "global-include" | "global-exclude" => {
                if args.is_empty() {
                    return Err(template_error(format!(
                        "'{}' expects <pattern1> <pattern2> ...",
                        action
                    )));
                }
                let patterns = owned(args)?;
                Ok(match action {
                    "include" => Self::Include(patterns),
                    "exclude" => Self::Exclude(patterns),
                    "global-include" => Self::GlobalInclude(patterns),
                    _ => Self::GlobalExclude(patterns),
                })
            }
            "recursive-include" | "recursive-exclude" => {
                if args.len() < 2 {
                    return Err(template_error(format!(
                        "'{}' expects <dir> <pattern1> <pattern2> ...",
                        action
                    )));
                }
                let dir = owned(&args[..1])?.remove(0);
                let patterns = owned(&args[1..])?;
                Ok(if action == "recursive-include" {
                    Self::RecursiveInclude { dir, patterns }
                } else {
                    Self::RecursiveExclude { dir, patterns }
                })
            }
            "graft" | "prune" => {
                if args.len() != 1 {
                    return Err(template_error(format!(
                        "'{}' expects a single <dir_pattern>",
                        action
                    )));
                }
                let dir = owned(args)?.remove(0);
                Ok(if action == "graft" {
                    Self::Graft(dir)
                } else {
                    Self::Prune(dir)
                })
            }
            _ => Err(template_error(format!("unknown action '{}'", action))),
        }
    }

    /// Apply this directive to `filelist`, warning when it matches nothing.
    pub fn apply(&self, filelist: &mut FileList, diagnostics: &mut Diagnostics) -> Result<()> {
        match self {
            Self::Include(patterns) => {
                for pattern in patterns {
                    let re = translate_pattern(Some(pattern), true, None)?;
                    if !filelist.include_matching(&re) {
                        diagnostics.warn(
                            Source::Template,
                            format!("no files found matching '{}'", pattern),
                        );
                    }
                }
            }
            Self::Exclude(patterns) => {
                for pattern in patterns {
                    let re = translate_pattern(Some(pattern), true, None)?;
                    if !filelist.exclude_matching(&re) {
                        diagnostics.warn(
                            Source::Template,
                            format!("no previously-included files found matching '{}'", pattern),
                        );
                    }
                }
            }
            Self::GlobalInclude(patterns) => {
                for pattern in patterns {
                    let re = translate_pattern(Some(pattern), false, None)?;
                    if !filelist.include_matching(&re) {
                        diagnostics.warn(
                            Source::Template,
                            format!(
                                "no files found matching '{}' anywhere in distribution",
                                pattern
                            ),
                        );
                    }
                }
            }
            Self::GlobalExclude(patterns) => {
                for pattern in patterns {
                    let re = translate_pattern(Some(pattern), false, None)?;
                    if !filelist.exclude_matching(&re) {
                        diagnostics.warn(
                            Source::Template,
                            format!(
                                "no previously-included files matching '{}' found anywhere in distribution",
                                pattern
                            ),
                        );
                    }
                }
            }
            Self::RecursiveInclude { dir, patterns } => {
                for pattern in patterns {
                    let re = translate_pattern(Some(pattern), true, Some(dir))?;
                    if !filelist.include_matching(&re) {
                        diagnostics.warn(
                            Source::Template,
                            format!(
                                "no files found matching '{}' under directory '{}'",
                                pattern, dir
                            ),
                        );
                    }
                }
            }
            Self::RecursiveExclude { dir, patterns } => {
                for pattern in patterns {
                    let re = translate_pattern(Some(pattern), true, Some(dir))?;
                    if !filelist.exclude_matching(&re) {
                        diagnostics.warn(
                            Source::Template,
                            format!(
                                "no previously-included files matching '{}' found under directory '{}'",
                                pattern, dir
                            ),
                        );
                    }
                }
            }
            Self::Graft(dir) => {
                let re = translate_pattern(None, true, Some(dir))?;
                if !filelist.include_matching(&re) {
                    diagnostics.warn(
                        Source::Template,
                        format!("no directories found matching '{}'", dir),
                    );
                }
            }
            Self::Prune(dir) => {
                let re = translate_pattern(None, true, Some(dir))?;
                if !filelist.exclude_matching(&re) {
                    diagnostics.warn(
                        Source::Template,
                        format!("no previously-included directories found matching '{}'", dir),
                    );
                }
            }
        }
        Ok(())
    }
}

fn template_error(message: impl Into<String>) -> SrcpackError {
    SrcpackError::TemplateError {
        message: message.into(),
    }
}

fn check_path(path: &str, strict: bool) -> Result<()> {
    if !strict {
        return Ok(());
    }
    if path.starts_with('/') {
        return Err(template_error(format!("path '{}' cannot be absolute", path)));
    }
    if path.ends_with('/') {
        return Err(template_error(format!("path '{}' cannot end with '/'", path)));
    }
    Ok(())
}

/// Split template text into logical lines with their starting line numbers.
///
/// Comments are stripped (`\#` escapes a literal `#`), a trailing backslash
/// joins the following line, surrounding whitespace is trimmed and blank
/// lines are dropped.
pub fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let number = idx + 1;
        let text = strip_comment(raw);
        let text = text.trim();

        let (start, mut joined) = match pending.take() {
            Some((start, mut buf)) => {
                buf.push_str(text);
                (start, buf)
            }
            None => (number, text.to_string()),
        };

        if joined.ends_with('\\') {
            joined.pop();
            let joined = joined.trim_end().to_string();
            pending = Some((start, if joined.is_empty() { joined } else { joined + " " }));
            continue;
        }

        if !joined.is_empty() {
            lines.push((start, joined));
        }
    }

    if let Some((start, buf)) = pending {
        let buf = buf.trim().to_string();
        if !buf.is_empty() {
            lines.push((start, buf));
        }
    }

    lines
}

fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                out.push('#');
                chars.next();
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    out
}

/// Apply every directive in the template at `path` to `filelist`.
///
/// Directive problems become one warning each; only failure to read the
/// template itself is an error.
pub fn read_template(
    path: &Path,
    filelist: &mut FileList,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    tracing::info!("reading manifest template '{}'", path.display());
    let content = fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    for (number, line) in logical_lines(&content) {
        let outcome = TemplateAction::parse(&line, cfg!(windows))
            .and_then(|action| action.apply(filelist, diagnostics));

        if let Err(e) = outcome {
            match e {
                SrcpackError::TemplateError { message } => diagnostics.warn(
                    Source::Template,
                    format!("{}, line {}: {}", name, number, message),
                ),
                other => return Err(other),
            }
        }
    }

    Ok(())
}
