//! Error types for configuration loading and action selection.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::ActionKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading or parsing a configuration file.
pub enum Error {
    #[error("{message}")]
    /// The file is absent or could not be read.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("config file is empty")]
    /// The file exists but has zero length.
    Empty {
        /// Optional path of the empty file.
        path: Option<PathBuf>,
    },
    #[error("{message}")]
    /// The text is not well-formed JSON.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Empty { path } => match path {
                Some(p) => format!("Config file {} is empty", p.display()),
                None => "Config file is empty".to_string(),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => match path {
                Some(p) => format!(
                    "Invalid JSON at {}:{}:{}\n{}\n{}",
                    p.display(),
                    line,
                    col,
                    message,
                    excerpt
                ),
                None => format!(
                    "Invalid JSON at line {}, column {}\n{}\n{}",
                    line, col, message, excerpt
                ),
            },
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Empty { path } | Self::Parse { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach `path` to this error, replacing any existing path.
    pub fn with_path(mut self, p: &Path) -> Self {
        match &mut self {
            Self::Read { path, .. } | Self::Empty { path } | Self::Parse { path, .. } => {
                *path = Some(p.to_path_buf());
            }
        }
        self
    }
}

/// Why an entry did not produce a runnable action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// None of the primary action fields is present.
    #[error("entry has no action field")]
    NoAction,
    /// The selected action lacks a field it cannot run without.
    #[error("{kind}: missing required field `{field}`")]
    MissingField {
        /// Action selected by its primary field.
        kind: ActionKind,
        /// Name of the missing field.
        field: &'static str,
    },
    /// The selected action has a malformed argument.
    #[error("{kind}: invalid {field} `{value}`")]
    Invalid {
        /// Action selected by its primary field.
        kind: ActionKind,
        /// Name of the malformed field.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

impl ActionError {
    /// The action kind this error refers to, if one was selected.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            Self::NoAction => None,
            Self::MissingField { kind, .. } | Self::Invalid { kind, .. } => Some(*kind),
        }
    }
}

/// Build a small 2–3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_marks_column() {
        let src = "{\n  \"hotkey\": [\n    {\"key\": }\n]}";
        let ex = excerpt_at(src, 3, 13);
        assert!(ex.contains("   3 |     {\"key\": }"));
        let caret_line = ex.lines().nth(3).expect("caret line");
        assert_eq!(caret_line.find('^'), Some(" ".len() + 4 + " | ".len() + 12));
    }

    #[test]
    fn pretty_includes_path() {
        let e = Error::Empty { path: None }.with_path(Path::new("fe.json"));
        assert_eq!(e.pretty(), "Config file fe.json is empty");
        assert_eq!(e.path(), Some(Path::new("fe.json")));
    }

    #[test]
    fn action_error_messages() {
        let e = ActionError::MissingField {
            kind: ActionKind::Shortcut,
            field: "file",
        };
        assert_eq!(e.to_string(), "shortcut: missing required field `file`");
        assert_eq!(e.kind(), Some(ActionKind::Shortcut));
        assert_eq!(ActionError::NoAction.kind(), None);
    }
}
