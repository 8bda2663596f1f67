use std::cmp::max;
use std::fmt;

use crate::types::span::Span;

/// An error that can occur while acquiring, pulling or reading a session.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    excerpt: Option<(String, Span)>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The compiled template does not satisfy its shape invariants.
    InvalidTemplate,

    /// The number of interpolation values does not match the total slot width.
    ValueCount,

    /// A session was pulled from after it was exhausted.
    UseAfterExhaustion,

    /// A slot produced a value that could not be flattened.
    UnsupportedChunkType,

    /// An error reported by a slot or a deferred value.
    Custom,

    /// An error converting data to a value.
    #[cfg(feature = "serde")]
    Serialize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            excerpt: None,
        }
    }

    /// Construct an error with a custom message.
    ///
    /// This is the error that slot implementations and deferred values should
    /// return when they fail.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Custom, msg.to_string())
    }

    pub(crate) fn invalid_template(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTemplate, msg)
    }

    pub(crate) fn value_count(expected: usize, got: usize) -> Self {
        Self::new(
            ErrorKind::ValueCount,
            format!("template expects {expected} interpolation values, but got {got}"),
        )
    }

    pub(crate) fn use_after_exhaustion() -> Self {
        Self::new(
            ErrorKind::UseAfterExhaustion,
            "render session pulled after it was exhausted",
        )
    }

    pub(crate) fn unsupported(human: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedChunkType,
            format!("unsupported chunk type {human}"),
        )
    }

    /// Attach a template excerpt to the error, if it doesn't have one yet.
    ///
    /// The innermost excerpt wins so that errors raised inside a nested
    /// template point at the nested template.
    pub(crate) fn with_excerpt(mut self, source: String, span: Span) -> Self {
        if self.excerpt.is_none() && !source.is_empty() {
            self.excerpt = Some((source, span));
        }
        self
    }

    /// Returns the category of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message without any template excerpt.
    #[inline]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::new(ErrorKind::Custom, msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Self::new(ErrorKind::Custom, msg)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(ErrorKind::Serialize, msg.to_string())
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.excerpt {
            Some((source, span)) => fmt_pretty(&self.msg, source, *span, f),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.excerpt {
            Some((source, span)) => {
                if f.alternate() {
                    fmt_pretty(&self.msg, source, *span, f)
                } else {
                    write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n)
                }
            }
            None => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let width = max(1, display_width(&source[span]));
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    let num = (line + 1).to_string();
    let pad = display_width(&num);
    let pipe = "|";
    let underline = "^".repeat(width);

    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, display_width(&line[..offset - n]));
        }
        n += len;
    }
    let last = lines.last().map_or(0, |l| display_width(l));
    (lines.len(), last)
}

#[cfg(feature = "unicode")]
fn display_width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn display_width(s: &str) -> usize {
    s.chars().count()
}
