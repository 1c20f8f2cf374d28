//! Parse errors with positional context.
//!
//! Every fault raised while extracting entries - I/O failures on the
//! underlying source, premature end of input, faults inside a boundary
//! predicate - is re-wrapped as a [`ParseError`]. Grammar collaborators
//! raise their own faults through the same carrier so callers see one
//! failure type.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use thiserror::Error;

use crate::source::Position;

/// Boxed error returned by boundary predicates.
pub type BoundaryError = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// The underlying character source failed to read.
    Io = 0,
    /// End of input reached while the caller required more.
    PrematureEof,
    /// A boundary predicate raised a fault.
    Predicate,
    /// Malformed token content, reported by a grammar collaborator.
    Grammar,
}

impl ErrorKind {
    /// Get a human-readable description of this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::Io => "read failure",
            Self::PrematureEof => "end of file reached",
            Self::Predicate => "boundary predicate failed",
            Self::Grammar => "malformed entry",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error raised while tokenizing, with the offending line and position.
#[derive(Debug, Error)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    kind: ErrorKind,
    message: String,
    line_text: Option<String>,
    line: usize,
    column: usize,
    #[source]
    cause: Option<BoundaryError>,
}

impl ParseError {
    /// Create an error of the given kind at an explicit line and column.
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line_text: None,
            line,
            column,
            cause: None,
        }
    }

    /// Wrap an I/O fault raised by the character source.
    pub(crate) fn io(error: io::Error, at: Position) -> Self {
        Self::new(ErrorKind::Io, error.to_string(), at.line, at.column).with_cause(error)
    }

    /// End of input reached with `error_on_eof` set.
    pub(crate) fn premature_eof(partial: &str, at: Position) -> Self {
        Self::new(ErrorKind::PrematureEof, ErrorKind::PrematureEof.message(), at.line, at.column)
            .with_line_text(partial)
    }

    /// Wrap a fault raised by a boundary predicate.
    pub(crate) fn predicate(cause: BoundaryError, partial: &str, at: Position) -> Self {
        Self {
            kind: ErrorKind::Predicate,
            message: format!("{}: {}", ErrorKind::Predicate.message(), cause),
            line_text: Some(partial.to_owned()),
            line: at.line,
            column: at.column,
            cause: Some(cause),
        }
    }

    /// Attach the text of the line the error occurred on.
    pub fn with_line_text(mut self, text: impl Into<String>) -> Self {
        self.line_text = Some(text.into());
        self
    }

    /// Attach an underlying cause.
    pub fn with_cause(mut self, cause: impl Into<BoundaryError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text of the offending line, when known.
    #[inline]
    pub fn line_text(&self) -> Option<&str> {
        self.line_text.as_deref()
    }

    /// 1-based line index.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column offset within the line (0-based).
    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Check if the input ended before the caller expected.
    pub fn is_premature_eof(&self) -> bool {
        self.kind == ErrorKind::PrematureEof
    }
}
