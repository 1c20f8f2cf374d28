//! Entries under construction and the boundary predicates that end them.
//!
//! The tokenizer appends one character at a time to an [`Entry`] and asks a
//! [`Boundary`] whether the entry is complete. The predicate may:
//!
//! - look backward with [`Entry::peek`], [`Entry::peek_n`], [`Entry::peek_previous`]
//! - drop terminator characters with [`Entry::pop`]
//! - look one character ahead with [`Entry::check_next`]
//! - hand characters back with [`Entry::restore`]; they are delivered again,
//!   ahead of new input, and the predicate sees each one as it arrives
//!
//! ```
//! use markstream_core::entry::{self, Entry};
//!
//! // `==` ends an entry; a lone `=` does not.
//! let double_equals = entry::from_fn(|entry: &mut Entry<'_>| {
//!     if entry.peek() == Some('=') && entry.check_next('=')? {
//!         entry.pop();
//!         return Ok(true);
//!     }
//!     Ok(false)
//! });
//! # drop(double_equals);
//! ```

use std::fmt;
use std::io;

use crate::error::BoundaryError;
use crate::source::{is_line_terminator, CharRead};

/// A buffer of characters under construction, as seen by a predicate.
pub struct Entry<'a> {
    input: &'a mut String,
    source: &'a mut dyn CharRead,
    restored: Option<String>,
}

impl<'a> Entry<'a> {
    pub fn new(input: &'a mut String, source: &'a mut dyn CharRead) -> Self {
        Self {
            input,
            source,
            restored: None,
        }
    }

    /// The characters accumulated so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.input.as_str()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Last character of the buffer.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.input.chars().next_back()
    }

    /// Last `n` characters, or `None` if fewer than `n` are buffered.
    pub fn peek_n(&self, n: usize) -> Option<&str> {
        if n == 0 {
            return Some("");
        }
        self.input
            .char_indices()
            .rev()
            .nth(n - 1)
            .map(|(start, _)| &self.input[start..])
    }

    /// Second-to-last character of the buffer.
    pub fn peek_previous(&self) -> Option<char> {
        self.input.chars().rev().nth(1)
    }

    /// Remove and return the last character.
    #[inline]
    pub fn pop(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Queue `text` to be delivered again before any new input.
    ///
    /// Successive calls concatenate. The visible buffer is left untouched.
    pub fn restore(&mut self, text: &str) {
        match &mut self.restored {
            Some(restored) => restored.push_str(text),
            None => self.restored = Some(text.to_owned()),
        }
    }

    pub fn restore_char(&mut self, c: char) {
        match &mut self.restored {
            Some(restored) => restored.push(c),
            None => self.restored = Some(c.to_string()),
        }
    }

    /// Characters queued by [`restore`](Self::restore) so far.
    pub fn restored(&self) -> Option<&str> {
        self.restored.as_deref()
    }

    /// Read one character ahead and test it against `expected`.
    ///
    /// The character read is always queued for replay, matching or not, so
    /// lookahead never loses input. Returns `false` at end of input.
    pub fn check_next(&mut self, expected: char) -> io::Result<bool> {
        match self.source.read_char()? {
            Some(next) => {
                self.restore_char(next);
                Ok(next == expected)
            }
            None => Ok(false),
        }
    }

    pub(crate) fn into_restored(self) -> Option<String> {
        self.restored
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("input", &self.input)
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}

/// Decides whether an entry is complete.
///
/// Called after every appended character. Returning `Ok(true)` ends the
/// entry; whatever the predicate left in the buffer becomes the token.
pub trait Boundary {
    fn is_boundary(&mut self, entry: &mut Entry<'_>) -> Result<bool, BoundaryError>;
}

impl<B: Boundary + ?Sized> Boundary for &mut B {
    #[inline]
    fn is_boundary(&mut self, entry: &mut Entry<'_>) -> Result<bool, BoundaryError> {
        (**self).is_boundary(entry)
    }
}

/// Ends an entry at any line terminator, dropping the terminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndOfLine;

impl Boundary for EndOfLine {
    fn is_boundary(&mut self, entry: &mut Entry<'_>) -> Result<bool, BoundaryError> {
        match entry.peek() {
            Some(c) if is_line_terminator(c) => {
                entry.pop();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Boundary built from a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

/// Wrap a closure as a [`Boundary`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&mut Entry<'_>) -> Result<bool, BoundaryError>,
{
    FromFn(f)
}

impl<F> Boundary for FromFn<F>
where
    F: FnMut(&mut Entry<'_>) -> Result<bool, BoundaryError>,
{
    #[inline]
    fn is_boundary(&mut self, entry: &mut Entry<'_>) -> Result<bool, BoundaryError> {
        (self.0)(entry)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}
