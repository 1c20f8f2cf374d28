//! Entry extraction.
//!
//! A [`Tokenizer`] pulls characters from a [`CharSource`], appends them to
//! an entry buffer and asks a [`Boundary`] after every character whether
//! the entry is complete. Characters the predicate hands back are replayed
//! ahead of the source, one at a time, and go through the predicate again
//! exactly like freshly read ones:
//!
//! ```text
//! replay ─┬─▶ buffer ──is_boundary()──▶ token
//! source ─┘      ▲                       │
//!    ▲           └── replay ◀─ restored ─┘
//!    └── check_next() (lookahead, always restored)
//! ```
//!
//! Grammar collaborators hold a tokenizer and drive it, usually through
//! [`Tokenizer::next_line`] or [`Tokenizer::for_each_entry`].

use std::io::{self, BufReader, Read};

use tracing::{debug, trace};

use crate::config::TokenizerConfig;
use crate::entry::{Boundary, EndOfLine, Entry};
use crate::error::{BoundaryError, ErrorKind, ParseError};
use crate::source::{CharRead, CharSource, Position, StrChars, Utf8Chars};

/// Pull-based tokenizer over a character input.
///
/// One tokenizer serves one parse; extraction is inherently sequential
/// because each boundary decision depends on what earlier calls consumed.
#[derive(Debug)]
pub struct Tokenizer<R> {
    source: CharSource<R>,
    /// Entry under construction; holds the last token once returned.
    buffer: String,
    /// Characters handed back by the predicate, not yet re-delivered.
    replay: Replay,
    /// Where the current (or last) entry started.
    entry_start: Position,
}

impl<'a> Tokenizer<StrChars<'a>> {
    /// Tokenize an in-memory string with the default configuration.
    pub fn from_text(text: &'a str) -> Self {
        Self::new(StrChars::new(text))
    }
}

impl<R: Read> Tokenizer<Utf8Chars<BufReader<R>>> {
    /// Tokenize UTF-8 text from any byte reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(Utf8Chars::new(BufReader::new(reader)))
    }
}

impl<R: CharRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, TokenizerConfig::default())
    }

    pub fn with_config(reader: R, config: TokenizerConfig) -> Self {
        Self {
            source: CharSource::new(reader, config.normalize_line_endings),
            buffer: String::with_capacity(config.entry_capacity),
            replay: Replay::default(),
            entry_start: Position::new(),
        }
    }

    /// Extract the next entry ending where `boundary` says it does.
    ///
    /// Replayed characters are delivered before new input and are checked
    /// by `boundary` one at a time, so a replayed terminator ends the entry.
    ///
    /// Returns `Ok(None)` at end of input with nothing buffered. A non-empty
    /// buffer at end of input is returned as the final entry, unless
    /// `error_on_eof` is set, in which case reaching end of input is a
    /// [`ErrorKind::PrematureEof`] error.
    pub fn next_entry<B>(&mut self, boundary: &mut B, error_on_eof: bool) -> Result<Option<String>, ParseError>
    where
        B: Boundary + ?Sized,
    {
        self.buffer.clear();
        self.entry_start = self.next_position();

        loop {
            let c = match self.replay.pop() {
                Some(c) => c,
                None => match self.source.read() {
                    Ok(Some(c)) => c,
                    Ok(None) => return self.end_of_input(error_on_eof),
                    Err(e) => {
                        debug!(line = self.source.position().line, error = %e, "read failed");
                        return Err(ParseError::io(e, self.source.position()).with_line_text(self.buffer.as_str()));
                    }
                },
            };
            self.buffer.push(c);

            let mark = self.next_position();
            let mut lookahead = Lookahead {
                replay: &mut self.replay,
                source: &mut self.source,
                consumed: 0,
            };
            let mut entry = Entry::new(&mut self.buffer, &mut lookahead);
            let verdict = boundary.is_boundary(&mut entry);
            let restored = entry.into_restored();
            let consumed = lookahead.consumed;

            if let Some(restored) = restored {
                // Restored text beyond what lookahead read came off the end of the buffer.
                let handed_back = restored.chars().count().saturating_sub(consumed);
                self.replay.requeue(&restored, mark.rewind(handed_back));
            }

            match verdict {
                Ok(true) => {
                    trace!(
                        line = self.entry_start.line,
                        len = self.buffer.len(),
                        restored = self.replay.as_str().map_or(0, str::len),
                        "entry"
                    );
                    return Ok(Some(self.buffer.clone()));
                }
                Ok(false) => {}
                Err(cause) => return Err(self.predicate_fault(cause)),
            }
        }
    }

    /// Extract the next line, without its terminator.
    ///
    /// A terminator handed back by an earlier lookahead ends the line like
    /// any other, so lines never contain terminator characters.
    #[inline]
    pub fn next_line(&mut self, error_on_eof: bool) -> Result<Option<String>, ParseError> {
        self.next_entry(&mut EndOfLine, error_on_eof)
    }

    /// Hand every entry to `f` until end of input.
    ///
    /// `f` gets the tokenizer back so it can pull further lines or build
    /// positioned errors with [`error`](Self::error). The first error from
    /// either side stops the loop.
    pub fn for_each_entry<B, F>(&mut self, mut boundary: B, mut f: F) -> Result<(), ParseError>
    where
        B: Boundary,
        F: FnMut(&mut Self, &str) -> Result<(), ParseError>,
    {
        while let Some(entry) = self.next_entry(&mut boundary, false)? {
            f(self, &entry)?;
        }
        Ok(())
    }

    fn end_of_input(&mut self, error_on_eof: bool) -> Result<Option<String>, ParseError> {
        let at = self.source.position();
        if error_on_eof {
            debug!(line = at.line, partial = self.buffer.len(), "premature end of input");
            return Err(ParseError::premature_eof(&self.buffer, at));
        }
        if self.buffer.is_empty() {
            debug!(lines = self.source.line_count(), "end of input");
            Ok(None)
        } else {
            trace!(line = self.entry_start.line, len = self.buffer.len(), "final entry");
            Ok(Some(self.buffer.clone()))
        }
    }

    /// Position of the next character to be delivered, replayed or fresh.
    fn next_position(&self) -> Position {
        match self.replay.as_str() {
            Some(_) => self.replay.start,
            None => self.source.position(),
        }
    }

    fn predicate_fault(&self, cause: BoundaryError) -> ParseError {
        let at = self.source.position();
        debug!(line = at.line, error = %cause, "boundary predicate failed");
        ParseError::predicate(cause, &self.buffer, at)
    }

    /// Build a grammar error against the last extracted entry.
    ///
    /// `column` is the offending offset within that entry.
    pub fn error(&self, message: impl Into<String>, column: usize) -> ParseError {
        ParseError::new(ErrorKind::Grammar, message, self.entry_start.line, column)
            .with_line_text(self.buffer.as_str())
    }

    pub fn error_with_cause(
        &self,
        message: impl Into<String>,
        column: usize,
        cause: impl Into<BoundaryError>,
    ) -> ParseError {
        self.error(message, column).with_cause(cause)
    }

    /// Logical line breaks read so far.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.source.line_count()
    }

    /// Position of the next character to be read from the source.
    #[inline]
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// Where the last extracted entry started.
    #[inline]
    pub fn entry_position(&self) -> Position {
        self.entry_start
    }

    /// Text of the last extracted entry (empty before the first one).
    #[inline]
    pub fn last_entry(&self) -> &str {
        &self.buffer
    }

    /// Characters waiting to be replayed at the start of the next entry.
    #[inline]
    pub fn pending(&self) -> Option<&str> {
        self.replay.as_str()
    }

    pub fn normalizes_line_endings(&self) -> bool {
        self.source.normalizes_line_endings()
    }

    /// Give back the raw input. Pending characters are dropped.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

/// Restored characters queued ahead of the source.
#[derive(Debug, Default)]
struct Replay {
    text: String,
    /// Byte offset of the next character to re-deliver.
    cursor: usize,
    /// Position of the next character to re-deliver.
    start: Position,
}

impl Replay {
    fn as_str(&self) -> Option<&str> {
        let rest = &self.text[self.cursor..];
        (!rest.is_empty()).then_some(rest)
    }

    fn pop(&mut self) -> Option<char> {
        let c = self.text[self.cursor..].chars().next()?;
        self.cursor += c.len_utf8();
        self.start.advance(c);
        Some(c)
    }

    /// Put `restored` in front of whatever is still waiting.
    fn requeue(&mut self, restored: &str, start: Position) {
        self.text.replace_range(..self.cursor, restored);
        self.cursor = 0;
        self.start = start;
    }
}

/// Input seen by a predicate's lookahead: waiting replay first, then the source.
struct Lookahead<'a, R> {
    replay: &'a mut Replay,
    source: &'a mut CharSource<R>,
    consumed: usize,
}

impl<R: CharRead> CharRead for Lookahead<'_, R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let next = match self.replay.pop() {
            Some(c) => Some(c),
            None => self.source.read()?,
        };
        if next.is_some() {
            self.consumed += 1;
        }
        Ok(next)
    }
}
