//! Character sources with line-terminator normalization.
//!
//! A [`CharSource`] pulls characters one at a time from a raw [`CharRead`]
//! input and, when normalization is enabled, collapses every recognized
//! line-terminator sequence into a single [`LINE_FEED`]:
//!
//! ```text
//! CR  LF  NEL  VT  FF  LS  PS     -> '\n'
//! CR LF   LF CR                   -> '\n'   (one break, not two)
//! ```
//!
//! Pairs are detected by reading at most one character ahead. A lookahead
//! character that is not the partner of the current CR/LF is held in a
//! one-slot pushback and delivered (normalized) by the next `read()`.

use std::io::{self, BufRead};
use std::str::Chars;

use phf::phf_set;

/// The canonical line break every terminator sequence normalizes to.
pub const LINE_FEED: char = '\n';

const CR: char = '\r';
const LF: char = '\n';

/// Every character that ends a line: CR, LF, NEL, VT, FF, LS, PS.
pub static LINE_TERMINATORS: phf::Set<char> = phf_set! {
    '\r',
    '\n',
    '\u{0085}',
    '\u{000B}',
    '\u{000C}',
    '\u{2028}',
    '\u{2029}',
};

/// Check if `c` is one of the recognized line terminators.
#[inline]
pub fn is_line_terminator(c: char) -> bool {
    LINE_TERMINATORS.contains(&c)
}

/// A raw, pull-based character input.
///
/// `Ok(None)` signals end of input. Implementations should keep returning
/// `Ok(None)` once exhausted.
pub trait CharRead {
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

impl<T: CharRead + ?Sized> CharRead for &mut T {
    #[inline]
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

impl<T: CharRead + ?Sized> CharRead for Box<T> {
    #[inline]
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

/// Characters of an in-memory string. Never fails.
#[derive(Debug, Clone)]
pub struct StrChars<'a> {
    chars: Chars<'a>,
}

impl<'a> StrChars<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl CharRead for StrChars<'_> {
    #[inline]
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// UTF-8 decoder over a buffered byte reader.
///
/// Malformed or truncated sequences surface as `io::ErrorKind::InvalidData`
/// and `io::ErrorKind::UnexpectedEof` respectively.
#[derive(Debug)]
pub struct Utf8Chars<R> {
    reader: R,
}

impl<R: BufRead> Utf8Chars<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }
}

/// Encoded length of a UTF-8 sequence from its lead byte, 0 if invalid.
#[inline]
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}

impl<R: BufRead> CharRead for Utf8Chars<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead);
        if width == 0 {
            return Err(invalid_utf8());
        }
        if width == 1 {
            return Ok(Some(char::from(lead)));
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "truncated UTF-8 sequence")
            })?;
        }
        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(invalid_utf8)
    }
}

/// Location of the next character to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Characters since the last line break (0-indexed)
    pub column: usize,
    /// Characters delivered since the start of input
    pub offset: usize,
}

impl Position {
    /// Position at the start of the input.
    pub fn new() -> Self {
        Self { line: 1, column: 0, offset: 0 }
    }

    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Step past one delivered character.
    pub(crate) fn advance(&mut self, delivered: char) {
        self.offset += 1;
        if is_line_terminator(delivered) {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Step back `n` characters on the same line.
    pub(crate) fn rewind(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_sub(n),
            offset: self.offset.saturating_sub(n),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizing character source with one-slot pushback and a line counter.
#[derive(Debug)]
pub struct CharSource<R> {
    reader: R,
    /// Lookahead character read while testing for a CR/LF partner.
    pending: Option<char>,
    normalize: bool,
    /// Logical line breaks delivered so far.
    lines: usize,
    position: Position,
}

impl<R: CharRead> CharSource<R> {
    pub fn new(reader: R, normalize_line_endings: bool) -> Self {
        Self {
            reader,
            pending: None,
            normalize: normalize_line_endings,
            lines: 0,
            position: Position::new(),
        }
    }

    /// Read the next character, or `None` at end of input.
    pub fn read(&mut self) -> io::Result<Option<char>> {
        let c = match self.pending.take() {
            Some(c) => c,
            None => match self.reader.read_char()? {
                Some(c) => c,
                None => return Ok(None),
            },
        };
        let c = if self.normalize { self.normalize(c)? } else { c };
        self.advance(c);
        Ok(Some(c))
    }

    fn normalize(&mut self, c: char) -> io::Result<char> {
        match c {
            CR | LF => {
                let partner = if c == CR { LF } else { CR };
                match self.reader.read_char()? {
                    Some(next) if next == partner => {}
                    next => self.pending = next,
                }
                Ok(LINE_FEED)
            }
            c if is_line_terminator(c) => Ok(LINE_FEED),
            c => Ok(c),
        }
    }

    fn advance(&mut self, delivered: char) {
        if is_line_terminator(delivered) {
            self.lines += 1;
        }
        self.position.advance(delivered);
    }

    /// Number of logical line breaks read so far.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Position of the next character to be read.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn normalizes_line_endings(&self) -> bool {
        self.normalize
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Give back the raw input. A pending lookahead character is dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: CharRead> CharRead for CharSource<R> {
    #[inline]
    fn read_char(&mut self) -> io::Result<Option<char>> {
        self.read()
    }
}
