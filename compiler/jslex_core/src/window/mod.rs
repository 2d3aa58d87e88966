//! Growable, shiftable byte window over a streaming reader.
//!
//! The window buffers bytes pulled from any [`Read`] source and exposes them
//! by offset relative to the *released boundary*: the first byte the caller
//! has not yet given back with [`release()`](SourceWindow::release). Reads past
//! the buffered end pull more data on demand, so lookahead never requires the
//! whole input in memory.
//!
//! # Retention
//!
//! Bytes stay buffered until released. Views handed out by
//! [`slice()`](SourceWindow::slice) borrow the window, so the borrow checker
//! guarantees they are gone before the next `release()` or refill moves the
//! buffer. Released space is reclaimed lazily: the live tail is shifted to the
//! front of the buffer on the next refill once it would free at least half of it.
//!
//! # Reader Failures
//!
//! An `io::Error` other than [`Interrupted`](io::ErrorKind::Interrupted) ends
//! the stream. The window then behaves as if the input ended and keeps the
//! error for [`take_error()`](SourceWindow::take_error).

use std::io::{self, Read};

use tracing::debug;

/// Default number of bytes requested from the reader per refill.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Tuning knobs for [`SourceWindow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    /// Bytes requested from the reader per refill. Values below 1 are raised to 1.
    pub chunk_size: usize,
    /// Initial buffer capacity in bytes.
    pub initial_capacity: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            initial_capacity: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// The bytes at some offset are not a well-formed UTF-8 sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidUtf8;

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by [`find_in`] to combine results from separate memchr calls when
/// searching for more bytes than `memchr3` supports.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Position of the first byte of `hay` contained in `needles`.
fn find_in(hay: &[u8], needles: &[u8]) -> Option<usize> {
    match needles {
        [] => None,
        [a] => memchr::memchr(*a, hay),
        [a, b] => memchr::memchr2(*a, *b, hay),
        [a, b, c] => memchr::memchr3(*a, *b, *c, hay),
        [a, b, c, rest @ ..] => {
            let first = memchr::memchr3(*a, *b, *c, hay);
            // Anything past `first` cannot win, so the rest only scans the prefix.
            let limit = first.unwrap_or(hay.len());
            earliest_of(first, find_in(&hay[..limit], rest))
        }
    }
}

/// Returns the number of bytes in the UTF-8 sequence led by `byte`.
///
/// - `0x00..=0x7F`: 1 byte
/// - `0xC2..=0xDF`: 2 bytes
/// - `0xE0..=0xEF`: 3 bytes
/// - `0xF0..=0xF4`: 4 bytes
/// - Continuation bytes and bytes that never lead a sequence: 0
#[inline]
pub fn utf8_char_width(byte: u8) -> usize {
    match byte {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Byte window over a streaming reader.
///
/// All offsets taken and returned by the window are relative to the released
/// boundary. [`released()`](Self::released) gives the boundary's absolute
/// position in the stream.
pub struct SourceWindow<R> {
    reader: R,
    /// Buffered bytes; `buf[start..]` is the live window.
    buf: Vec<u8>,
    /// Index of the released boundary within `buf`.
    start: usize,
    /// Absolute stream offset of `buf[start]`.
    released: u64,
    chunk_size: usize,
    /// The reader reported end of input (or failed).
    eof: bool,
    error: Option<io::Error>,
}

impl<R: Read> SourceWindow<R> {
    /// Create a window with [`WindowOptions::default()`].
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, WindowOptions::default())
    }

    /// Create a window with explicit buffering options.
    pub fn with_options(reader: R, options: WindowOptions) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(options.initial_capacity),
            start: 0,
            released: 0,
            chunk_size: options.chunk_size.max(1),
            eof: false,
            error: None,
        }
    }

    /// Returns the byte `offset` positions past the released boundary, or
    /// `None` at end of input.
    #[inline]
    pub fn peek(&mut self, offset: usize) -> Option<u8> {
        if self.start + offset >= self.buf.len() && !self.fill_to(offset) {
            return None;
        }
        self.buf.get(self.start + offset).copied()
    }

    /// Decode the UTF-8 scalar value starting at `offset`.
    ///
    /// Returns the character and its encoded width, `None` at end of input, or
    /// [`InvalidUtf8`] for a malformed or truncated sequence.
    pub fn peek_char(&mut self, offset: usize) -> Option<Result<(char, usize), InvalidUtf8>> {
        let lead = self.peek(offset)?;
        if lead.is_ascii() {
            return Some(Ok((char::from(lead), 1)));
        }
        let width = utf8_char_width(lead);
        if width == 0 || !self.fill_to(offset + width - 1) {
            return Some(Err(InvalidUtf8));
        }
        let at = self.start + offset;
        let decoded = std::str::from_utf8(&self.buf[at..at + width])
            .ok()
            .and_then(|s| s.chars().next());
        Some(decoded.map(|c| (c, width)).ok_or(InvalidUtf8))
    }

    /// Returns the first offset at or after `from` whose byte is one of
    /// `needles`, or the offset of the end of input if none occurs.
    ///
    /// Scans buffered data with memchr and refills as needed.
    pub fn find_any(&mut self, from: usize, needles: &[u8]) -> usize {
        let mut offset = from;
        loop {
            if !self.fill_to(offset) {
                return offset.min(self.buffered());
            }
            let hay = &self.buf[self.start + offset..];
            if let Some(found) = find_in(hay, needles) {
                return offset + found;
            }
            offset += hay.len();
        }
    }

    /// View of the buffered bytes `start..end` (relative offsets).
    ///
    /// Offsets past the buffered end are clamped.
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        let live = &self.buf[self.start..];
        let end = end.min(live.len());
        &live[start.min(end)..end]
    }

    /// Advance the released boundary by `n` bytes (clamped to what is buffered).
    pub fn release(&mut self, n: usize) {
        let n = n.min(self.buffered());
        self.start += n;
        self.released += n as u64;
    }

    /// Absolute stream offset of the released boundary.
    #[inline]
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Number of bytes buffered past the released boundary.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buf.len() - self.start
    }

    /// Take the reader failure that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Buffer bytes until `offset` is readable. Returns `false` at end of input.
    fn fill_to(&mut self, offset: usize) -> bool {
        while self.start + offset >= self.buf.len() {
            if self.eof {
                return false;
            }
            self.fill();
        }
        true
    }

    /// Pull one chunk from the reader, compacting released space first.
    fn fill(&mut self) {
        if self.start > 0 && self.start >= self.buf.len() / 2 {
            let live = self.buf.len() - self.start;
            self.buf.copy_within(self.start.., 0);
            self.buf.truncate(live);
            self.start = 0;
        }

        let len = self.buf.len();
        self.buf.resize(len + self.chunk_size, 0);
        loop {
            match self.reader.read(&mut self.buf[len..]) {
                Ok(0) => {
                    self.buf.truncate(len);
                    self.eof = true;
                    debug!(total = self.released + self.buffered() as u64, "source exhausted");
                    return;
                }
                Ok(n) => {
                    self.buf.truncate(len + n);
                    return;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.buf.truncate(len);
                    self.eof = true;
                    debug!(%err, "source read failed");
                    self.error = Some(err);
                    return;
                }
            }
        }
    }
}
