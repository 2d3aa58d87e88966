//! The lexer state machine.
//!
//! [`Lexer::next()`] produces one token per call by dispatching on the first
//! byte at the cursor. Every byte of valid input lands in exactly one token,
//! trivia included, so concatenating the spans reproduces the source.
//!
//! Tokens borrow the [`SourceWindow`]; the next `&mut self` call on the lexer
//! ends the borrow. Bytes of consumed tokens stay buffered until the caller
//! gives them back with [`Lexer::release()`].
//!
//! # Termination
//!
//! `next()` returns a [`TokenType::Error`] token with an empty span once the
//! input is exhausted or malformed. [`Lexer::err()`] then explains why, and
//! every later call returns the same `Error` token.

use std::io::Read;
use std::ops::Range;

use tracing::{debug, trace};

use crate::char_class::{
    is_ascii_identifier_continue, is_ascii_identifier_start, is_digit_byte,
    is_identifier_continue, is_identifier_start, is_line_terminator, is_punctuator_start,
    is_whitespace,
};
use crate::context::ScanContext;
use crate::error::{EscapeContext, LexError, Literal};
use crate::tag::{Punctuator, TokenType, MAX_PUNCTUATOR_LEN};
use crate::window::{SourceWindow, WindowOptions};

/// Largest Unicode scalar value accepted in a `\u{...}` escape.
const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// A classified span of source bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub ty: TokenType,
    /// Source bytes of the token; empty for [`TokenType::Error`].
    pub bytes: &'a [u8],
    /// Absolute byte offset of the token in the stream.
    pub offset: u64,
}

impl Token<'_> {
    #[inline]
    pub fn is_error(&self) -> bool {
        self.ty == TokenType::Error
    }
}

/// Streaming JavaScript lexer over any reader.
pub struct Lexer<R> {
    window: SourceWindow<R>,
    /// Start of the next token, relative to the window's released boundary.
    pos: usize,
    context: ScanContext,
    error: Option<LexError>,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, WindowOptions::default())
    }

    pub fn with_options(reader: R, options: WindowOptions) -> Self {
        Self {
            window: SourceWindow::with_options(reader, options),
            pos: 0,
            context: ScanContext::new(),
            error: None,
        }
    }

    /// Advance by one token.
    #[allow(
        clippy::should_implement_trait,
        reason = "tokens borrow the lexer, which rules out Iterator"
    )]
    pub fn next(&mut self) -> Token<'_> {
        if self.error.is_none() {
            let start = self.pos;
            let scanned = self.scan(start);
            let scanned = match self.window.take_error() {
                Some(err) => Err(LexError::Io(err)),
                None => scanned,
            };
            match scanned {
                Ok(ty) => {
                    let offset = self.absolute(start);
                    trace!(
                        %ty,
                        offset,
                        len = self.pos - start,
                        depth = self.context.depth(),
                        "token"
                    );
                    return Token {
                        ty,
                        bytes: self.window.slice(start, self.pos),
                        offset,
                    };
                }
                Err(err) => {
                    if err.is_end_of_input() {
                        trace!(offset = self.absolute(start), "end of input");
                    } else {
                        debug!(%err, "lexing stopped");
                    }
                    self.pos = start;
                    self.error = Some(err);
                }
            }
        }
        Token {
            ty: TokenType::Error,
            bytes: &[],
            offset: self.offset(),
        }
    }

    /// Let the window reclaim the first `n` consumed bytes.
    ///
    /// Clamped to the bytes of tokens already returned.
    pub fn release(&mut self, n: usize) {
        let n = n.min(self.pos);
        self.window.release(n);
        self.pos -= n;
    }

    /// The terminal diagnosis, once an `Error` token has been returned.
    pub fn err(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Consume the lexer, returning its terminal diagnosis.
    pub fn into_err(self) -> Option<LexError> {
        self.error
    }

    /// Absolute offset of the next token.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.absolute(self.pos)
    }

    /// Regex/division context after the last token.
    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    #[inline]
    fn absolute(&self, relative: usize) -> u64 {
        self.window.released() + relative as u64
    }

    fn scan(&mut self, start: usize) -> Result<TokenType, LexError> {
        let Some(b) = self.window.peek(start) else {
            return Err(match self.context.open_template() {
                // A `${` hole is still open.
                Some(offset) => LexError::UnterminatedLiteral {
                    literal: Literal::Template,
                    offset,
                },
                None => LexError::EndOfInput,
            });
        };
        match b {
            b' ' | b'\t' | 0x0B | 0x0C => Ok(self.whitespace(start)),
            b'\n' | b'\r' => Ok(self.line_terminators(start)),
            b'/' => self.slash(start),
            b'0'..=b'9' => Ok(self.number(start)),
            b'.' if is_digit_byte(self.window.peek(start + 1), 10) => Ok(self.number(start)),
            b'\'' | b'"' => self.string(start, b),
            b'`' => self.template(start, false),
            b'}' if self.context.right_brace_resumes_template() => self.template(start, true),
            b'<' if self.followed_by(start + 1, b"!--") => Ok(self.line_comment(start, 4)),
            b'-' if self.context.at_line_start() && self.followed_by(start + 1, b"->") => {
                Ok(self.line_comment(start, 3))
            }
            b'#' if self.absolute(start) == 0 && self.window.peek(start + 1) == Some(b'!') => {
                Ok(self.line_comment(start, 2))
            }
            b'\\' => self.identifier(start),
            _ if is_ascii_identifier_start(b) => self.identifier(start),
            _ if is_punctuator_start(b) => self.punctuator(start),
            _ if b.is_ascii() => Err(self.unrecognized(char::from(b), start)),
            _ => self.non_ascii(start),
        }
    }

    fn non_ascii(&mut self, start: usize) -> Result<TokenType, LexError> {
        match self.window.peek_char(start) {
            Some(Ok((c, _))) if is_whitespace(c) => Ok(self.whitespace(start)),
            Some(Ok((c, _))) if is_line_terminator(c) => Ok(self.line_terminators(start)),
            Some(Ok((c, _))) if is_identifier_start(c) => self.identifier(start),
            Some(Ok((c, _))) => Err(self.unrecognized(c, start)),
            Some(Err(_)) | None => Err(LexError::InvalidUtf8 {
                offset: self.absolute(start),
            }),
        }
    }

    // === Trivia ===

    fn whitespace(&mut self, start: usize) -> TokenType {
        self.pos = self.run_of(start, is_whitespace);
        TokenType::Whitespace
    }

    fn line_terminators(&mut self, start: usize) -> TokenType {
        self.pos = self.run_of(start, is_line_terminator);
        self.context.on_line_terminator();
        TokenType::LineTerminator
    }

    /// Single-line comment whose opener is `prefix` bytes long.
    fn line_comment(&mut self, start: usize, prefix: usize) -> TokenType {
        let mut i = start + prefix;
        loop {
            i = self.window.find_any(i, b"\n\r\xE2");
            if self.window.peek(i) == Some(0xE2) && !self.unicode_line_terminator_at(i) {
                i += 1;
            } else {
                break;
            }
        }
        self.pos = i;
        TokenType::Comment
    }

    /// Block comment; an unterminated one runs to end of input.
    fn block_comment(&mut self, start: usize) -> TokenType {
        let mut i = start + 2;
        let mut spans_lines = false;
        loop {
            i = self.window.find_any(i, b"*\n\r\xE2");
            match self.window.peek(i) {
                None => break,
                Some(b'*') if self.window.peek(i + 1) == Some(b'/') => {
                    i += 2;
                    break;
                }
                Some(b'\n' | b'\r') => {
                    spans_lines = true;
                    i += 1;
                }
                Some(0xE2) => {
                    spans_lines |= self.unicode_line_terminator_at(i);
                    i += 1;
                }
                Some(_) => i += 1,
            }
        }
        if spans_lines {
            self.context.on_line_terminator();
        }
        self.pos = i;
        TokenType::Comment
    }

    // === Identifiers ===

    fn identifier(&mut self, start: usize) -> Result<TokenType, LexError> {
        let mut i = start;
        loop {
            let class: fn(char) -> bool = if i == start {
                is_identifier_start
            } else {
                is_identifier_continue
            };
            match self.window.peek(i) {
                Some(b'\\') => match self.unicode_escape(i) {
                    Some(end) => i = end,
                    None => return Err(self.malformed(EscapeContext::Identifier, start)),
                },
                Some(b) if b.is_ascii() => {
                    let accepted = if i == start {
                        is_ascii_identifier_start(b)
                    } else {
                        is_ascii_identifier_continue(b)
                    };
                    if !accepted {
                        break;
                    }
                    i += 1;
                }
                Some(_) => match self.window.peek_char(i) {
                    Some(Ok((c, width))) if class(c) => i += width,
                    _ => break,
                },
                None => break,
            }
        }
        self.pos = i;
        self.context.on_identifier(self.window.slice(start, i));
        Ok(TokenType::Identifier)
    }

    /// `\uXXXX` or `\u{X...}` with the backslash at `backslash`.
    ///
    /// Returns the offset past the escape, or `None` when it is malformed.
    fn unicode_escape(&mut self, backslash: usize) -> Option<usize> {
        if self.window.peek(backslash + 1) != Some(b'u') {
            return None;
        }
        let body = backslash + 2;
        if self.window.peek(body) == Some(b'{') {
            let mut i = body + 1;
            let mut value = 0u32;
            while let Some(digit) = self.hex_digit(i) {
                value = (value * 16 + digit).min(MAX_CODE_POINT + 1);
                i += 1;
            }
            let closed = self.window.peek(i) == Some(b'}');
            return (i > body + 1 && value <= MAX_CODE_POINT && closed).then_some(i + 1);
        }
        (0..4)
            .all(|k| self.hex_digit(body + k).is_some())
            .then_some(body + 4)
    }

    fn hex_digit(&mut self, i: usize) -> Option<u32> {
        self.window
            .peek(i)
            .and_then(|b| char::from(b).to_digit(16))
    }

    // === Numbers ===

    fn number(&mut self, start: usize) -> TokenType {
        self.pos = self.numeric_end(start);
        self.context.on_literal();
        TokenType::Numeric
    }

    fn numeric_end(&mut self, start: usize) -> usize {
        let first = self.window.peek(start);
        if first == Some(b'0') {
            let radix = match self.window.peek(start + 1) {
                Some(b'x' | b'X') => Some(16),
                Some(b'o' | b'O') => Some(8),
                Some(b'b' | b'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                if !is_digit_byte(self.window.peek(start + 2), radix) {
                    return start + 1;
                }
                let end = self.digits(start + 2, radix);
                return self.bigint_suffix(end);
            }
            // Legacy leading zero: `0` alone unless a fraction or exponent follows.
            if !self.fraction_follows(start + 1) && self.exponent_digits(start + 1).is_none() {
                return self.bigint_suffix(start + 1);
            }
        }

        let mut i = if first == Some(b'.') {
            start
        } else {
            self.digits(start, 10)
        };
        let mut integer = true;
        if self.fraction_follows(i) {
            i = self.digits(i + 1, 10);
            integer = false;
        }
        if let Some(digits) = self.exponent_digits(i) {
            i = self.digits(digits, 10);
            integer = false;
        }
        if integer {
            self.bigint_suffix(i)
        } else {
            i
        }
    }

    /// Digits of `radix` from `from`, with `_` separators between digits.
    fn digits(&mut self, from: usize, radix: u32) -> usize {
        let mut i = from;
        loop {
            if is_digit_byte(self.window.peek(i), radix) {
                i += 1;
            } else if i > from
                && self.window.peek(i) == Some(b'_')
                && is_digit_byte(self.window.peek(i + 1), radix)
            {
                i += 1;
            } else {
                return i;
            }
        }
    }

    fn fraction_follows(&mut self, i: usize) -> bool {
        self.window.peek(i) == Some(b'.') && is_digit_byte(self.window.peek(i + 1), 10)
    }

    /// Offset of the exponent's first digit, if `i` starts a complete exponent.
    fn exponent_digits(&mut self, i: usize) -> Option<usize> {
        if !matches!(self.window.peek(i), Some(b'e' | b'E')) {
            return None;
        }
        let mut j = i + 1;
        if matches!(self.window.peek(j), Some(b'+' | b'-')) {
            j += 1;
        }
        is_digit_byte(self.window.peek(j), 10).then_some(j)
    }

    fn bigint_suffix(&mut self, i: usize) -> usize {
        if self.window.peek(i) == Some(b'n') {
            i + 1
        } else {
            i
        }
    }

    // === Strings & templates ===

    fn string(&mut self, start: usize, quote: u8) -> Result<TokenType, LexError> {
        let needles = [quote, b'\\', b'\n', b'\r', 0xE2];
        let mut i = start + 1;
        loop {
            i = self.window.find_any(i, &needles);
            match self.window.peek(i) {
                Some(b) if b == quote => {
                    i += 1;
                    break;
                }
                Some(b'\\') => match self.string_escape(i) {
                    Some(end) => i = end,
                    None => return Err(self.malformed(EscapeContext::String, start)),
                },
                Some(0xE2) if !self.unicode_line_terminator_at(i) => i += 1,
                // Single-quoted strings are accepted up to end of input.
                None if quote == b'\'' => break,
                _ => return Err(self.unterminated(Literal::String, start)),
            }
        }
        self.pos = i;
        self.context.on_literal();
        Ok(TokenType::String)
    }

    /// Escape sequence in a string with the backslash at `backslash`.
    fn string_escape(&mut self, backslash: usize) -> Option<usize> {
        let i = backslash;
        match self.window.peek(i + 1) {
            None => Some(i + 1),
            Some(b'\r') if self.window.peek(i + 2) == Some(b'\n') => Some(i + 3),
            Some(b'x') => (self.hex_digit(i + 2).is_some() && self.hex_digit(i + 3).is_some())
                .then_some(i + 4),
            Some(b'u') => self.unicode_escape(i),
            Some(0xE2) if self.unicode_line_terminator_at(i + 1) => Some(i + 4),
            // Octal, identity and single-byte line continuations.
            Some(_) => Some(i + 2),
        }
    }

    /// Template chunk from the backtick (or hole-closing `}`) at `start`.
    fn template(&mut self, start: usize, resumes: bool) -> Result<TokenType, LexError> {
        let mut i = start + 1;
        let opens_hole = loop {
            i = self.window.find_any(i, b"`\\$");
            match self.window.peek(i) {
                Some(b'`') => {
                    i += 1;
                    break false;
                }
                Some(b'\\') => i += 2,
                Some(b'$') if self.window.peek(i + 1) == Some(b'{') => {
                    i += 2;
                    break true;
                }
                Some(_) => i += 1,
                None => {
                    let opened_at = resumes
                        .then(|| self.context.open_template())
                        .flatten()
                        .unwrap_or_else(|| self.absolute(start));
                    return Err(LexError::UnterminatedLiteral {
                        literal: Literal::Template,
                        offset: opened_at,
                    });
                }
            }
        };
        self.pos = i;
        let offset = self.absolute(start);
        self.context.on_template(resumes, opens_hole, offset);
        Ok(TokenType::Template)
    }

    // === Slash: comments, regular expressions, division ===

    fn slash(&mut self, start: usize) -> Result<TokenType, LexError> {
        match self.window.peek(start + 1) {
            Some(b'/') => Ok(self.line_comment(start, 2)),
            Some(b'*') => Ok(self.block_comment(start)),
            _ if self.context.regex_allowed() => self.regexp(start),
            _ => self.punctuator(start),
        }
    }

    fn regexp(&mut self, start: usize) -> Result<TokenType, LexError> {
        let mut i = start + 1;
        let mut in_class = false;
        loop {
            i = self.window.find_any(i, b"/\\[]\n\r\xE2");
            match self.window.peek(i) {
                Some(b'/') => {
                    i += 1;
                    if !in_class {
                        break;
                    }
                }
                Some(b'\\')
                    if self.window.peek(i + 1).is_some() && !self.line_terminator_at(i + 1) =>
                {
                    i += 2;
                }
                Some(b'[') => {
                    in_class = true;
                    i += 1;
                }
                Some(b']') => {
                    in_class = false;
                    i += 1;
                }
                Some(0xE2) if !self.unicode_line_terminator_at(i) => i += 1,
                _ => return Err(self.unterminated(Literal::Regexp, start)),
            }
        }
        self.pos = self.run_of(i, is_identifier_continue);
        self.context.on_literal();
        Ok(TokenType::Regexp)
    }

    // === Punctuators ===

    fn punctuator(&mut self, start: usize) -> Result<TokenType, LexError> {
        // One byte past the longest lexeme decides `?.` before a digit.
        let mut look = [0u8; MAX_PUNCTUATOR_LEN + 1];
        let mut len = 0;
        while len < look.len() {
            let Some(b) = self.window.peek(start + len) else {
                break;
            };
            look[len] = b;
            len += 1;
        }
        let Some((punct, width)) = Punctuator::longest_match(&look[..len]) else {
            return Err(self.unrecognized(char::from(look[0]), start));
        };
        self.pos = start + width;
        self.context.on_punctuator(punct);
        Ok(TokenType::Punctuator)
    }

    // === Helpers ===

    /// End of the run of code points in `class` starting at `from`.
    fn run_of(&mut self, from: usize, class: fn(char) -> bool) -> usize {
        let mut i = from;
        while let Some(Ok((c, width))) = self.window.peek_char(i) {
            if !class(c) {
                break;
            }
            i += width;
        }
        i
    }

    fn followed_by(&mut self, at: usize, expected: &[u8]) -> bool {
        for (k, &b) in expected.iter().enumerate() {
            if self.window.peek(at + k) != Some(b) {
                return false;
            }
        }
        true
    }

    /// U+2028 or U+2029 encoded at `i`.
    fn unicode_line_terminator_at(&mut self, i: usize) -> bool {
        self.window.peek(i) == Some(0xE2)
            && self.window.peek(i + 1) == Some(0x80)
            && matches!(self.window.peek(i + 2), Some(0xA8 | 0xA9))
    }

    fn line_terminator_at(&mut self, i: usize) -> bool {
        matches!(self.window.peek(i), Some(b'\n' | b'\r')) || self.unicode_line_terminator_at(i)
    }

    fn malformed(&self, context: EscapeContext, start: usize) -> LexError {
        LexError::MalformedEscape {
            context,
            offset: self.absolute(start),
        }
    }

    fn unterminated(&self, literal: Literal, start: usize) -> LexError {
        LexError::UnterminatedLiteral {
            literal,
            offset: self.absolute(start),
        }
    }

    fn unrecognized(&self, found: char, start: usize) -> LexError {
        LexError::UnrecognizedCharacter {
            found,
            offset: self.absolute(start),
        }
    }
}

/// An owned token span, as collected by [`tokenize()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lexeme {
    pub ty: TokenType,
    pub span: Range<usize>,
}

/// Tokenize an in-memory source, collecting every token and the diagnosis.
///
/// For streaming access, construct a [`Lexer`] directly.
pub fn tokenize(source: &[u8]) -> (Vec<Lexeme>, LexError) {
    let mut lexer = Lexer::new(source);
    let mut lexemes = Vec::new();
    let mut end = 0;
    loop {
        let token = lexer.next();
        if token.is_error() {
            break;
        }
        let start = end;
        end += token.bytes.len();
        lexemes.push(Lexeme {
            ty: token.ty,
            span: start..end,
        });
    }
    let err = lexer.into_err().unwrap_or(LexError::EndOfInput);
    (lexemes, err)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
