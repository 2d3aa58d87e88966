//! Terminal diagnoses reported by the lexer.
//!
//! Every lexer run ends with exactly one [`LexError`]. [`LexError::EndOfInput`]
//! is the clean case; every other variant means the stream could not be
//! tokenized past the reported offset. Offsets are absolute byte offsets of
//! the start of the failing token.

use std::fmt;
use std::io;

use thiserror::Error;

/// Where a malformed escape sequence appeared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EscapeContext {
    Identifier,
    String,
}

impl fmt::Display for EscapeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EscapeContext::Identifier => "identifier",
            EscapeContext::String => "string literal",
        })
    }
}

/// Literal kinds that must be closed before a line terminator or end of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    String,
    Template,
    Regexp,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Literal::String => "string",
            Literal::Template => "template",
            Literal::Regexp => "regular expression",
        })
    }
}

/// Why tokenization stopped.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("end of input")]
    EndOfInput,

    #[error("malformed escape sequence in {context} at byte {offset}")]
    MalformedEscape { context: EscapeContext, offset: u64 },

    #[error("unterminated {literal} literal starting at byte {offset}")]
    UnterminatedLiteral { literal: Literal, offset: u64 },

    #[error("unrecognized character {found:?} at byte {offset}")]
    UnrecognizedCharacter { found: char, offset: u64 },

    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: u64 },

    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),
}

impl LexError {
    /// The input was fully tokenized.
    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, LexError::EndOfInput)
    }

    /// The underlying reader failed; the input itself may be fine.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, LexError::Io(_))
    }

    /// Absolute offset of the failing token, for malformed input.
    pub fn offset(&self) -> Option<u64> {
        match self {
            LexError::MalformedEscape { offset, .. }
            | LexError::UnterminatedLiteral { offset, .. }
            | LexError::UnrecognizedCharacter { offset, .. }
            | LexError::InvalidUtf8 { offset } => Some(*offset),
            LexError::EndOfInput | LexError::Io(_) => None,
        }
    }
}
