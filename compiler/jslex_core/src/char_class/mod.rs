//! Code point classification for the JavaScript lexical grammar.
//!
//! ASCII queries go through a 128-entry flag table; everything else falls back
//! to explicit code point lists (whitespace, line terminators) or the Unicode
//! `XID_Start` / `XID_Continue` tables from `unicode-xid`.

use unicode_xid::UnicodeXID;

/// ZERO WIDTH NON-JOINER, identifier-continue only.
pub const ZWNJ: char = '\u{200C}';
/// ZERO WIDTH JOINER, identifier-continue only.
pub const ZWJ: char = '\u{200D}';
/// LINE SEPARATOR.
pub const LS: char = '\u{2028}';
/// PARAGRAPH SEPARATOR.
pub const PS: char = '\u{2029}';

const WHITESPACE: u8 = 1 << 0;
const LINE_TERMINATOR: u8 = 1 << 1;
const ID_START: u8 = 1 << 2;
const ID_CONTINUE: u8 = 1 << 3;
const PUNCTUATOR: u8 = 1 << 4;

/// Flag table for the ASCII range.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..128, always fits in u8"
)]
static ASCII_CLASS: [u8; 128] = {
    let mut table = [0u8; 128];
    let mut i = 0usize;
    while i < 128 {
        let b = i as u8;
        let mut flags = 0;
        if matches!(b, b'\t' | 0x0B | 0x0C | b' ') {
            flags |= WHITESPACE;
        }
        if matches!(b, b'\n' | b'\r') {
            flags |= LINE_TERMINATOR;
        }
        if matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'$' | b'_') {
            flags |= ID_START | ID_CONTINUE;
        }
        if b.is_ascii_digit() {
            flags |= ID_CONTINUE;
        }
        if matches!(
            b,
            b'{' | b'}'
                | b'('
                | b')'
                | b'['
                | b']'
                | b'.'
                | b';'
                | b','
                | b'<'
                | b'>'
                | b'+'
                | b'-'
                | b'*'
                | b'/'
                | b'%'
                | b'&'
                | b'|'
                | b'^'
                | b'!'
                | b'~'
                | b'?'
                | b':'
                | b'='
        ) {
            flags |= PUNCTUATOR;
        }
        table[i] = flags;
        i += 1;
    }
    table
};

#[inline]
fn ascii_has(b: u8, flag: u8) -> bool {
    b.is_ascii() && ASCII_CLASS[usize::from(b)] & flag != 0
}

/// Whitespace: TAB, VT, FF, SP, NBSP, BOM and the `Zs` space separators.
pub fn is_whitespace(c: char) -> bool {
    if c.is_ascii() {
        return ascii_has(c as u8, WHITESPACE);
    }
    matches!(
        c,
        '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Line terminators: LF, CR, LS and PS. CRLF is two terminators in one run.
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | LS | PS)
}

/// `$`, `_`, and code points with the `XID_Start` property.
pub fn is_identifier_start(c: char) -> bool {
    if c.is_ascii() {
        return ascii_has(c as u8, ID_START);
    }
    c.is_xid_start()
}

/// `$`, `_`, `XID_Continue` code points, ZWNJ and ZWJ.
pub fn is_identifier_continue(c: char) -> bool {
    if c.is_ascii() {
        return ascii_has(c as u8, ID_CONTINUE);
    }
    c == ZWNJ || c == ZWJ || c.is_xid_continue()
}

/// ASCII-only form of [`is_identifier_start`] for the byte dispatch.
#[inline]
pub fn is_ascii_identifier_start(b: u8) -> bool {
    ascii_has(b, ID_START)
}

/// ASCII-only form of [`is_identifier_continue`] for the byte dispatch.
#[inline]
pub fn is_ascii_identifier_continue(b: u8) -> bool {
    ascii_has(b, ID_CONTINUE)
}

/// Bytes that begin at least one entry of the punctuator table.
#[inline]
pub fn is_punctuator_start(b: u8) -> bool {
    ascii_has(b, PUNCTUATOR)
}

/// Value of `c` as a digit in `radix` (2, 8, 10 or 16).
#[inline]
pub fn digit_value(c: char, radix: u32) -> Option<u32> {
    debug_assert!(matches!(radix, 2 | 8 | 10 | 16), "unsupported radix {radix}");
    c.to_digit(radix)
}

/// Byte form of [`digit_value`]; `None` for end of input.
#[inline]
pub fn is_digit_byte(b: Option<u8>, radix: u32) -> bool {
    b.is_some_and(|b| digit_value(char::from(b), radix).is_some())
}
