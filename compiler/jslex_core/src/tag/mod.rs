//! Token categories and the punctuator table.
//!
//! [`TokenType`] is the closed set of categories the lexer emits. It is a
//! one-byte tag; [`TokenType::name_of()`] renders any byte, including values
//! outside the set, for diagnostics.
//!
//! [`Punctuator`] names every operator and delimiter. The lexer resolves a
//! punctuator by longest match over [`PUNCTUATORS`], which is ordered
//! longest-first so the first hit is the longest valid operator at the
//! current position (`>>>=>` resolves to `>>>=` then `>`).

use std::borrow::Cow;
use std::fmt;

/// Category of a lexical token.
///
/// Every byte of valid input belongs to exactly one token, trivia included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenType {
    /// Terminal condition: end of input or malformed input. See `Lexer::err()`.
    Error = 0,
    Whitespace = 1,
    LineTerminator = 2,
    /// Line, block, hashbang and HTML-like comments.
    Comment = 3,
    /// Identifiers and keywords (keywords are not distinguished here).
    Identifier = 4,
    Punctuator = 5,
    Numeric = 6,
    String = 7,
    Regexp = 8,
    /// One template chunk: from a backtick or hole-closing `}` to the next
    /// `${` or closing backtick.
    Template = 9,
}

/// Size assertion: the tag stays one byte.
const _: () = assert!(std::mem::size_of::<TokenType>() == 1);

impl TokenType {
    /// All token types in tag order.
    pub const ALL: [TokenType; 10] = [
        TokenType::Error,
        TokenType::Whitespace,
        TokenType::LineTerminator,
        TokenType::Comment,
        TokenType::Identifier,
        TokenType::Punctuator,
        TokenType::Numeric,
        TokenType::String,
        TokenType::Regexp,
        TokenType::Template,
    ];

    /// Convert a raw tag back into a token type.
    pub fn from_u8(tag: u8) -> Option<TokenType> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    /// Stable human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            TokenType::Error => "Error",
            TokenType::Whitespace => "Whitespace",
            TokenType::LineTerminator => "LineTerminator",
            TokenType::Comment => "Comment",
            TokenType::Identifier => "Identifier",
            TokenType::Punctuator => "Punctuator",
            TokenType::Numeric => "Numeric",
            TokenType::String => "String",
            TokenType::Regexp => "Regexp",
            TokenType::Template => "Template",
        }
    }

    /// Name of any raw tag; `Invalid(n)` for bytes outside the set.
    pub fn name_of(tag: u8) -> Cow<'static, str> {
        match Self::from_u8(tag) {
            Some(ty) => Cow::Borrowed(ty.name()),
            None => Cow::Owned(format!("Invalid({tag})")),
        }
    }

    /// Whitespace, line terminators and comments.
    ///
    /// Trivia never influences the regex/division decision.
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenType::Whitespace | TokenType::LineTerminator | TokenType::Comment
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operators and delimiters of the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punctuator {
    // Delimiters
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    Ellipsis,
    Semicolon,
    Comma,
    Colon,
    Question,
    QuestionDot,
    FatArrow,

    // Comparison
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    BangEqual,
    EqualEqualEqual,
    BangEqualEqual,

    // Arithmetic & bitwise
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Shl,
    Shr,
    UShr,
    Ampersand,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpersandAmpersand,
    PipePipe,
    QuestionQuestion,

    // Assignment
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    StarStarEqual,
    SlashEqual,
    PercentEqual,
    ShlEqual,
    ShrEqual,
    UShrEqual,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,
    AmpersandAmpersandEqual,
    PipePipeEqual,
    QuestionQuestionEqual,
}

/// Punctuator table, longest lexemes first.
pub static PUNCTUATORS: &[(&[u8], Punctuator)] = &[
    // 4 bytes
    (b">>>=", Punctuator::UShrEqual),
    // 3 bytes
    (b"===", Punctuator::EqualEqualEqual),
    (b"!==", Punctuator::BangEqualEqual),
    (b"**=", Punctuator::StarStarEqual),
    (b"<<=", Punctuator::ShlEqual),
    (b">>=", Punctuator::ShrEqual),
    (b">>>", Punctuator::UShr),
    (b"...", Punctuator::Ellipsis),
    (b"&&=", Punctuator::AmpersandAmpersandEqual),
    (b"||=", Punctuator::PipePipeEqual),
    (b"??=", Punctuator::QuestionQuestionEqual),
    // 2 bytes
    (b"=>", Punctuator::FatArrow),
    (b"==", Punctuator::EqualEqual),
    (b"!=", Punctuator::BangEqual),
    (b"<=", Punctuator::LessEqual),
    (b">=", Punctuator::GreaterEqual),
    (b"&&", Punctuator::AmpersandAmpersand),
    (b"||", Punctuator::PipePipe),
    (b"??", Punctuator::QuestionQuestion),
    (b"?.", Punctuator::QuestionDot),
    (b"++", Punctuator::PlusPlus),
    (b"--", Punctuator::MinusMinus),
    (b"+=", Punctuator::PlusEqual),
    (b"-=", Punctuator::MinusEqual),
    (b"*=", Punctuator::StarEqual),
    (b"/=", Punctuator::SlashEqual),
    (b"%=", Punctuator::PercentEqual),
    (b"&=", Punctuator::AmpersandEqual),
    (b"|=", Punctuator::PipeEqual),
    (b"^=", Punctuator::CaretEqual),
    (b"<<", Punctuator::Shl),
    (b">>", Punctuator::Shr),
    (b"**", Punctuator::StarStar),
    // 1 byte
    (b"{", Punctuator::LeftBrace),
    (b"}", Punctuator::RightBrace),
    (b"(", Punctuator::LeftParen),
    (b")", Punctuator::RightParen),
    (b"[", Punctuator::LeftBracket),
    (b"]", Punctuator::RightBracket),
    (b".", Punctuator::Dot),
    (b";", Punctuator::Semicolon),
    (b",", Punctuator::Comma),
    (b":", Punctuator::Colon),
    (b"?", Punctuator::Question),
    (b"<", Punctuator::Less),
    (b">", Punctuator::Greater),
    (b"+", Punctuator::Plus),
    (b"-", Punctuator::Minus),
    (b"*", Punctuator::Star),
    (b"/", Punctuator::Slash),
    (b"%", Punctuator::Percent),
    (b"&", Punctuator::Ampersand),
    (b"|", Punctuator::Pipe),
    (b"^", Punctuator::Caret),
    (b"!", Punctuator::Bang),
    (b"~", Punctuator::Tilde),
    (b"=", Punctuator::Equal),
];

/// Length of the longest punctuator lexeme.
pub const MAX_PUNCTUATOR_LEN: usize = 4;

impl Punctuator {
    /// Longest punctuator that is a prefix of `bytes`, with its byte length.
    ///
    /// `?.` followed by a decimal digit is `?` (the conditional operator
    /// before a number like `.5`), not optional chaining.
    pub fn longest_match(bytes: &[u8]) -> Option<(Punctuator, usize)> {
        let first = *bytes.first()?;
        let &(lexeme, punct) = PUNCTUATORS
            .iter()
            .find(|(lexeme, _)| lexeme[0] == first && bytes.starts_with(lexeme))?;
        if punct == Punctuator::QuestionDot && bytes.get(lexeme.len()).is_some_and(u8::is_ascii_digit)
        {
            return Some((Punctuator::Question, 1));
        }
        Some((punct, lexeme.len()))
    }

    /// Exact lookup of a complete lexeme.
    #[cfg(test)]
    pub(crate) fn from_lexeme(bytes: &[u8]) -> Option<Punctuator> {
        PUNCTUATORS
            .iter()
            .find(|(lexeme, _)| *lexeme == bytes)
            .map(|&(_, punct)| punct)
    }

    /// Source text of the punctuator.
    pub fn lexeme(self) -> &'static str {
        PUNCTUATORS
            .iter()
            .find(|&&(_, punct)| punct == self)
            .and_then(|(lexeme, _)| std::str::from_utf8(lexeme).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Punctuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}
