//! Streaming JavaScript tokenizer.
//!
//! This crate turns a byte stream into classified lexical tokens without
//! requiring the whole input in memory:
//!
//! - **Byte window** ([`SourceWindow`]) buffers a [`std::io::Read`] source and
//!   hands out zero-copy views until the caller releases them.
//! - **Classification** ([`char_class`]) covers the whitespace, line
//!   terminator and identifier code points of the language.
//! - **Lexer** ([`Lexer`]) produces one [`Token`] per call, including
//!   whitespace and comments, so spans concatenate back to the source.
//! - **Context** ([`context`]) decides whether `/` starts a regular expression
//!   or is division, and tracks template expression holes.
//! - **Diagnostics** ([`LexError`]) explain why the token stream ended.
//!
//! # Usage
//!
//! ```
//! use jslex_core::{Lexer, TokenType};
//!
//! let mut lexer = Lexer::new(&b"a = /b/g"[..]);
//! let mut types = Vec::new();
//! loop {
//!     let token = lexer.next();
//!     if token.is_error() {
//!         break;
//!     }
//!     if !token.ty.is_trivia() {
//!         types.push(token.ty);
//!     }
//! }
//! assert_eq!(types, [TokenType::Identifier, TokenType::Punctuator, TokenType::Regexp]);
//! assert!(lexer.err().is_some_and(|err| err.is_end_of_input()));
//! ```
//!
//! # Crate Dependencies
//!
//! Standalone: no `jslex_*` dependencies, so formatters and parsers can use
//! the tokenizer without the command-line front end.

pub mod char_class;
pub mod context;
mod error;
mod keyword;
mod lexer;
mod tag;
mod window;

pub use error::{EscapeContext, LexError, Literal};
pub use keyword::{lookup as lookup_keyword, Keyword, Role};
pub use lexer::{tokenize, Lexeme, Lexer, Token};
pub use tag::{Punctuator, TokenType, MAX_PUNCTUATOR_LEN, PUNCTUATORS};
pub use window::{utf8_char_width, InvalidUtf8, SourceWindow, WindowOptions, DEFAULT_CHUNK_SIZE};
