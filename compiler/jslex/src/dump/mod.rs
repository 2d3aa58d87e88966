//! Token dump: one line per token, then a summary line.
//!
//! Line format is `<offset>\t<TokenType>\t<text>`, where `<text>` is the
//! token's source with tabs, line terminators, backslashes and control
//! characters escaped so every token stays on one line.

use std::fmt::{self, Write as _};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use jslex_core::{LexError, Lexer, TokenType, WindowOptions};
use thiserror::Error;
use tracing::debug;

/// What to print and how to buffer the input.
#[derive(Clone, Copy, Debug, Default)]
pub struct DumpOptions {
    /// Print whitespace tokens too.
    pub all: bool,
    /// Release each token's bytes once it has been printed.
    pub release: bool,
    pub window: WindowOptions,
}

/// Counts reported after a clean run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub tokens: usize,
    pub printed: usize,
    pub bytes: u64,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl CliError {
    /// Process exit status: 1 for malformed input, 2 for I/O failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Lex(err) if !err.is_io() => 1,
            CliError::Open { .. } | CliError::Output(_) | CliError::Lex(_) => 2,
        }
    }
}

/// Tokenize `input`, writing the dump to `out`.
///
/// The summary line is written even when lexing stops on malformed input;
/// the diagnosis is then returned as [`CliError::Lex`].
pub fn run<R: Read, W: Write>(
    input: R,
    out: &mut W,
    options: &DumpOptions,
) -> Result<Summary, CliError> {
    let mut lexer = Lexer::with_options(input, options.window);
    let mut summary = Summary::default();
    loop {
        let token = lexer.next();
        if token.is_error() {
            break;
        }
        summary.tokens += 1;
        let len = token.bytes.len();
        if options.all || token.ty != TokenType::Whitespace {
            summary.printed += 1;
            writeln!(out, "{}\t{}\t{}", token.offset, token.ty, Escaped(token.bytes))
                .map_err(CliError::Output)?;
        }
        if options.release {
            lexer.release(len);
        }
    }
    summary.bytes = lexer.offset();

    let err = lexer.into_err().unwrap_or(LexError::EndOfInput);
    writeln!(
        out,
        "# {} tokens ({} printed), {} bytes: {err}",
        summary.tokens, summary.printed, summary.bytes
    )
    .map_err(CliError::Output)?;
    debug!(
        tokens = summary.tokens,
        bytes = summary.bytes,
        clean = err.is_end_of_input(),
        "dump finished"
    );

    if err.is_end_of_input() {
        Ok(summary)
    } else {
        Err(CliError::Lex(err))
    }
}

/// Token text with line-breaking and control characters escaped.
struct Escaped<'a>(&'a [u8]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in String::from_utf8_lossy(self.0).chars() {
            match c {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\\' => f.write_str("\\\\")?,
                c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                    write!(f, "\\u{{{:04X}}}", u32::from(c))?;
                }
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
