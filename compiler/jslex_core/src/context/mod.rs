//! Backward syntactic context for the regex/division decision.
//!
//! A `/` starts a regular expression exactly when an operand is expected. The
//! lexer cannot parse, so it approximates "operand expected" from the last
//! significant token and a stack of open delimiters:
//!
//! - [`ScanState`] classifies the previous significant token.
//! - [`Frame`]s record open parentheses, braces (with their kind) and template
//!   holes, so a `)` or `}` knows what it closes.
//! - `function` and `class` push header frames so the brace that opens the
//!   body remembers whether the construct was a declaration or an expression.
//!
//! Trivia never changes the state, with one exception: a line terminator
//! after `return`, `yield`, `throw`, `break` or `continue` ends the statement.

use smallvec::SmallVec;

use crate::keyword::{self, Keyword, Role};
use crate::tag::Punctuator;

/// Classification of the previous significant token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Start of input or of a statement.
    Statement,
    /// Inside an expression, after a punctuator or operator keyword.
    Operand,
    /// After a complete operand.
    Operator,
    /// After `if`, `while`, `for`, `with`, `catch` or `switch`.
    StatementHead,
    /// After `.` or `?.`, or right after the `{` of an object literal.
    PropertyName,
    /// After `=>`.
    Arrow,
}

impl ScanState {
    /// An operand (and therefore a regex) may come next.
    #[inline]
    pub fn expects_operand(self) -> bool {
        matches!(
            self,
            ScanState::Statement | ScanState::Operand | ScanState::StatementHead | ScanState::Arrow
        )
    }
}

/// Whether a `function` or `class` is a declaration or an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construct {
    Declaration,
    Expression,
}

/// An open delimiter or a pending construct header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    /// `(` after a statement head keyword.
    StatementParens,
    Parens,
    /// Parameter list of a function.
    Params(Construct),
    Block,
    Object,
    /// Function or class body.
    Body(Construct),
    /// `${` inside a template literal, with the absolute offset of the
    /// template's opening backtick.
    TemplateHole(u64),
    /// `function` seen, parameter list not yet open.
    FunctionHeader(Construct),
    /// `class` seen, body not yet open.
    ClassHeader(Construct),
    /// Parameter list closed, body brace expected next.
    BodyNext(Construct),
}

impl Frame {
    fn closes_with_brace(self) -> bool {
        matches!(
            self,
            Frame::Block | Frame::Object | Frame::Body(_) | Frame::TemplateHole(_)
        )
    }

    fn is_header(self) -> bool {
        matches!(
            self,
            Frame::FunctionHeader(_) | Frame::ClassHeader(_) | Frame::BodyNext(_)
        )
    }
}

fn construct_for(state: ScanState) -> Construct {
    match state {
        ScanState::Operand | ScanState::Arrow => Construct::Expression,
        _ => Construct::Declaration,
    }
}

/// Context tracker driven by the lexer after every token.
#[derive(Clone, Debug)]
pub struct ScanContext {
    state: ScanState,
    frames: SmallVec<[Frame; 16]>,
    /// A restricted production keyword was the last significant token.
    restricted: bool,
    /// Only trivia since the last line terminator or the start of input.
    line_start: bool,
    /// State before a preceding `async`, for `async function`.
    before_async: Option<ScanState>,
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanContext {
    pub fn new() -> Self {
        Self {
            state: ScanState::Statement,
            frames: SmallVec::new(),
            restricted: false,
            line_start: true,
            before_async: None,
        }
    }

    #[inline]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// A `/` here starts a regular expression.
    #[inline]
    pub fn regex_allowed(&self) -> bool {
        self.state.expects_operand()
    }

    /// Only trivia since the last line terminator (HTML-like `-->` comments).
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.line_start
    }

    /// Number of open frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The next `}` closes a template hole rather than a brace.
    pub fn right_brace_resumes_template(&self) -> bool {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.closes_with_brace())
            .is_some_and(|frame| matches!(frame, Frame::TemplateHole(_)))
    }

    /// Offset of the backtick opening the innermost template still open.
    pub fn open_template(&self) -> Option<u64> {
        self.frames.iter().rev().find_map(|frame| match *frame {
            Frame::TemplateHole(opened_at) => Some(opened_at),
            _ => None,
        })
    }

    /// Record a line terminator (or a block comment spanning lines).
    pub fn on_line_terminator(&mut self) {
        self.line_start = true;
        self.before_async = None;
        if self.restricted {
            self.restricted = false;
            self.state = ScanState::Statement;
        }
    }

    /// Record an identifier or keyword given its raw source bytes.
    pub fn on_identifier(&mut self, word: &[u8]) {
        let before_async = self.begin_token();
        self.take_body_next();

        if self.state == ScanState::PropertyName {
            self.state = ScanState::Operator;
            return;
        }
        let Some(kw) = keyword::lookup(word) else {
            self.state = ScanState::Operator;
            return;
        };

        self.state = match kw.role() {
            Role::Value => ScanState::Operator,
            Role::StatementHead => ScanState::StatementHead,
            Role::Statement => ScanState::Statement,
            Role::Restricted => {
                self.restricted = true;
                ScanState::Operand
            }
            Role::Function => {
                let kind = construct_for(before_async.unwrap_or(self.state));
                self.frames.push(Frame::FunctionHeader(kind));
                ScanState::Operator
            }
            Role::Class => {
                self.frames.push(Frame::ClassHeader(construct_for(self.state)));
                ScanState::Operator
            }
            Role::Async => {
                self.before_async = Some(self.state);
                ScanState::Operator
            }
            // `for await (`
            Role::Prefix if kw == Keyword::Await && self.state == ScanState::StatementHead => {
                ScanState::StatementHead
            }
            Role::Prefix => ScanState::Operand,
        };
    }

    /// Record a punctuator.
    pub fn on_punctuator(&mut self, punct: Punctuator) {
        let previous = self.state;
        self.begin_token();
        let body = self.take_body_next();

        self.state = match punct {
            Punctuator::LeftParen => self.open_paren(),
            Punctuator::RightParen => self.close_paren(),
            Punctuator::LeftBrace => self.open_brace(body),
            Punctuator::RightBrace => self.close_brace(),
            Punctuator::RightBracket => ScanState::Operator,
            Punctuator::FatArrow => ScanState::Arrow,
            Punctuator::Dot | Punctuator::QuestionDot => ScanState::PropertyName,
            Punctuator::Semicolon => ScanState::Statement,
            // Postfix keeps the operand complete.
            Punctuator::PlusPlus | Punctuator::MinusMinus if previous == ScanState::Operator => {
                ScanState::Operator
            }
            _ => ScanState::Operand,
        };
    }

    /// Record a numeric, string or regular expression literal.
    pub fn on_literal(&mut self) {
        self.begin_token();
        self.take_body_next();
        self.state = ScanState::Operator;
    }

    /// Record a template chunk.
    ///
    /// `resumes` is set when the chunk starts at the `}` closing a hole;
    /// `opens_hole` when it ends in `${`. `offset` is the chunk's absolute
    /// offset; a resumed chunk keeps the offset of its template's backtick.
    pub fn on_template(&mut self, resumes: bool, opens_hole: bool, offset: u64) {
        self.begin_token();
        self.take_body_next();
        let mut opened_at = offset;
        if resumes {
            while let Some(frame) = self.frames.pop() {
                if let Frame::TemplateHole(at) = frame {
                    opened_at = at;
                    break;
                }
            }
        }
        if opens_hole {
            self.frames.push(Frame::TemplateHole(opened_at));
            self.state = ScanState::Operand;
        } else {
            self.state = ScanState::Operator;
        }
    }

    /// Common bookkeeping for a significant token.
    fn begin_token(&mut self) -> Option<ScanState> {
        self.line_start = false;
        self.restricted = false;
        self.before_async.take()
    }

    fn take_body_next(&mut self) -> Option<Construct> {
        if let Some(&Frame::BodyNext(kind)) = self.frames.last() {
            self.frames.pop();
            return Some(kind);
        }
        None
    }

    fn open_paren(&mut self) -> ScanState {
        if let Some(&Frame::FunctionHeader(kind)) = self.frames.last() {
            self.frames.pop();
            self.frames.push(Frame::Params(kind));
        } else if self.state == ScanState::StatementHead {
            self.frames.push(Frame::StatementParens);
        } else {
            self.frames.push(Frame::Parens);
        }
        ScanState::Operand
    }

    fn close_paren(&mut self) -> ScanState {
        while self.frames.last().is_some_and(|frame| frame.is_header()) {
            self.frames.pop();
        }
        match self.frames.last().copied() {
            Some(Frame::StatementParens) => {
                self.frames.pop();
                ScanState::Statement
            }
            Some(Frame::Parens) => {
                self.frames.pop();
                ScanState::Operator
            }
            Some(Frame::Params(kind)) => {
                self.frames.pop();
                self.frames.push(Frame::BodyNext(kind));
                ScanState::Operator
            }
            // Unbalanced `)`.
            _ => ScanState::Operator,
        }
    }

    fn open_brace(&mut self, body: Option<Construct>) -> ScanState {
        if let Some(kind) = body {
            self.frames.push(Frame::Body(kind));
            return ScanState::Statement;
        }
        if let Some(&Frame::ClassHeader(kind)) = self.frames.last() {
            self.frames.pop();
            self.frames.push(Frame::Body(kind));
            return ScanState::Statement;
        }
        match self.state {
            ScanState::Statement
            | ScanState::Operator
            | ScanState::StatementHead
            | ScanState::Arrow => {
                self.frames.push(Frame::Block);
                ScanState::Statement
            }
            ScanState::Operand | ScanState::PropertyName => {
                self.frames.push(Frame::Object);
                ScanState::PropertyName
            }
        }
    }

    fn close_brace(&mut self) -> ScanState {
        while let Some(frame) = self.frames.pop() {
            match frame {
                Frame::Block | Frame::Body(Construct::Declaration) => return ScanState::Statement,
                Frame::Object | Frame::Body(Construct::Expression) => return ScanState::Operator,
                Frame::TemplateHole(_) => {
                    self.frames.push(frame);
                    return ScanState::Operator;
                }
                _ => {}
            }
        }
        ScanState::Statement
    }
}

#[cfg(test)]
mod tests;
