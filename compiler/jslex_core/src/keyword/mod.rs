//! Keyword table for the regex/division context.
//!
//! Only words whose presence changes what may follow them are listed. Soft
//! words such as `let` and `static` behave like identifiers for that purpose
//! and are left out; `async` and `of` are included because they can precede
//! a function expression or a regex operand.
//!
//! The lookup uses the word's length as a first-pass filter (keywords range
//! from 2 to 10 bytes), then matches the keywords of that length.

/// A word with a lexical effect on the following token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Async,
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Null,
    Of,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,
}

/// What a keyword does to the scan state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Ends an operand: `this`, `super`, `null`, `true`, `false`.
    Value,
    /// Introduces a parenthesized head whose `)` is a statement boundary.
    StatementHead,
    /// Begins a statement or clause: `else`, `do`, `try`, `finally`, `default`, `export`.
    Statement,
    /// Restricted production: a line terminator after it ends the statement.
    Restricted,
    Function,
    Class,
    Async,
    /// Any other keyword; an operand follows.
    Prefix,
}

/// Look up a keyword by its source bytes.
///
/// Escaped identifiers never match since the raw bytes contain `\`.
#[inline]
pub fn lookup(word: &[u8]) -> Option<Keyword> {
    if !(2..=10).contains(&word.len()) || !word[0].is_ascii_lowercase() {
        return None;
    }

    match word.len() {
        2 => match word {
            b"do" => Some(Keyword::Do),
            b"if" => Some(Keyword::If),
            b"in" => Some(Keyword::In),
            b"of" => Some(Keyword::Of),
            _ => None,
        },
        3 => match word {
            b"for" => Some(Keyword::For),
            b"new" => Some(Keyword::New),
            b"try" => Some(Keyword::Try),
            b"var" => Some(Keyword::Var),
            _ => None,
        },
        4 => match word {
            b"case" => Some(Keyword::Case),
            b"else" => Some(Keyword::Else),
            b"enum" => Some(Keyword::Enum),
            b"null" => Some(Keyword::Null),
            b"this" => Some(Keyword::This),
            b"true" => Some(Keyword::True),
            b"void" => Some(Keyword::Void),
            b"with" => Some(Keyword::With),
            _ => None,
        },
        5 => match word {
            b"async" => Some(Keyword::Async),
            b"await" => Some(Keyword::Await),
            b"break" => Some(Keyword::Break),
            b"catch" => Some(Keyword::Catch),
            b"class" => Some(Keyword::Class),
            b"const" => Some(Keyword::Const),
            b"false" => Some(Keyword::False),
            b"super" => Some(Keyword::Super),
            b"throw" => Some(Keyword::Throw),
            b"while" => Some(Keyword::While),
            b"yield" => Some(Keyword::Yield),
            _ => None,
        },
        6 => match word {
            b"delete" => Some(Keyword::Delete),
            b"export" => Some(Keyword::Export),
            b"import" => Some(Keyword::Import),
            b"return" => Some(Keyword::Return),
            b"switch" => Some(Keyword::Switch),
            b"typeof" => Some(Keyword::Typeof),
            _ => None,
        },
        7 => match word {
            b"default" => Some(Keyword::Default),
            b"extends" => Some(Keyword::Extends),
            b"finally" => Some(Keyword::Finally),
            _ => None,
        },
        8 => match word {
            b"continue" => Some(Keyword::Continue),
            b"debugger" => Some(Keyword::Debugger),
            b"function" => Some(Keyword::Function),
            _ => None,
        },
        10 => match word {
            b"instanceof" => Some(Keyword::Instanceof),
            _ => None,
        },
        _ => None,
    }
}

impl Keyword {
    /// Effect of the keyword on the following token.
    pub fn role(self) -> Role {
        match self {
            Keyword::This | Keyword::Super | Keyword::Null | Keyword::True | Keyword::False => {
                Role::Value
            }
            Keyword::If
            | Keyword::While
            | Keyword::For
            | Keyword::With
            | Keyword::Catch
            | Keyword::Switch => Role::StatementHead,
            Keyword::Else
            | Keyword::Do
            | Keyword::Try
            | Keyword::Finally
            | Keyword::Default
            | Keyword::Export => Role::Statement,
            Keyword::Return
            | Keyword::Yield
            | Keyword::Throw
            | Keyword::Break
            | Keyword::Continue => Role::Restricted,
            Keyword::Function => Role::Function,
            Keyword::Class => Role::Class,
            Keyword::Async => Role::Async,
            _ => Role::Prefix,
        }
    }

    /// Source text of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Async => "async",
            Keyword::Await => "await",
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Debugger => "debugger",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Of => "of",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::With => "with",
            Keyword::Yield => "yield",
        }
    }
}
