use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// Why the lexer (or a traversal over it) latched into the invalid state.
///
/// The `Display` strings are stable diagnostics. No byte offset is attached:
/// for runs like `true&&false` it is deliberately unspecified which byte is
/// blamed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("bad encoding")]
    BadEncoding,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("control character in string")]
    ControlCharacter,
    #[error("unknown escape character")]
    UnknownEscape,
    #[error("unknown value")]
    UnknownValue,
    #[error("invalid number")]
    InvalidNumber,
    #[error("expected a value")]
    ExpectedValue,
    #[error("expected a member name")]
    ExpectedMemberName,
    #[error("expected ':'")]
    ExpectedColon,
    #[error("expected ',' or '}}'")]
    ExpectedObjectEnd,
    #[error("expected ',' or ']'")]
    ExpectedArrayEnd,
    /// A reader found a different kind of token than it asked for.
    #[error("expected {0}")]
    Mismatch(Expected),
    /// A number token did not fit the requested numeric type.
    #[error("{0}")]
    Number(NumberError),
    #[error("value rejected")]
    Rejected,
    #[error("nesting too deep")]
    DepthLimitExceeded,
}

impl SyntaxError {
    /// The diagnostic for a reader that wanted `what`.
    #[must_use]
    pub const fn expected(what: Expected) -> Self {
        match what {
            Expected::Value => SyntaxError::ExpectedValue,
            other => SyntaxError::Mismatch(other),
        }
    }
}

/// Failure to decode a number token into a numeric type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    #[error("malformed number")]
    Malformed,
    #[error("value is not an integer")]
    NotIntegral,
    #[error("value out of range")]
    Overflow,
    #[error("negative value for an unsigned type")]
    Negative,
}

/// What a tree-mode reader was looking at the current token for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Value,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Value => "a value",
            Expected::Null => "'null'",
            Expected::Boolean => "boolean",
            Expected::Number => "number",
            Expected::String => "string",
            Expected::Array => "'['",
            Expected::Object => "'{'",
        })
    }
}

/// Error returned by the tree builder and the top-level entry points.
///
/// Each variant carries the offending text where there is one, copied out of
/// the lexer before it moved on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid JSON: {error} ('{text}')")]
    Syntax { error: SyntaxError, text: String },
    #[error("invalid JSON: expected {expected}, but received '{found}'")]
    Unexpected { expected: Expected, found: String },
    #[error("invalid JSON: too much data ({0})")]
    TrailingData(String),
    #[error("invalid JSON object: duplicate member name '{0}'")]
    DuplicateMember(String),
    #[error("failed to parse number '{text}': {error}")]
    Number { text: String, error: NumberError },
}

impl ParseError {
    /// The lexical or structural classification, if this is a syntax error.
    #[must_use]
    pub fn syntax_error(&self) -> Option<SyntaxError> {
        match self {
            ParseError::Syntax { error, .. } => Some(*error),
            _ => None,
        }
    }
}
