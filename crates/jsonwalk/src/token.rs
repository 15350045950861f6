use core::fmt;

/// Classification of the lexer's current token.
///
/// `Eof` and `Invalid` are terminal: `Eof` is a clean end of input, `Invalid`
/// is latched by the first error and never left again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Invalid,
    /// `{`
    CurlyOpen,
    /// `}`
    CurlyClose,
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,
    /// `,`
    Comma,
    /// `:`
    Colon,
    True,
    False,
    Null,
    /// A string literal; the token text holds the unescaped content.
    String,
    /// A number literal; the token text holds the literal as written.
    Number,
}

impl TokenKind {
    /// `true` for `Eof` and `Invalid`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Invalid)
    }

    /// `true` for tokens that can start a value.
    #[must_use]
    pub const fn starts_value(self) -> bool {
        matches!(
            self,
            TokenKind::CurlyOpen
                | TokenKind::BracketOpen
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::String
                | TokenKind::Number
        )
    }

    /// The fixed spelling of punctuation and keyword tokens.
    #[must_use]
    pub const fn literal(self) -> Option<&'static str> {
        match self {
            TokenKind::CurlyOpen => Some("{"),
            TokenKind::CurlyClose => Some("}"),
            TokenKind::BracketOpen => Some("["),
            TokenKind::BracketClose => Some("]"),
            TokenKind::Comma => Some(","),
            TokenKind::Colon => Some(":"),
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            TokenKind::Eof | TokenKind::Invalid | TokenKind::String | TokenKind::Number => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            Some(lit) => write!(f, "'{lit}'"),
            None => f.write_str(match self {
                TokenKind::Eof => "end of input",
                TokenKind::Invalid => "invalid token",
                TokenKind::String => "string",
                _ => "number",
            }),
        }
    }
}

/// Keyword still being matched after its first byte.
///
/// Only the remaining bytes are kept; [`step`](Self::step) walks them one at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectedKeyword {
    rest: &'static [u8],
    kind: TokenKind,
}

/// What happened after feeding one more byte into the keyword matcher.
pub(crate) enum Step {
    /// Byte matched, but the keyword is not finished yet.
    NeedMore,
    /// Byte matched and it was the last one.
    Done(TokenKind),
    /// Byte did not match, or no byte was available.
    Reject,
}

impl ExpectedKeyword {
    /// Starts matching after the first byte (`n`, `t` or `f`).
    pub(crate) fn new(first: u8) -> Option<Self> {
        let (rest, kind): (&'static [u8], _) = match first {
            b'n' => (b"ull", TokenKind::Null),
            b't' => (b"rue", TokenKind::True),
            b'f' => (b"alse", TokenKind::False),
            _ => return None,
        };
        Some(Self { rest, kind })
    }

    pub(crate) fn step(&mut self, byte: Option<u8>) -> Step {
        match self.rest.split_first() {
            Some((&expected, rest)) if Some(expected) == byte => {
                self.rest = rest;
                if rest.is_empty() {
                    Step::Done(self.kind)
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(first: u8, rest: &[u8]) -> Option<TokenKind> {
        let mut kw = ExpectedKeyword::new(first)?;
        for &b in rest {
            match kw.step(Some(b)) {
                Step::NeedMore => {}
                Step::Done(kind) => return Some(kind),
                Step::Reject => return None,
            }
        }
        None
    }

    #[test]
    fn keywords_match() {
        assert_eq!(run(b'n', b"ull"), Some(TokenKind::Null));
        assert_eq!(run(b't', b"rue"), Some(TokenKind::True));
        assert_eq!(run(b'f', b"alse"), Some(TokenKind::False));
    }

    #[test]
    fn keyword_mismatch_and_truncation() {
        assert_eq!(run(b'n', b"ul!"), None);
        assert_eq!(run(b't', b"ru"), None);
        assert_eq!(run(b'x', b"yz"), None);
        let mut kw = ExpectedKeyword::new(b'f').unwrap();
        assert!(matches!(kw.step(None), Step::Reject));
    }

    #[test]
    fn display_uses_spelling() {
        assert_eq!(alloc::format!("{}", TokenKind::Colon), "':'");
        assert_eq!(alloc::format!("{}", TokenKind::Eof), "end of input");
        assert!(TokenKind::Number.starts_value());
        assert!(!TokenKind::Comma.starts_value());
    }
}
