//! The JSON tokenizer.
//!
//! [`Lexer`] pulls bytes from an [`InputSource`] and keeps exactly one current
//! token: its [`TokenKind`] and its text. [`Lexer::advance`] replaces both in
//! place.
//!
//! # Token text lifetime
//!
//! The lexer owns a single text buffer that is cleared and refilled by every
//! call to [`advance`](Lexer::advance). A borrow from [`text`](Lexer::text) is
//! therefore only good until the next advance; consumers that need to keep the
//! text copy it out, or trade buffers with [`swap_text`](Lexer::swap_text) so
//! no allocation is lost.
//!
//! # Latching
//!
//! The first lexical or structural error moves the lexer to
//! [`TokenKind::Invalid`]. From then on `advance` does nothing and the
//! diagnostic stays available through [`error`](Lexer::error).
//!
//! # Examples
//!
//! ```rust
//! use jsonwalk::{Lexer, SliceSource, TokenKind};
//!
//! let mut lexer = Lexer::new(SliceSource::from(r#"{"k": -1.5e3}"#));
//! let mut seen = Vec::new();
//! while !lexer.kind().is_terminal() {
//!     seen.push((lexer.kind(), lexer.text().to_string()));
//!     lexer.advance();
//! }
//! assert_eq!(lexer.kind(), TokenKind::Eof);
//! assert_eq!(seen[1], (TokenKind::String, "k".to_string()));
//! assert_eq!(seen[3], (TokenKind::Number, "-1.5e3".to_string()));
//! ```
use alloc::{string::String, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::{
    error::{Expected, ParseError, SyntaxError},
    options::ParserOptions,
    source::InputSource,
    token::{ExpectedKeyword, Step, TokenKind},
    unicode,
};

/// Bytes allowed to directly follow a keyword or number literal.
#[inline]
const fn is_separator(byte: u8) -> bool {
    matches!(
        byte,
        b' ' | b'\n' | b'\r' | b'\t' | b'{' | b'}' | b'[' | b']' | b',' | b':' | b'"'
    )
}

#[inline]
const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
}

#[inline]
const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Pull-based JSON tokenizer over an [`InputSource`].
///
/// Construction already lexes the first token. A lexer is bound to one source
/// for its whole life and is consumed linearly; it cannot be rewound.
#[derive(Debug)]
pub struct Lexer<S> {
    source: S,
    kind: TokenKind,
    text: Vec<u8>,
    error: Option<SyntaxError>,
    depth: usize,
    options: ParserOptions,
}

impl<S: InputSource> Lexer<S> {
    /// Creates a lexer with default [`ParserOptions`] and lexes the first
    /// token.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    /// Creates a lexer with explicit `options` and lexes the first token.
    pub fn with_options(source: S, options: ParserOptions) -> Self {
        let mut lexer = Self {
            source,
            kind: TokenKind::Eof,
            text: Vec::new(),
            error: None,
            depth: 0,
            options,
        };
        lexer.advance();
        lexer
    }

    /// Kind of the current token.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Text of the current token.
    ///
    /// Strings are fully unescaped, numbers are the literal as written,
    /// punctuation and keywords are their spelling. After a lexical error the
    /// text is empty; after a structural error it is the offending token.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &BStr {
        self.text.as_bstr()
    }

    /// Diagnostic for the latched invalid state.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<SyntaxError> {
        self.error
    }

    /// Whether the lexer has latched into the invalid state.
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.kind == TokenKind::Invalid
    }

    /// Options this lexer and every traversal over it run with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Trades the token text buffer with `other`.
    ///
    /// The next advance writes into the buffer handed in, so alternating two
    /// buffers keeps a token's text alive without any copying.
    pub fn swap_text(&mut self, other: &mut Vec<u8>) {
        core::mem::swap(&mut self.text, other);
    }

    /// Moves the token text out, leaving an empty buffer behind.
    pub fn take_text(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.text)
    }

    /// The underlying input source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The underlying input source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the lexer, returning the source positioned after the current
    /// token.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Latches the lexer into the invalid state with `error`, keeping the
    /// current text for diagnostics.
    ///
    /// An already latched error is kept. Always returns `false`, so callbacks
    /// can `return lexer.fail(..)`.
    pub fn fail(&mut self, error: SyntaxError) -> bool {
        if self.kind != TokenKind::Invalid {
            self.latch(error);
        }
        false
    }

    /// Builds the error a tree-mode reader reports when the current token is
    /// not what it `expected`.
    #[must_use]
    pub fn error_for(&self, expected: Expected) -> ParseError {
        let text = self.text_lossy();
        match (self.kind, self.error) {
            (TokenKind::Invalid, Some(SyntaxError::Number(error))) => {
                ParseError::Number { text, error }
            }
            (TokenKind::Invalid, error) => ParseError::Syntax {
                error: error.unwrap_or(SyntaxError::Rejected),
                text,
            },
            _ => ParseError::Unexpected {
                expected,
                found: text,
            },
        }
    }

    pub(crate) fn text_lossy(&self) -> String {
        self.text.to_str_lossy().into_owned()
    }

    /// Opens one more array or object level.
    pub(crate) fn enter_nested(&mut self) -> bool {
        if self.options.max_depth.is_some_and(|max| self.depth >= max) {
            return self.fail(SyntaxError::DepthLimitExceeded);
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Lexes the next token, overwriting the current one.
    ///
    /// Does nothing once the lexer is invalid.
    pub fn advance(&mut self) {
        if self.kind == TokenKind::Invalid {
            return;
        }

        self.text.clear();
        match self.lex_token() {
            Ok(kind) => self.kind = kind,
            Err(error) => {
                self.text.clear();
                self.latch(error);
            }
        }
    }

    fn latch(&mut self, error: SyntaxError) {
        tracing::debug!(%error, text = %self.text.as_bstr(), "lexer latched invalid");
        self.kind = TokenKind::Invalid;
        self.error = Some(error);
    }

    fn skip_whitespace(&mut self) {
        while self.source.peek().is_some_and(is_whitespace) {
            self.source.next_byte();
        }
    }

    /// Error for a missing byte: `fallback` when the input simply ended,
    /// `BadEncoding` when the source failed.
    fn missing(&self, fallback: SyntaxError) -> SyntaxError {
        if self.source.is_healthy() {
            fallback
        } else {
            SyntaxError::BadEncoding
        }
    }

    /// Error for a string cut short.
    fn truncated(&self) -> SyntaxError {
        if self.source.at_end() {
            SyntaxError::UnterminatedString
        } else {
            SyntaxError::BadEncoding
        }
    }

    fn lex_token(&mut self) -> Result<TokenKind, SyntaxError> {
        self.skip_whitespace();
        let Some(byte) = self.source.next_byte() else {
            return if self.source.at_end() {
                Ok(TokenKind::Eof)
            } else {
                Err(SyntaxError::BadEncoding)
            };
        };

        let kind = match byte {
            b'{' => TokenKind::CurlyOpen,
            b'}' => TokenKind::CurlyClose,
            b'[' => TokenKind::BracketOpen,
            b']' => TokenKind::BracketClose,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'"' => {
                self.lex_string()?;
                return Ok(TokenKind::String);
            }
            b'n' | b't' | b'f' => return self.lex_keyword(byte),
            _ => {
                self.lex_number(byte)?;
                return Ok(TokenKind::Number);
            }
        };
        self.text.push(byte);
        Ok(kind)
    }

    /// A keyword or number must be followed by the end of input or a
    /// separator, so `truefalse` and `123abc` are rejected as a whole.
    fn check_separator(&mut self, error: SyntaxError) -> Result<(), SyntaxError> {
        match self.source.peek() {
            Some(byte) if is_separator(byte) => Ok(()),
            Some(_) => Err(error),
            None if self.source.at_end() => Ok(()),
            None => Err(SyntaxError::BadEncoding),
        }
    }

    fn lex_keyword(&mut self, first: u8) -> Result<TokenKind, SyntaxError> {
        let Some(mut keyword) = ExpectedKeyword::new(first) else {
            return Err(SyntaxError::UnknownValue);
        };

        let kind = loop {
            match keyword.step(self.source.next_byte()) {
                Step::NeedMore => {}
                Step::Done(kind) => break kind,
                Step::Reject => return Err(self.missing(SyntaxError::UnknownValue)),
            }
        };

        self.check_separator(SyntaxError::UnknownValue)?;
        self.text
            .extend_from_slice(kind.literal().unwrap_or_default().as_bytes());
        Ok(kind)
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------

    fn lex_string(&mut self) -> Result<(), SyntaxError> {
        loop {
            let Some(byte) = self.source.next_byte() else {
                return Err(self.truncated());
            };

            match byte {
                b'"' => return Ok(()),
                b'\\' => {
                    let selector = self.source.next_byte();
                    self.lex_escape(selector)?;
                }
                0x00..=0x1F => return Err(SyntaxError::ControlCharacter),
                0x20..=0x7F => self.text.push(byte),
                _ => self.lex_multibyte(byte)?,
            }
        }
    }

    /// Copies one multi-byte UTF-8 sequence, rejecting anything that is not
    /// the shortest encoding of a Unicode scalar value.
    fn lex_multibyte(&mut self, lead: u8) -> Result<(), SyntaxError> {
        let len = unicode::sequence_len(lead);
        if len < 2 {
            return Err(SyntaxError::BadEncoding);
        }

        let mut seq = [lead, 0, 0, 0];
        for slot in &mut seq[1..len] {
            match self.source.next_byte() {
                Some(byte) if unicode::is_continuation(byte) => *slot = byte,
                Some(_) => return Err(SyntaxError::BadEncoding),
                None => return Err(self.truncated()),
            }
        }

        match unicode::decode_one(&seq[..len]) {
            Some((cp, _)) if unicode::encoded_len(cp) == len && char::from_u32(cp).is_some() => {
                self.text.extend_from_slice(&seq[..len]);
                Ok(())
            }
            _ => Err(SyntaxError::BadEncoding),
        }
    }

    /// Handles the byte after a backslash.
    fn lex_escape(&mut self, selector: Option<u8>) -> Result<(), SyntaxError> {
        let unescaped = match selector {
            Some(b @ (b'"' | b'\\' | b'/')) => b,
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => return self.lex_unicode_escape(),
            Some(_) => return Err(SyntaxError::UnknownEscape),
            None => return Err(self.truncated()),
        };
        self.text.push(unescaped);
        Ok(())
    }

    fn read_hex_unit(&mut self) -> Result<u16, SyntaxError> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let Some(byte) = self.source.next_byte() else {
                return Err(self.truncated());
            };
            let digit = hex_value(byte).ok_or(SyntaxError::UnknownEscape)?;
            unit = (unit << 4) | u16::from(digit);
        }
        Ok(unit)
    }

    /// `\uXXXX` after the `u`. A high surrogate directly followed by a
    /// `\uXXXX` low surrogate becomes one supplementary code point; an
    /// unpaired surrogate is encoded on its own.
    fn lex_unicode_escape(&mut self) -> Result<(), SyntaxError> {
        let mut unit = self.read_hex_unit()?;

        while unicode::is_high_surrogate(unit) {
            if self.source.peek() != Some(b'\\') {
                break;
            }
            self.source.next_byte();

            let selector = self.source.next_byte();
            if selector != Some(b'u') {
                self.push_code_point(u32::from(unit));
                return self.lex_escape(selector);
            }

            let next = self.read_hex_unit()?;
            if unicode::is_low_surrogate(next) {
                self.push_code_point(unicode::combine_surrogates(unit, next));
                return Ok(());
            }
            self.push_code_point(u32::from(unit));
            unit = next;
        }

        self.push_code_point(u32::from(unit));
        Ok(())
    }

    fn push_code_point(&mut self, cp: u32) {
        // Both a lone UTF-16 unit and a combined pair are below U+110000.
        let written = unicode::encode_one(cp, &mut self.text);
        debug_assert!(written.is_some());
    }

    // -------------------------------------------------------------------------
    // Numbers
    // -------------------------------------------------------------------------

    fn lex_number(&mut self, first: u8) -> Result<(), SyntaxError> {
        let mut byte = first;
        if byte == b'-' {
            self.text.push(byte);
            byte = self
                .source
                .next_byte()
                .ok_or_else(|| self.missing(SyntaxError::UnknownValue))?;
        }

        if !byte.is_ascii_digit() {
            return Err(SyntaxError::UnknownValue);
        }
        self.text.push(byte);

        // A leading zero stands alone.
        if byte != b'0' {
            self.take_digits();
        }

        if self.source.peek() == Some(b'.') {
            self.take_byte();
            if !self.take_digits() {
                return Err(self.missing(SyntaxError::InvalidNumber));
            }
        }

        if matches!(self.source.peek(), Some(b'e' | b'E')) {
            self.take_byte();
            if matches!(self.source.peek(), Some(b'+' | b'-')) {
                self.take_byte();
            }
            if !self.take_digits() {
                return Err(self.missing(SyntaxError::InvalidNumber));
            }
        }

        self.check_separator(SyntaxError::InvalidNumber)
    }

    fn take_byte(&mut self) {
        if let Some(byte) = self.source.next_byte() {
            self.text.push(byte);
        }
    }

    /// Copies a run of ASCII digits; `false` if the run was empty.
    fn take_digits(&mut self) -> bool {
        let start = self.text.len();
        while let Some(byte) = self.source.peek().filter(u8::is_ascii_digit) {
            self.source.next_byte();
            self.text.push(byte);
        }
        self.text.len() > start
    }
}
