//! Callback driven traversal of arrays and objects.
//!
//! [`parse_object`] and [`parse_array`] handle the punctuation of a container
//! and hand every member or element to a caller supplied closure. The closure
//! receives the lexer positioned on the first token of the value and must
//! consume exactly that value, usually with the scalar readers in this module
//! ([`read_null`], [`read_bool`], [`read_string`], [`read_number`]) or by
//! recursing into the container functions. This decodes JSON straight into
//! caller owned structures without an intermediate tree.
//!
//! [`ignore_value`], [`ignore_array`] and [`ignore_object`] validate the same
//! grammar and throw the content away, at any nesting depth.
//!
//! Every function reports a plain success flag. When it returns `false` the
//! lexer is latched invalid and [`Lexer::error`] says why.
//!
//! ```
//! use jsonwalk::{Lexer, SliceSource, walk};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! let mut lexer = Lexer::new(SliceSource::from(r#"{"x": 1, "y": -2, "label": [true]}"#));
//! let mut point = Point::default();
//! let ok = walk::parse_object(&mut lexer, &mut point, |lexer, point, name| {
//!     let slot = match &**name {
//!         b"x" => &mut point.x,
//!         b"y" => &mut point.y,
//!         _ => return walk::ignore_value(lexer),
//!     };
//!     walk::read_number(lexer).map(|value| *slot = value).is_some()
//! });
//! assert!(ok);
//! assert_eq!((point.x, point.y), (1, -2));
//! ```
use alloc::{string::String, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::{
    error::{Expected, SyntaxError},
    lexer::Lexer,
    number::{FromJsonNumber, decode_number},
    source::InputSource,
    token::TokenKind,
};

/// Walks an object, calling `on_member` with each member name.
///
/// The lexer must be on `{`. The callback is never invoked for an empty
/// object, nor for a member whose value position holds no value. Duplicate
/// names are passed through; deduplicating is up to the consumer.
///
/// The name is only borrowed for the duration of the call.
pub fn parse_object<S, T, F>(lexer: &mut Lexer<S>, target: &mut T, mut on_member: F) -> bool
where
    S: InputSource,
    F: FnMut(&mut Lexer<S>, &mut T, &BStr) -> bool,
{
    if lexer.kind() != TokenKind::CurlyOpen {
        return lexer.fail(SyntaxError::expected(Expected::Object));
    }
    if !lexer.enter_nested() {
        return false;
    }
    let ok = object_members(lexer, target, &mut on_member);
    lexer.leave_nested();
    ok
}

fn object_members<S, T, F>(lexer: &mut Lexer<S>, target: &mut T, on_member: &mut F) -> bool
where
    S: InputSource,
    F: FnMut(&mut Lexer<S>, &mut T, &BStr) -> bool,
{
    lexer.advance();
    if lexer.kind() == TokenKind::CurlyClose {
        lexer.advance();
        return true;
    }

    let mut name = Vec::new();
    loop {
        if lexer.kind() != TokenKind::String {
            return lexer.fail(SyntaxError::ExpectedMemberName);
        }
        // Trade buffers so the name survives the next advance.
        lexer.swap_text(&mut name);

        lexer.advance();
        if lexer.kind() != TokenKind::Colon {
            return lexer.fail(SyntaxError::ExpectedColon);
        }

        lexer.advance();
        if !lexer.kind().starts_value() {
            return lexer.fail(SyntaxError::ExpectedValue);
        }
        if !on_member(lexer, target, name.as_bstr()) {
            return lexer.fail(SyntaxError::Rejected);
        }

        if lexer.kind() != TokenKind::Comma {
            break;
        }
        lexer.advance();
    }

    if lexer.kind() != TokenKind::CurlyClose {
        return lexer.fail(SyntaxError::ExpectedObjectEnd);
    }
    lexer.advance();
    true
}

/// Walks an array, calling `on_element` for each element.
///
/// The lexer must be on `[`. The callback is never invoked for an empty
/// array, for a truncated one, or for the position after a trailing comma.
pub fn parse_array<S, T, F>(lexer: &mut Lexer<S>, target: &mut T, mut on_element: F) -> bool
where
    S: InputSource,
    F: FnMut(&mut Lexer<S>, &mut T) -> bool,
{
    if lexer.kind() != TokenKind::BracketOpen {
        return lexer.fail(SyntaxError::expected(Expected::Array));
    }
    if !lexer.enter_nested() {
        return false;
    }
    let ok = array_elements(lexer, target, &mut on_element);
    lexer.leave_nested();
    ok
}

fn array_elements<S, T, F>(lexer: &mut Lexer<S>, target: &mut T, on_element: &mut F) -> bool
where
    S: InputSource,
    F: FnMut(&mut Lexer<S>, &mut T) -> bool,
{
    lexer.advance();
    if lexer.kind() == TokenKind::BracketClose {
        lexer.advance();
        return true;
    }

    loop {
        if !lexer.kind().starts_value() {
            return lexer.fail(SyntaxError::ExpectedValue);
        }
        if !on_element(lexer, target) {
            return lexer.fail(SyntaxError::Rejected);
        }

        if lexer.kind() != TokenKind::Comma {
            break;
        }
        lexer.advance();
    }

    if lexer.kind() != TokenKind::BracketClose {
        return lexer.fail(SyntaxError::ExpectedArrayEnd);
    }
    lexer.advance();
    true
}

/// Validates and skips one value of any shape.
///
/// Unlike the callback traversal this keeps its own stack of open
/// containers instead of recursing, so it accepts any nesting depth and
/// ignores [`ParserOptions::max_depth`](crate::ParserOptions::max_depth).
pub fn ignore_value<S: InputSource>(lexer: &mut Lexer<S>) -> bool {
    // Closing token of every open container, innermost last.
    let mut open: Vec<TokenKind> = Vec::new();

    loop {
        // Value position.
        match lexer.kind() {
            TokenKind::CurlyOpen => {
                lexer.advance();
                if lexer.kind() != TokenKind::CurlyClose {
                    if !skip_member_name(lexer) {
                        return false;
                    }
                    open.push(TokenKind::CurlyClose);
                    continue;
                }
                lexer.advance();
            }
            TokenKind::BracketOpen => {
                lexer.advance();
                if lexer.kind() != TokenKind::BracketClose {
                    open.push(TokenKind::BracketClose);
                    continue;
                }
                lexer.advance();
            }
            kind if kind.starts_value() => lexer.advance(),
            _ => return lexer.fail(SyntaxError::ExpectedValue),
        }

        // A value is complete. Close containers until one continues.
        loop {
            let Some(&close) = open.last() else {
                return true;
            };
            match lexer.kind() {
                TokenKind::Comma => {
                    lexer.advance();
                    if close == TokenKind::CurlyClose && !skip_member_name(lexer) {
                        return false;
                    }
                    break;
                }
                kind if kind == close => {
                    lexer.advance();
                    open.pop();
                }
                _ if close == TokenKind::CurlyClose => {
                    return lexer.fail(SyntaxError::ExpectedObjectEnd);
                }
                _ => return lexer.fail(SyntaxError::ExpectedArrayEnd),
            }
        }
    }
}

/// Skips `"name":`, leaving the lexer on the member value.
fn skip_member_name<S: InputSource>(lexer: &mut Lexer<S>) -> bool {
    if lexer.kind() != TokenKind::String {
        return lexer.fail(SyntaxError::ExpectedMemberName);
    }
    lexer.advance();
    if lexer.kind() != TokenKind::Colon {
        return lexer.fail(SyntaxError::ExpectedColon);
    }
    lexer.advance();
    true
}

/// Like [`ignore_value`], but the lexer must be on `{`.
pub fn ignore_object<S: InputSource>(lexer: &mut Lexer<S>) -> bool {
    if lexer.kind() != TokenKind::CurlyOpen {
        return lexer.fail(SyntaxError::expected(Expected::Object));
    }
    ignore_value(lexer)
}

/// Like [`ignore_value`], but the lexer must be on `[`.
pub fn ignore_array<S: InputSource>(lexer: &mut Lexer<S>) -> bool {
    if lexer.kind() != TokenKind::BracketOpen {
        return lexer.fail(SyntaxError::expected(Expected::Array));
    }
    ignore_value(lexer)
}

// -----------------------------------------------------------------------------
// Scalar readers
// -----------------------------------------------------------------------------

/// Reads `null`.
pub fn read_null<S: InputSource>(lexer: &mut Lexer<S>) -> bool {
    if lexer.kind() != TokenKind::Null {
        return lexer.fail(SyntaxError::expected(Expected::Null));
    }
    lexer.advance();
    true
}

/// Reads `true` or `false`.
pub fn read_bool<S: InputSource>(lexer: &mut Lexer<S>) -> Option<bool> {
    let value = match lexer.kind() {
        TokenKind::True => true,
        TokenKind::False => false,
        _ => {
            lexer.fail(SyntaxError::expected(Expected::Boolean));
            return None;
        }
    };
    lexer.advance();
    Some(value)
}

/// Reads a string token into an owned `String`.
///
/// Fails with [`SyntaxError::BadEncoding`] if the unescaped text is not valid
/// UTF-8, which happens for unpaired `\uD800`-style surrogate escapes.
pub fn read_string<S: InputSource>(lexer: &mut Lexer<S>) -> Option<String> {
    if lexer.kind() != TokenKind::String {
        lexer.fail(SyntaxError::expected(Expected::String));
        return None;
    }

    match String::from_utf8(lexer.take_text()) {
        Ok(text) => {
            lexer.advance();
            Some(text)
        }
        Err(err) => {
            // Put the bytes back so the diagnostic shows them.
            let mut bytes = err.into_bytes();
            lexer.swap_text(&mut bytes);
            lexer.fail(SyntaxError::BadEncoding);
            None
        }
    }
}

/// Reads a string token's raw bytes into `out`, replacing its contents.
///
/// No UTF-8 check is made and no allocation happens once `out` and the lexer
/// buffer have grown: the two buffers simply trade places.
pub fn read_string_bytes<S: InputSource>(lexer: &mut Lexer<S>, out: &mut Vec<u8>) -> bool {
    if lexer.kind() != TokenKind::String {
        return lexer.fail(SyntaxError::expected(Expected::String));
    }
    lexer.swap_text(out);
    lexer.advance();
    true
}

/// Reads a number token as `T`, failing rather than rounding or wrapping.
pub fn read_number<T: FromJsonNumber, S: InputSource>(lexer: &mut Lexer<S>) -> Option<T> {
    if lexer.kind() != TokenKind::Number {
        lexer.fail(SyntaxError::expected(Expected::Number));
        return None;
    }

    match decode_number(lexer.text()) {
        Ok(value) => {
            lexer.advance();
            Some(value)
        }
        Err(error) => {
            lexer.fail(SyntaxError::Number(error));
            None
        }
    }
}
