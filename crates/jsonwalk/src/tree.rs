//! Readers that materialize [`Value`] trees from a [`Lexer`].
//!
//! Each reader expects the lexer on the first token of the value it reads,
//! consumes exactly that value and leaves the lexer on the following token.
//! On error the lexer is latched invalid and the returned [`ParseError`]
//! carries the offending text.
//!
//! Arrays and objects are built on top of the callback traversal in
//! [`walk`](crate::walk), so tree mode, callback mode and ignore mode accept
//! exactly the same documents.
use alloc::string::String;

use bstr::{BStr, ByteSlice};

use crate::{
    error::{Expected, ParseError, SyntaxError},
    lexer::Lexer,
    number::FromJsonNumber,
    source::InputSource,
    token::TokenKind,
    value::{Array, Map, Value},
    walk,
};

/// Builds the error for a token of the wrong kind and latches the lexer.
fn mismatch<S: InputSource>(lexer: &mut Lexer<S>, expected: Expected) -> ParseError {
    let error = lexer.error_for(expected);
    lexer.fail(SyntaxError::expected(expected));
    error
}

/// Reads any value.
pub fn parse_value<S: InputSource>(lexer: &mut Lexer<S>) -> Result<Value, ParseError> {
    match lexer.kind() {
        TokenKind::Null => parse_null(lexer).map(|()| Value::Null),
        TokenKind::True | TokenKind::False => parse_boolean(lexer).map(Value::Boolean),
        TokenKind::Number => parse_number(lexer).map(Value::Number),
        TokenKind::String => parse_string(lexer).map(Value::String),
        TokenKind::BracketOpen => parse_array(lexer).map(Value::Array),
        TokenKind::CurlyOpen => parse_object(lexer).map(Value::Object),
        _ => Err(mismatch(lexer, Expected::Value)),
    }
}

/// Reads `null`.
pub fn parse_null<S: InputSource>(lexer: &mut Lexer<S>) -> Result<(), ParseError> {
    if lexer.kind() != TokenKind::Null {
        return Err(mismatch(lexer, Expected::Null));
    }
    lexer.advance();
    Ok(())
}

/// Reads `true` or `false`.
pub fn parse_boolean<S: InputSource>(lexer: &mut Lexer<S>) -> Result<bool, ParseError> {
    match lexer.kind() {
        TokenKind::True | TokenKind::False => {
            walk::read_bool(lexer).ok_or_else(|| lexer.error_for(Expected::Boolean))
        }
        _ => Err(mismatch(lexer, Expected::Boolean)),
    }
}

/// Reads a number as any [`FromJsonNumber`] type; `f64` by inference in
/// [`parse_value`].
///
/// ```
/// use jsonwalk::{Lexer, ParseError, SliceSource, tree};
///
/// let mut lexer = Lexer::new(SliceSource::from("18446744073709551615"));
/// assert_eq!(tree::parse_number::<u64, _>(&mut lexer), Ok(u64::MAX));
///
/// let mut lexer = Lexer::new(SliceSource::from("2.5"));
/// assert!(matches!(
///     tree::parse_number::<u64, _>(&mut lexer),
///     Err(ParseError::Number { .. })
/// ));
/// ```
pub fn parse_number<T: FromJsonNumber, S: InputSource>(
    lexer: &mut Lexer<S>,
) -> Result<T, ParseError> {
    if lexer.kind() != TokenKind::Number {
        return Err(mismatch(lexer, Expected::Number));
    }
    walk::read_number(lexer).ok_or_else(|| lexer.error_for(Expected::Number))
}

/// Reads a string. Unpaired surrogate escapes are rejected as
/// [`SyntaxError::BadEncoding`] since they cannot be held by a `String`.
pub fn parse_string<S: InputSource>(lexer: &mut Lexer<S>) -> Result<String, ParseError> {
    if lexer.kind() != TokenKind::String {
        return Err(mismatch(lexer, Expected::String));
    }
    walk::read_string(lexer).ok_or_else(|| lexer.error_for(Expected::String))
}

/// Reads an array and every value in it.
pub fn parse_array<S: InputSource>(lexer: &mut Lexer<S>) -> Result<Array, ParseError> {
    if lexer.kind() != TokenKind::BracketOpen {
        return Err(mismatch(lexer, Expected::Array));
    }

    let mut items = Array::new();
    let mut failure = None;
    let ok = walk::parse_array(lexer, &mut items, |lexer, items| match parse_value(lexer) {
        Ok(value) => {
            items.push(value);
            true
        }
        Err(error) => {
            failure = Some(error);
            false
        }
    });

    if ok {
        Ok(items)
    } else {
        Err(failure.unwrap_or_else(|| lexer.error_for(Expected::Value)))
    }
}

/// Reads an object. A member name that occurs twice is an error.
pub fn parse_object<S: InputSource>(lexer: &mut Lexer<S>) -> Result<Map, ParseError> {
    if lexer.kind() != TokenKind::CurlyOpen {
        return Err(mismatch(lexer, Expected::Object));
    }

    let mut members = Map::new();
    let mut failure = None;
    let ok = walk::parse_object(lexer, &mut members, |lexer, members, name| {
        match parse_member(lexer, members, name) {
            Ok(()) => true,
            Err(error) => {
                failure = Some(error);
                false
            }
        }
    });

    if ok {
        Ok(members)
    } else {
        Err(failure.unwrap_or_else(|| lexer.error_for(Expected::Value)))
    }
}

fn parse_member<S: InputSource>(
    lexer: &mut Lexer<S>,
    members: &mut Map,
    name: &BStr,
) -> Result<(), ParseError> {
    let Ok(name) = name.to_str() else {
        lexer.fail(SyntaxError::BadEncoding);
        return Err(ParseError::Syntax {
            error: SyntaxError::BadEncoding,
            text: name.to_str_lossy().into_owned(),
        });
    };
    if members.contains_key(name) {
        lexer.fail(SyntaxError::Rejected);
        return Err(ParseError::DuplicateMember(name.into()));
    }

    let value = parse_value(lexer)?;
    members.insert(name.into(), value);
    Ok(())
}
