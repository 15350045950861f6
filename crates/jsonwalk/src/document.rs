//! Whole-document entry points.
//!
//! These build a lexer over the input, run one reader, and then require the
//! input to be exhausted: `[] []` is two complete values and is rejected with
//! [`ParseError::TrailingData`].
use alloc::string::String;

use crate::{
    error::{Expected, ParseError},
    lexer::Lexer,
    options::ParserOptions,
    source::{InputSource, SliceSource},
    token::TokenKind,
    tree,
    value::{Array, Map, Value},
    walk,
};

/// Runs `read` over `source` and checks that nothing follows the value it
/// read.
///
/// Any lexer level reader fits: the ones in [`tree`], or a closure driving
/// [`walk`] into caller owned structures.
///
/// ```
/// use jsonwalk::{ParserOptions, SliceSource, tree};
///
/// let big = jsonwalk::from_source(
///     SliceSource::from(" 9007199254740993 "),
///     ParserOptions::default(),
///     tree::parse_number::<u64, _>,
/// );
/// assert_eq!(big, Ok(9_007_199_254_740_993));
/// ```
pub fn from_source<S, T, F>(source: S, options: ParserOptions, read: F) -> Result<T, ParseError>
where
    S: InputSource,
    F: FnOnce(&mut Lexer<S>) -> Result<T, ParseError>,
{
    let mut lexer = Lexer::with_options(source, options);
    tracing::trace!(?options, "parsing document");

    let result = read(&mut lexer).and_then(|value| match lexer.kind() {
        TokenKind::Eof => Ok(value),
        TokenKind::Invalid => Err(lexer.error_for(Expected::Value)),
        _ => Err(ParseError::TrailingData(lexer.text_lossy())),
    });

    if let Err(error) = &result {
        tracing::debug!(%error, "document rejected");
    }
    result
}

fn from_text<'a, T>(
    text: &'a [u8],
    read: impl FnOnce(&mut Lexer<SliceSource<'a>>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    from_source(SliceSource::new(text), ParserOptions::default(), read)
}

/// Parses a complete JSON document into a [`Value`].
///
/// ```
/// use jsonwalk::{ParseError, Value};
///
/// let v = jsonwalk::parse(r#"{"answer": 42, "list": [true, null]}"#).unwrap();
/// assert_eq!(v.get("answer"), Some(&Value::Number(42.0)));
///
/// assert_eq!(
///     jsonwalk::parse("[] []"),
///     Err(ParseError::TrailingData("[".into()))
/// );
/// ```
pub fn parse(text: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    from_text(text.as_ref(), tree::parse_value)
}

/// Like [`parse`], with explicit [`ParserOptions`].
pub fn parse_with_options(
    text: impl AsRef<[u8]>,
    options: ParserOptions,
) -> Result<Value, ParseError> {
    from_source(SliceSource::new(text.as_ref()), options, tree::parse_value)
}

/// Parses a document that must be exactly `null`.
pub fn parse_null(text: impl AsRef<[u8]>) -> Result<(), ParseError> {
    from_text(text.as_ref(), tree::parse_null)
}

/// Parses a document that must be exactly `true` or `false`.
pub fn parse_boolean(text: impl AsRef<[u8]>) -> Result<bool, ParseError> {
    from_text(text.as_ref(), tree::parse_boolean)
}

/// Parses a document that is a single string.
pub fn parse_string(text: impl AsRef<[u8]>) -> Result<String, ParseError> {
    from_text(text.as_ref(), tree::parse_string)
}

/// Parses a document that is a single number, as `f64`.
pub fn parse_number(text: impl AsRef<[u8]>) -> Result<f64, ParseError> {
    from_text(text.as_ref(), tree::parse_number)
}

/// Parses a document whose top-level value is an array.
pub fn parse_array(text: impl AsRef<[u8]>) -> Result<Array, ParseError> {
    from_text(text.as_ref(), tree::parse_array)
}

/// Parses a document whose top-level value is an object.
pub fn parse_object(text: impl AsRef<[u8]>) -> Result<Map, ParseError> {
    from_text(text.as_ref(), tree::parse_object)
}

/// Checks that `text` is one well-formed JSON value without building
/// anything.
pub fn validate(text: impl AsRef<[u8]>) -> Result<(), ParseError> {
    from_text(text.as_ref(), |lexer| {
        if walk::ignore_value(lexer) {
            Ok(())
        } else {
            Err(lexer.error_for(Expected::Value))
        }
    })
}

/// Parses a complete document from a blocking reader.
///
/// An I/O error while reading surfaces as
/// [`SyntaxError::BadEncoding`](crate::SyntaxError::BadEncoding).
///
/// ```
/// let v = jsonwalk::parse_reader(std::io::Cursor::new(b"[1, 2]")).unwrap();
/// assert_eq!(v.at(1).and_then(|n| n.as_f64()), Some(2.0));
/// ```
#[cfg(feature = "std")]
pub fn parse_reader<R: std::io::BufRead>(reader: R) -> Result<Value, ParseError> {
    let mut source = crate::source::ReadSource::new(reader);
    let result = from_source(&mut source, ParserOptions::default(), tree::parse_value);
    if let Some(error) = source.take_error() {
        tracing::debug!(%error, "input stream failed during parse");
    }
    result
}
