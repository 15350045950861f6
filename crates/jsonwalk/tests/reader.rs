#![expect(missing_docs)]

use std::io::{BufReader, Cursor};

use jsonwalk::{Lexer, ReadSource, SyntaxError, TokenKind, Value, tree, walk};

#[test]
fn parse_reader_whole_document() {
    let text = br#"{"a": [1, 2, {"b": "c"}], "d": null}"#;
    let from_reader = jsonwalk::parse_reader(BufReader::with_capacity(3, &text[..])).unwrap();
    assert_eq!(from_reader, jsonwalk::parse(text).unwrap());
}

#[test]
fn whitespace_separated_values_from_one_stream() {
    let stream = Cursor::new(b"{\"n\": 1}\n{\"n\": 2}\n[3]\n".to_vec());
    let mut lexer = Lexer::new(ReadSource::new(stream));

    let mut values = Vec::new();
    while lexer.kind() != TokenKind::Eof {
        values.push(tree::parse_value(&mut lexer).unwrap());
    }

    assert_eq!(values.len(), 3);
    assert_eq!(values[1].get("n"), Some(&Value::Number(2.0)));
    assert_eq!(values[2].at(0), Some(&Value::Number(3.0)));
}

#[test]
fn ignore_mode_over_reader() {
    let stream = Cursor::new(r#"{"skip": [1, {"x": "é"}], "keep": true}"#.as_bytes().to_vec());
    let mut lexer = Lexer::new(ReadSource::new(stream));
    assert!(walk::ignore_value(&mut lexer));
    assert_eq!(lexer.kind(), TokenKind::Eof);
}

#[test]
fn truncated_stream_is_unterminated() {
    let stream = Cursor::new(b"[\"abc".to_vec());
    let err = jsonwalk::parse_reader(stream).unwrap_err();
    assert_eq!(err.syntax_error(), Some(SyntaxError::UnterminatedString));
}
