//! Parsing from blocking readers.
use std::io::{self, BufReader, Read};

use crate::{ParseError, ReadSource, SyntaxError, Value, tree};

/// Yields its data in slices of at most `step` bytes, then fails or ends.
struct Trickle {
    data: &'static [u8],
    step: usize,
    fail_at_end: bool,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return if self.fail_at_end {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            } else {
                Ok(0)
            };
        }
        let n = self.data.len().min(buf.len()).min(self.step);
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

const DOCUMENT: &[u8] = r#"{"list": [1, 2.5, "three ♥", [true, null]], "name": "stream"}"#.as_bytes();

#[test]
fn reader_matches_slice() {
    let expected = crate::parse(DOCUMENT).unwrap();
    for step in [1, 2, 3, 7, 64] {
        let reader = BufReader::with_capacity(
            step,
            Trickle {
                data: DOCUMENT,
                step,
                fail_at_end: false,
            },
        );
        assert_eq!(crate::parse_reader(reader), Ok(expected.clone()), "step {step}");
    }
}

#[test]
fn read_failure_is_bad_encoding() {
    for cut in [0, 1, 5, 20, DOCUMENT.len() - 1] {
        let reader = BufReader::with_capacity(
            4,
            Trickle {
                data: &DOCUMENT[..cut],
                step: 3,
                fail_at_end: true,
            },
        );
        let err = crate::parse_reader(reader).unwrap_err();
        assert_eq!(err.syntax_error(), Some(SyntaxError::BadEncoding), "cut {cut}");
    }
}

#[test]
fn failure_after_complete_value_is_still_an_error() {
    let reader = BufReader::new(Trickle {
        data: b"[1]",
        step: 8,
        fail_at_end: true,
    });
    let mut source = ReadSource::new(reader);
    let result = crate::from_source(&mut source, crate::ParserOptions::default(), tree::parse_value);
    assert_eq!(
        result,
        Err(ParseError::Syntax {
            error: SyntaxError::BadEncoding,
            text: "".into()
        })
    );
    assert_eq!(
        source.take_error().map(|e| e.kind()),
        Some(io::ErrorKind::ConnectionReset)
    );
}

#[test]
fn number_at_end_of_stream() {
    let reader = io::Cursor::new(b"  -12.5e1".to_vec());
    assert_eq!(crate::parse_reader(reader), Ok(Value::Number(-125.0)));
}
