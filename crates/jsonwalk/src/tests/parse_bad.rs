use alloc::string::String;

use rstest::rstest;

use crate::{Expected, ParseError, SyntaxError};

fn syntax(text: &str) -> Option<SyntaxError> {
    crate::parse(text).err().and_then(|err| err.syntax_error())
}

#[rstest]
#[case("null null")]
#[case("true false")]
#[case("\"foo\" \"bar\"")]
#[case("0 0")]
#[case("[] []")]
#[case("{} {}")]
fn too_much_data(#[case] text: &str) {
    assert!(matches!(crate::parse(text), Err(ParseError::TrailingData(_))));
    assert!(matches!(crate::validate(text), Err(ParseError::TrailingData(_))));
}

#[rstest]
#[case("truefalse", SyntaxError::UnknownValue)]
#[case("true&&false", SyntaxError::UnknownValue)]
#[case("123abc", SyntaxError::InvalidNumber)]
#[case("042", SyntaxError::InvalidNumber)]
#[case("+0", SyntaxError::UnknownValue)]
#[case("42.", SyntaxError::InvalidNumber)]
#[case("42e", SyntaxError::InvalidNumber)]
#[case("[1,2,]", SyntaxError::ExpectedValue)]
#[case(r#"{"a":1,}"#, SyntaxError::ExpectedMemberName)]
#[case("{1:2}", SyntaxError::ExpectedMemberName)]
#[case(r#"{"a" 1}"#, SyntaxError::ExpectedColon)]
#[case(r#"{"a":1 "b":2}"#, SyntaxError::ExpectedObjectEnd)]
#[case("[1 2]", SyntaxError::ExpectedArrayEnd)]
#[case("{  ", SyntaxError::ExpectedMemberName)]
#[case("[  ", SyntaxError::ExpectedValue)]
#[case("\"abc", SyntaxError::UnterminatedString)]
#[case("\"\\q\"", SyntaxError::UnknownEscape)]
#[case("\"a\tb\"", SyntaxError::ControlCharacter)]
#[case("[\"\\ud800\"]", SyntaxError::BadEncoding)]
#[case("NaN", SyntaxError::UnknownValue)]
#[case("'single'", SyntaxError::UnknownValue)]
#[case("[1] @", SyntaxError::UnknownValue)]
#[case("// comment\n1", SyntaxError::UnknownValue)]
fn syntax_errors(#[case] text: &str, #[case] expected: SyntaxError) {
    assert_eq!(syntax(text), Some(expected), "{text:?}");
}

#[test]
fn invalid_utf8_in_strings() {
    for bytes in [&b"\"\xFF\""[..], b"\"\xC0\x80\"", b"\"\xED\xBF\xBF\"", b"[\"\xE2\x82\"]"] {
        assert_eq!(
            crate::parse(bytes).unwrap_err().syntax_error(),
            Some(SyntaxError::BadEncoding),
            "{bytes:?}"
        );
        assert_eq!(
            crate::validate(bytes).unwrap_err().syntax_error(),
            Some(SyntaxError::BadEncoding),
            "{bytes:?}"
        );
    }
}

#[test]
fn unpaired_surrogate_only_fails_when_decoded() {
    let text = r#"["\ud800", "\udc00x"]"#;
    assert_eq!(
        crate::parse(text).unwrap_err().syntax_error(),
        Some(SyntaxError::BadEncoding)
    );
    assert_eq!(crate::validate(text), Ok(()));
}

#[test]
fn duplicate_members() {
    assert_eq!(
        crate::parse(r#"{"a": {"b": 1, "b": 2}}"#),
        Err(ParseError::DuplicateMember("b".into()))
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_input(#[case] text: &str) {
    assert_eq!(
        crate::parse(text),
        Err(ParseError::Unexpected {
            expected: Expected::Value,
            found: String::new()
        })
    );
}

#[test]
fn depth_limit() {
    let text: String = "[".repeat(200) + &"]".repeat(200);
    assert_eq!(syntax(&text), Some(SyntaxError::DepthLimitExceeded));
    assert_eq!(crate::validate(&text), Ok(()));
    assert!(crate::parse_with_options(&text, crate::ParserOptions::unlimited()).is_ok());
}
