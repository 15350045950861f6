#![no_main]
use std::io::BufReader;

use arbitrary::Arbitrary;
use jsonwalk::{ParseError, ParserOptions, SyntaxError, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Reader buffer size for the streaming pass, 1 to 256.
    capacity: u8,
    /// Nesting limit, kept well under `serde_json`'s own.
    max_depth: u8,
    text: Vec<u8>,
}

/// Errors only the tree builder can raise on input ignore mode accepts:
/// ignore mode never decodes names, numbers or escapes into owned values, and
/// has no depth limit.
fn tree_only(err: &ParseError) -> bool {
    matches!(
        err,
        ParseError::DuplicateMember(_)
            | ParseError::Number { .. }
            | ParseError::Syntax {
                error: SyntaxError::BadEncoding | SyntaxError::DepthLimitExceeded,
                ..
            }
    )
}

fn same_tree(ours: &Value, theirs: &serde_json::Value) -> bool {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Boolean(a), serde_json::Value::Bool(b)) => a == b,
        (Value::Number(a), serde_json::Value::Number(b)) => b.as_f64() == Some(*a),
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_tree(a, b))
        }
        (Value::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| same_tree(v, w)))
        }
        _ => false,
    }
}

fn check(input: &Input) {
    let options = ParserOptions {
        max_depth: Some(usize::from(input.max_depth % 64) + 1),
    };
    let text = &input.text[..];

    let tree = jsonwalk::parse_with_options(text, options);
    let ignore = jsonwalk::from_source(jsonwalk::SliceSource::new(text), options, |lexer| {
        if jsonwalk::walk::ignore_value(lexer) {
            Ok(())
        } else {
            Err(lexer.error_for(jsonwalk::Expected::Value))
        }
    });
    match (&tree, &ignore) {
        (Ok(_), Err(err)) => panic!("ignore mode rejected {text:?}: {err}"),
        (Err(err), Ok(())) => assert!(tree_only(err), "ignore mode accepted {text:?}, tree said {err}"),
        _ => {}
    }

    // Chunk boundaries must not change the outcome.
    let capacity = usize::from(input.capacity).max(1);
    let streamed = jsonwalk::from_source(
        jsonwalk::ReadSource::new(BufReader::with_capacity(capacity, text)),
        options,
        jsonwalk::tree::parse_value,
    );
    assert_eq!(streamed, tree, "reader disagrees on {text:?}");

    if let Ok(value) = &tree {
        let theirs = serde_json::from_slice::<serde_json::Value>(text)
            .unwrap_or_else(|err| panic!("serde_json rejected {text:?} that we accepted: {err}"));
        assert!(same_tree(value, &theirs), "trees differ for {text:?}");
    }
}

fuzz_target!(|input: Input| check(&input));
