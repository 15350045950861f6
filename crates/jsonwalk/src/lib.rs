//! A pull-based JSON lexer with a callback-driven recursive-descent decoder.
//!
//! The crate is layered:
//!
//! - an [`InputSource`] hands out bytes one at a time, from memory
//!   ([`SliceSource`]) or from a blocking reader ([`ReadSource`]);
//! - the [`Lexer`] turns them into tokens, unescaping strings and validating
//!   numbers, and latches into an invalid state on the first error;
//! - [`walk`] traverses arrays and objects and hands each element to a
//!   closure, or skips values entirely;
//! - [`tree`] builds a [`Value`] on top of `walk`;
//! - [`parse`] and friends wrap all of that for whole documents.
//!
//! Numbers are decoded lazily with [`FromJsonNumber`], which never rounds
//! when the target is an integer.
//!
//! ```
//! use jsonwalk::{Lexer, SliceSource, walk};
//!
//! // Tree mode.
//! let value = jsonwalk::parse(r#"{"ids": [1, 2, 3]}"#).unwrap();
//! assert_eq!(value.get("ids").and_then(|ids| ids.at(2)).and_then(|n| n.as_f64()), Some(3.0));
//!
//! // Callback mode, straight into a Vec<u64>.
//! let mut lexer = Lexer::new(SliceSource::from("[18446744073709551615, 0]"));
//! let mut ids: Vec<u64> = Vec::new();
//! assert!(walk::parse_array(&mut lexer, &mut ids, |lexer, ids| {
//!     walk::read_number(lexer).map(|id| ids.push(id)).is_some()
//! }));
//! assert_eq!(ids, [u64::MAX, 0]);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod document;
mod error;
mod lexer;
mod number;
mod options;
mod source;
mod token;
mod value;

pub mod tree;
pub mod unicode;
pub mod walk;

#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
pub use document::parse_reader;
pub use document::{
    from_source, parse, parse_array, parse_boolean, parse_null, parse_number, parse_object,
    parse_string, parse_with_options, validate,
};
pub use error::{Expected, NumberError, ParseError, SyntaxError};
pub use lexer::Lexer;
pub use number::{FromJsonNumber, decode_number};
pub use options::ParserOptions;
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::{InputSource, SliceSource};
pub use token::TokenKind;
pub use value::{Array, Map, Value, ValueType};
