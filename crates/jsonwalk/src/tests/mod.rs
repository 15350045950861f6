mod parse_bad;
#[cfg(feature = "std")]
mod streaming;
