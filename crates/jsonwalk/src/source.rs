//! Pull-based byte suppliers for the lexer.
//!
//! An [`InputSource`] hands out one byte at a time with a single byte of
//! look-ahead. It knows nothing about JSON. Two flavours ship with the crate:
//!
//! - [`SliceSource`] walks a borrowed, in-memory buffer.
//! - [`ReadSource`] (feature `std`) pulls from any blocking
//!   [`std::io::BufRead`].
//!
//! `None` is the "no unit available" sentinel. Whether it means a clean end of
//! input or a failed read is answered by [`InputSource::at_end`] and
//! [`InputSource::is_healthy`].

/// Minimal capability set the lexer needs from its input.
///
/// Invariants every implementation upholds:
///
/// - [`peek`](Self::peek) never consumes.
/// - [`next_byte`](Self::next_byte) consumes at most one byte.
/// - a failed read and the true end of input are distinguishable: after a
///   failure `at_end()` stays `false` and `is_healthy()` turns `false`.
pub trait InputSource {
    /// Returns the next byte without consuming it.
    fn peek(&mut self) -> Option<u8>;

    /// Consumes and returns the next byte.
    fn next_byte(&mut self) -> Option<u8>;

    /// `true` once no more bytes are obtainable because the input is
    /// exhausted.
    fn at_end(&self) -> bool;

    /// `false` once a read failed for a reason other than end of input.
    fn is_healthy(&self) -> bool {
        true
    }

    /// `true` if at least one more byte can be read.
    fn has_more(&mut self) -> bool {
        self.peek().is_some()
    }
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        (**self).peek()
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }

    #[inline]
    fn at_end(&self) -> bool {
        (**self).at_end()
    }

    #[inline]
    fn is_healthy(&self) -> bool {
        (**self).is_healthy()
    }

    #[inline]
    fn has_more(&mut self) -> bool {
        (**self).has_more()
    }
}

/// Buffer-backed source over a borrowed byte slice.
///
/// The slice is never copied; the source only tracks how far it has read.
///
/// ```
/// use jsonwalk::{InputSource, SliceSource};
///
/// let mut src = SliceSource::from("ab");
/// assert_eq!(src.peek(), Some(b'a'));
/// assert_eq!(src.next_byte(), Some(b'a'));
/// assert_eq!(src.next_byte(), Some(b'b'));
/// assert_eq!(src.next_byte(), None);
/// assert!(src.at_end());
/// ```
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    rest: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Reads `bytes` from the start.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    /// The bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl InputSource for SliceSource<'_> {
    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.rest.first().copied()
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.rest.split_first()?;
        self.rest = rest;
        Some(first)
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    #[inline]
    fn has_more(&mut self) -> bool {
        !self.rest.is_empty()
    }
}

#[cfg(feature = "std")]
pub use reader::ReadSource;

#[cfg(feature = "std")]
mod reader {
    use std::io::{self, BufRead};

    use super::InputSource;

    #[derive(Debug)]
    enum ReadState {
        Open,
        Eof,
        Failed(Option<io::Error>),
    }

    /// Stream-backed source over a blocking [`BufRead`].
    ///
    /// Bytes are taken straight out of the reader's own buffer, so no extra
    /// buffering happens here. Reads interrupted by a signal are retried; any
    /// other I/O error puts the source into a permanent unhealthy state and
    /// the error is kept for [`take_error`](Self::take_error).
    ///
    /// Wrap a plain [`std::io::Read`] in a [`std::io::BufReader`] first.
    #[derive(Debug)]
    pub struct ReadSource<R> {
        reader: R,
        state: ReadState,
    }

    impl<R: BufRead> ReadSource<R> {
        /// Wraps `reader`. Nothing is read until the first byte is asked for.
        pub fn new(reader: R) -> Self {
            Self {
                reader,
                state: ReadState::Open,
            }
        }

        /// Takes the I/O error that made the source unhealthy, if any.
        pub fn take_error(&mut self) -> Option<io::Error> {
            match &mut self.state {
                ReadState::Failed(err) => err.take(),
                _ => None,
            }
        }

        /// Returns the wrapped reader, including any unread buffered bytes.
        pub fn into_inner(self) -> R {
            self.reader
        }

        fn fill(&mut self) -> Option<u8> {
            if !matches!(self.state, ReadState::Open) {
                return None;
            }

            loop {
                match self.reader.fill_buf() {
                    Ok([]) => {
                        self.state = ReadState::Eof;
                        return None;
                    }
                    Ok(buf) => return Some(buf[0]),
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => {
                        tracing::debug!(error = %err, "input stream read failed");
                        self.state = ReadState::Failed(Some(err));
                        return None;
                    }
                }
            }
        }
    }

    impl<R: BufRead> InputSource for ReadSource<R> {
        fn peek(&mut self) -> Option<u8> {
            self.fill()
        }

        fn next_byte(&mut self) -> Option<u8> {
            let byte = self.fill()?;
            self.reader.consume(1);
            Some(byte)
        }

        fn at_end(&self) -> bool {
            matches!(self.state, ReadState::Eof)
        }

        fn is_healthy(&self) -> bool {
            !matches!(self.state, ReadState::Failed(_))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_source_peek_does_not_consume() {
        let mut src = SliceSource::from("xy");
        assert_eq!(src.peek(), Some(b'x'));
        assert_eq!(src.peek(), Some(b'x'));
        assert!(src.has_more());
        assert_eq!(src.next_byte(), Some(b'x'));
        assert_eq!(src.remaining(), b"y");
    }

    #[test]
    fn slice_source_end_is_healthy() {
        let mut src = SliceSource::new(b"");
        assert!(src.at_end());
        assert!(src.is_healthy());
        assert_eq!(src.peek(), None);
        assert_eq!(src.next_byte(), None);
    }

    #[test]
    fn mut_ref_forwards() {
        let mut src = SliceSource::from("1");
        {
            let mut borrowed = &mut src;
            assert_eq!(InputSource::next_byte(&mut borrowed), Some(b'1'));
        }
        assert!(src.at_end());
    }

    #[cfg(feature = "std")]
    mod stream {
        use std::io::{self, BufReader, Cursor, Read};

        use super::super::*;

        struct FailAfter {
            data: &'static [u8],
        }

        impl Read for FailAfter {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.data.is_empty() {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, "boom"));
                }
                let n = self.data.len().min(buf.len());
                buf[..n].copy_from_slice(&self.data[..n]);
                self.data = &self.data[n..];
                Ok(n)
            }
        }

        #[test]
        fn read_source_clean_end() {
            let mut src = ReadSource::new(Cursor::new(b"ok".to_vec()));
            assert_eq!(src.next_byte(), Some(b'o'));
            assert_eq!(src.peek(), Some(b'k'));
            assert_eq!(src.next_byte(), Some(b'k'));
            assert!(!src.at_end());
            assert_eq!(src.next_byte(), None);
            assert!(src.at_end());
            assert!(src.is_healthy());
        }

        #[test]
        fn read_source_failure_is_not_end() {
            let reader = BufReader::with_capacity(1, FailAfter { data: b"a" });
            let mut src = ReadSource::new(reader);
            assert_eq!(src.next_byte(), Some(b'a'));
            assert_eq!(src.next_byte(), None);
            assert!(!src.at_end());
            assert!(!src.is_healthy());
            let err = src.take_error().expect("error kept");
            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
            assert!(src.take_error().is_none());
        }
    }
}
