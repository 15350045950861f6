/// Configuration for a [`Lexer`](crate::Lexer) and every traversal driven
/// over it.
///
/// # Examples
///
/// ```rust
/// use jsonwalk::{Lexer, ParserOptions, SliceSource};
///
/// let options = ParserOptions {
///     max_depth: Some(2),
/// };
/// let mut lexer = Lexer::with_options(SliceSource::from("[[[]]]"), options);
/// assert!(jsonwalk::tree::parse_value(&mut lexer).is_err());
/// ```
///
/// # Default
///
/// `max_depth` defaults to `Some(128)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How many arrays and objects may be open at once.
    ///
    /// Tree and callback traversal latch the lexer with
    /// [`SyntaxError::DepthLimitExceeded`](crate::SyntaxError::DepthLimitExceeded)
    /// when entering one more level would exceed this limit. `None` removes
    /// the limit, leaving deeply nested input to exhaust the call stack.
    ///
    /// Ignore mode does not recurse and accepts any depth.
    ///
    /// # Default
    ///
    /// `Some(128)`
    pub max_depth: Option<usize>,
}

impl ParserOptions {
    /// Nesting limit used by [`ParserOptions::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Options with no nesting limit.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_depth: None }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
        }
    }
}
