//! Decoding of number token text into Rust numeric types.
//!
//! Number tokens keep the literal exactly as written; turning it into a value
//! is deferred to [`FromJsonNumber`]. Three strategies are used:
//!
//! - `f32` and `f64` use the standard correctly rounded conversion and only
//!   fail when the value overflows to infinity.
//! - Integers of at most 32 bits go through an `f64` and are checked to be
//!   integral and in range. Literals with more than 15 significant digits
//!   take the exact route instead, since beyond that an `f64` can round a
//!   fraction onto an integer.
//! - `i64`, `u64`, `i128`, `u128`, `isize` and `usize` are decoded exactly by
//!   shifting the decimal point, so `9223372036854775807` fits an `i64` and
//!   `9223372036854775808` does not.
//!
//! Integer targets never round: `1.27e2`, `0.00127e5` and `127000e-3` all
//! give `127`, while `123e-1` is rejected.
//!
//! ```
//! use jsonwalk::{FromJsonNumber, NumberError};
//!
//! assert_eq!(i8::from_json_number("-128"), Ok(-128));
//! assert_eq!(i8::from_json_number("128"), Err(NumberError::Overflow));
//! assert_eq!(u64::from_json_number("1.8446744073709551615e19"), Ok(u64::MAX));
//! assert_eq!(i32::from_json_number("123e-1"), Err(NumberError::NotIntegral));
//! ```
use crate::error::NumberError;

/// Significant digits below which the `f64` route is exact for small
/// integer targets.
const FLOAT_SAFE_DIGITS: usize = 15;

/// Numeric types a number token can be decoded into.
pub trait FromJsonNumber: Sized {
    /// Decodes a JSON number literal.
    ///
    /// `text` must follow the JSON number grammar; anything else, including
    /// `inf`, `NaN` or a leading `+`, is [`NumberError::Malformed`].
    fn from_json_number(text: &str) -> Result<Self, NumberError>;
}

/// Decodes raw token bytes, as held by the lexer, into `T`.
pub fn decode_number<T: FromJsonNumber>(text: &[u8]) -> Result<T, NumberError> {
    let text = core::str::from_utf8(text).map_err(|_| NumberError::Malformed)?;
    T::from_json_number(text)
}

/// A grammatically valid literal split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Literal<'a> {
    negative: bool,
    integer: &'a [u8],
    fraction: &'a [u8],
    /// Saturates at `±i64::MAX`.
    exponent: i64,
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn all_zero(digits: &[u8]) -> bool {
    digits.iter().all(|&b| b == b'0')
}

impl<'a> Literal<'a> {
    fn split(text: &'a str) -> Result<Self, NumberError> {
        let bytes = text.as_bytes();
        let (negative, rest) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, bytes),
        };

        let (integer, rest) = rest.split_at(digit_run(rest));
        if integer.is_empty() || (integer.len() > 1 && integer[0] == b'0') {
            return Err(NumberError::Malformed);
        }

        let (fraction, rest) = match rest.split_first() {
            Some((b'.', rest)) => {
                let len = digit_run(rest);
                if len == 0 {
                    return Err(NumberError::Malformed);
                }
                rest.split_at(len)
            }
            _ => (&[][..], rest),
        };

        let (exponent, rest) = match rest.split_first() {
            Some((b'e' | b'E', rest)) => {
                let (negative, rest) = match rest.split_first() {
                    Some((b'-', rest)) => (true, rest),
                    Some((b'+', rest)) => (false, rest),
                    _ => (false, rest),
                };
                let (digits, rest) = rest.split_at(digit_run(rest));
                if digits.is_empty() {
                    return Err(NumberError::Malformed);
                }
                let magnitude = digits.iter().fold(0i64, |acc, &b| {
                    acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
                });
                (if negative { -magnitude } else { magnitude }, rest)
            }
            _ => (0, rest),
        };

        if !rest.is_empty() {
            return Err(NumberError::Malformed);
        }

        Ok(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    fn is_zero(&self) -> bool {
        all_zero(self.integer) && all_zero(self.fraction)
    }

    fn significant_digits(&self) -> usize {
        let digits = || self.integer.iter().chain(self.fraction);
        let total = self.integer.len() + self.fraction.len();
        let leading = digits().take_while(|&&b| b == b'0').count();
        if leading == total {
            return 0;
        }
        let trailing = digits().rev().take_while(|&&b| b == b'0').count();
        total - leading - trailing
    }
}

// -----------------------------------------------------------------------------
// Exact route
// -----------------------------------------------------------------------------

/// Checked decimal accumulation for the exactly decoded integer types.
trait ExactInt: Copy {
    const SIGNED: bool;
    const ZERO: Self;

    /// `self * 10 + digit`, or `self * 10 - digit` when accumulating a
    /// negative value, so that `MIN` is reachable without overflowing.
    fn push_digit(self, digit: u8, negative: bool) -> Option<Self>;

    fn times_ten(self) -> Option<Self>;
}

macro_rules! exact_int {
    ($($ty:ty),* $(,)?) => {$(
        impl ExactInt for $ty {
            const SIGNED: bool = <$ty>::MIN != 0;
            const ZERO: Self = 0;

            #[inline]
            fn push_digit(self, digit: u8, negative: bool) -> Option<Self> {
                let scaled = self.checked_mul(10)?;
                let digit = Self::from(digit);
                if negative {
                    scaled.checked_sub(digit)
                } else {
                    scaled.checked_add(digit)
                }
            }

            #[inline]
            fn times_ten(self) -> Option<Self> {
                self.checked_mul(10)
            }
        }

        impl FromJsonNumber for $ty {
            fn from_json_number(text: &str) -> Result<Self, NumberError> {
                decode_exact(text)
            }
        }
    )*};
}

exact_int!(i64, u64, i128, u128, isize, usize);

fn accumulate<T: ExactInt>(acc: T, digits: &[u8], negative: bool) -> Result<T, NumberError> {
    digits.iter().try_fold(acc, |acc, &b| {
        acc.push_digit(b - b'0', negative)
            .ok_or(NumberError::Overflow)
    })
}

fn decode_exact<T: ExactInt>(text: &str) -> Result<T, NumberError> {
    let literal = Literal::split(text)?;
    if literal.negative && !T::SIGNED {
        return Err(NumberError::Negative);
    }
    if literal.is_zero() {
        return Ok(T::ZERO);
    }

    let Literal {
        negative,
        integer,
        fraction,
        exponent,
    } = literal;

    if exponent <= 0 {
        // The point moves left: every digit that ends up behind it must be 0.
        if !all_zero(fraction) {
            return Err(NumberError::NotIntegral);
        }
        let dropped = usize::try_from(exponent.unsigned_abs()).unwrap_or(usize::MAX);
        if dropped >= integer.len() {
            return Err(NumberError::NotIntegral);
        }
        let (kept, dropped) = integer.split_at(integer.len() - dropped);
        if !all_zero(dropped) {
            return Err(NumberError::NotIntegral);
        }
        return accumulate(T::ZERO, kept, negative);
    }

    // The point moves right: fractional digits become integer digits.
    let shift = usize::try_from(exponent).unwrap_or(usize::MAX);
    let (used, rest) = fraction.split_at(shift.min(fraction.len()));
    if !all_zero(rest) {
        return Err(NumberError::NotIntegral);
    }

    let mut value = accumulate(T::ZERO, integer, negative)?;
    value = accumulate(value, used, negative)?;
    // `value` is non-zero here, so this overflows within a few dozen steps
    // even for absurd exponents.
    for _ in used.len()..shift {
        value = value.times_ten().ok_or(NumberError::Overflow)?;
    }
    Ok(value)
}

// -----------------------------------------------------------------------------
// Float routes
// -----------------------------------------------------------------------------

macro_rules! float_number {
    ($($ty:ty),* $(,)?) => {$(
        impl FromJsonNumber for $ty {
            fn from_json_number(text: &str) -> Result<Self, NumberError> {
                Literal::split(text)?;
                let value: $ty = text.parse().map_err(|_| NumberError::Malformed)?;
                if value.is_infinite() {
                    return Err(NumberError::Overflow);
                }
                Ok(value)
            }
        }
    )*};
}

float_number!(f32, f64);

/// Largest magnitude where every `f64` integer is exactly an `i64`.
const F64_EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn decode_small(text: &str, signed: bool) -> Result<i64, NumberError> {
    let literal = Literal::split(text)?;
    if literal.negative && !signed {
        return Err(NumberError::Negative);
    }
    if literal.significant_digits() > FLOAT_SAFE_DIGITS {
        return decode_exact(text);
    }

    let value: f64 = text.parse().map_err(|_| NumberError::Malformed)?;
    if value == 0.0 && !literal.is_zero() {
        // Underflowed, e.g. `1e-400`.
        return Err(NumberError::NotIntegral);
    }
    if !(-F64_EXACT_LIMIT..=F64_EXACT_LIMIT).contains(&value) {
        return Err(NumberError::Overflow);
    }

    let integral = value as i64;
    if integral as f64 != value {
        return Err(NumberError::NotIntegral);
    }
    Ok(integral)
}

macro_rules! small_int {
    ($($ty:ty),* $(,)?) => {$(
        impl FromJsonNumber for $ty {
            fn from_json_number(text: &str) -> Result<Self, NumberError> {
                let value = decode_small(text, <$ty>::MIN != 0)?;
                <$ty>::try_from(value).map_err(|_| NumberError::Overflow)
            }
        }
    )*};
}

small_int!(i8, i16, i32, u8, u16, u32);
