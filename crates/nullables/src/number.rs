//! Shared integer decoding.
//!
//! Every fixed-width integer payload, signed or unsigned, in both families, decodes through
//! this module. Text is parsed with checked radix-10 arithmetic so out-of-range input is
//! reported as [`DecodeError::Overflow`] rather than truncated.

use atoi::{FromRadix10Checked, FromRadix10SignedChecked};
use serde_json::{Number, Value as JsonValue};

use crate::error::DecodeError;

/// Width policy for one integer type.
pub trait Integer: Copy + Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    fn from_i64(v: i64) -> Option<Self>;
    fn from_u64(v: u64) -> Option<Self>;

    /// Checked radix-10 parse. Returns the value (`None` on overflow) and the number of bytes
    /// consumed.
    fn parse_digits(text: &[u8]) -> (Option<Self>, usize);

    /// Whether an integral float lies inside the type's range.
    fn holds(f: f64) -> bool;
}

macro_rules! integer {
    ($ty:ty, $name:literal, $parse:path) => {
        impl Integer for $ty {
            const NAME: &'static str = $name;

            fn from_i64(v: i64) -> Option<Self> {
                <$ty>::try_from(v).ok()
            }

            fn from_u64(v: u64) -> Option<Self> {
                <$ty>::try_from(v).ok()
            }

            fn parse_digits(text: &[u8]) -> (Option<Self>, usize) {
                $parse(text)
            }

            fn holds(f: f64) -> bool {
                // MAX + 1 is a power of two, so the upper comparison is exact in f64
                f >= <$ty>::MIN as f64 && f < <$ty>::MAX as f64 + 1.0
            }
        }
    };
}

integer!(i8, "int8", FromRadix10SignedChecked::from_radix_10_signed_checked);
integer!(i16, "int16", FromRadix10SignedChecked::from_radix_10_signed_checked);
integer!(i32, "int32", FromRadix10SignedChecked::from_radix_10_signed_checked);
integer!(i64, "int64", FromRadix10SignedChecked::from_radix_10_signed_checked);
integer!(u8, "uint8", FromRadix10Checked::from_radix_10_checked);
integer!(u16, "uint16", FromRadix10Checked::from_radix_10_checked);
integer!(u32, "uint32", FromRadix10Checked::from_radix_10_checked);
integer!(u64, "uint64", FromRadix10Checked::from_radix_10_checked);

/// Parse base-10 text at the width of `I`.
///
/// Signed widths accept a leading `+` or `-`; unsigned widths accept digits only. At least one
/// digit is required and nothing may follow the digits.
pub fn parse_int<I: Integer>(text: &str) -> Result<I, DecodeError> {
    let bytes = text.as_bytes();
    let (parsed, used) = I::parse_digits(bytes);
    if used != bytes.len() || !bytes.last().is_some_and(u8::is_ascii_digit) {
        return Err(DecodeError::parse(I::NAME, text, "invalid syntax"));
    }
    parsed.ok_or_else(|| DecodeError::overflow(I::NAME, text))
}

/// Convert a JSON number to `I`.
///
/// Integer literals that fit 64 bits are range checked against `I`. Anything the JSON parser
/// could only represent as a float is either an integer literal too large for 64 bits
/// (overflow) or a literal with a fraction or exponent, which is rejected rather than
/// truncated.
pub fn from_number<I: Integer>(n: &Number) -> Result<I, DecodeError> {
    if let Some(v) = n.as_i64() {
        return I::from_i64(v).ok_or_else(|| DecodeError::overflow(I::NAME, n));
    }
    if let Some(v) = n.as_u64() {
        return I::from_u64(v).ok_or_else(|| DecodeError::overflow(I::NAME, n));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && !I::holds(f) => Err(DecodeError::overflow(I::NAME, n)),
        _ => Err(DecodeError::parse(I::NAME, &n.to_string(), "not an integer")),
    }
}

/// Decode a bare JSON token as `I`: a number, or a string holding base-10 text.
pub fn from_json<I: Integer>(value: &JsonValue) -> Result<I, DecodeError> {
    match value {
        JsonValue::Number(n) => from_number(n),
        JsonValue::String(s) => parse_int(s),
        other => Err(DecodeError::mismatch(I::NAME, other)),
    }
}
