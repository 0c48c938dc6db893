//! Durations.
//!
//! Text and JSON use the compact unit grammar: a sign followed by one or more decimal
//! numbers with a unit suffix, such as `300ms`, `-1.5h` or `2h45m`. Valid units are `ns`,
//! `us` (or `µs`), `ms`, `s`, `m` and `h`. The driver boundary uses clock notation,
//! `HH:MM:SS[.fraction]`, or an integer count of nanoseconds.

use serde::Serializer;
use serde_json::Value as JsonValue;
use time::Duration;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    number,
    scalar::Scalar,
};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest magnitude accepted: `2^63` nanoseconds, reachable only by negative values.
const LIMIT: u128 = 1 << 63;

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000), // U+00B5 micro sign
    ("μs", 1_000), // U+03BC Greek mu
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3600 * NANOS_PER_SEC),
];

/// Render a duration in the unit grammar: `0s`, `1.5µs`, `300ms`, `1h2m3.5s`.
pub fn format_units(d: Duration) -> String {
    let nanos = d.whole_nanoseconds();
    if nanos == 0 {
        return "0s".into();
    }
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let u = nanos.unsigned_abs();
    if u < NANOS_PER_SEC {
        let (unit, scale) = match u {
            0..1_000 => ("ns", 1),
            1_000..1_000_000 => ("µs", 1_000),
            _ => ("ms", 1_000_000),
        };
        push_decimal(&mut out, u, scale);
        out.push_str(unit);
        return out;
    }
    let secs = u / NANOS_PER_SEC;
    let (hours, minutes) = (secs / 3600, secs / 60 % 60);
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    push_decimal(&mut out, u % (60 * NANOS_PER_SEC), NANOS_PER_SEC);
    out.push('s');
    out
}

/// Append `value / scale` with the remainder as a trimmed decimal fraction.
fn push_decimal(out: &mut String, value: u128, scale: u128) {
    out.push_str(&(value / scale).to_string());
    let frac = value % scale;
    if frac != 0 {
        let width = scale.ilog10() as usize;
        let digits = format!("{frac:0width$}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// Parse the unit grammar. A bare `0` is accepted; any other number needs a unit.
pub fn parse_units(text: &str) -> Result<Duration, DecodeError> {
    let invalid = |reason: String| DecodeError::parse("duration", text, reason);
    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid("invalid duration".into()));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let n = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (whole, after) = rest.split_at(n);
        let (frac, after) = match after.strip_prefix('.') {
            Some(after) => after.split_at(after.bytes().take_while(u8::is_ascii_digit).count()),
            None => ("", after),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("invalid duration".into()));
        }
        let end = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(end);
        if unit.is_empty() {
            return Err(invalid("missing unit in duration".into()));
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| invalid(format!("unknown unit {unit:?} in duration")))?;

        let mut v: u128 = 0;
        for d in whole.bytes() {
            v = v * 10 + u128::from(d - b'0');
            if v > LIMIT {
                return Err(DecodeError::overflow("duration", text));
            }
        }
        v *= scale;
        // digits past nanosecond resolution of the largest unit cannot change the result
        let frac = &frac[..frac.len().min(18)];
        if !frac.is_empty() {
            let digits: u128 = frac.parse().unwrap_or(0);
            v += digits * scale / 10u128.pow(frac.len() as u32);
        }
        total += v;
        if total > LIMIT {
            return Err(DecodeError::overflow("duration", text));
        }
        rest = after;
    }

    let nanos = if negative {
        (-(total as i128)) as i64
    } else {
        i64::try_from(total).map_err(|_| DecodeError::overflow("duration", text))?
    };
    Ok(Duration::nanoseconds(nanos))
}

/// Render clock notation: `[-]HH:MM:SS[.fraction]`.
fn format_clock(d: Duration) -> String {
    let nanos = d.whole_nanoseconds();
    let u = nanos.unsigned_abs();
    let secs = u / NANOS_PER_SEC;
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    out.push_str(&format!(
        "{:02}:{:02}:",
        secs / 3600,
        secs / 60 % 60
    ));
    if secs % 60 < 10 {
        out.push('0');
    }
    push_decimal(&mut out, u % (60 * NANOS_PER_SEC), NANOS_PER_SEC);
    out
}

/// Parse clock notation. Exactly three colon-separated numeric parts are required; only the
/// hours may carry a sign and only the seconds a fraction.
fn parse_clock(text: &str) -> Result<Duration, DecodeError> {
    let invalid = || DecodeError::parse("duration", text, "expected HH:MM:SS[.fraction]");
    let digits = |part: &str| number::parse_int::<u32>(part).map_err(|_| invalid());

    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let (negative, hours) = match hours.strip_prefix('-') {
        Some(h) => (true, h),
        None => (false, hours),
    };
    let (seconds, frac) = match seconds.split_once('.') {
        Some((s, f)) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => (s, f),
        Some(_) => return Err(invalid()),
        None => (seconds, ""),
    };
    let (h, m, s) = (digits(hours)?, digits(minutes)?, digits(seconds)?);
    if m >= 60 || s >= 60 {
        return Err(invalid());
    }
    let frac = &frac[..frac.len().min(9)];
    let nanos = if frac.is_empty() {
        0
    } else {
        digits(frac)? * 10u32.pow(9 - frac.len() as u32)
    };

    let secs = i64::from(h) * 3600 + i64::from(m) * 60 + i64::from(s);
    let d = Duration::new(secs, nanos as i32);
    Ok(if negative { -d } else { d })
}

impl Scalar for Duration {
    const FIELD: &'static str = "Duration";

    fn zero() -> Self {
        Duration::ZERO
    }

    /// A unit-grammar string, or an integer count of nanoseconds.
    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::String(s) => parse_units(s),
            JsonValue::Number(n) => number::from_number::<i64>(n).map(Duration::nanoseconds),
            other => Err(DecodeError::mismatch("duration", other)),
        }
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_units(*self))
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        parse_units(text)
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        Ok(format_units(*self))
    }
}

impl Encode for Duration {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Text(format_clock(self).into_bytes(), None))
    }
}

impl<'r> Decode<'r> for Duration {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(
            value,
            DataType::Int | DataType::Int64 | DataType::Numeric | DataType::Text | DataType::Time
        );
        match value {
            Value::Integer(nanos, _) => Ok(Duration::nanoseconds(*nanos)),
            Value::Text(..) => parse_clock(value.text()?),
            _ => Err(DecodeError::DataType(value.type_info())),
        }
    }
}
