//! PostgreSQL-style intervals.
//!
//! The literal form is the one PostgreSQL emits in its default output style, e.g.
//! `1 year 2 mons 3 days 04:05:06.000007`. Parsing reads `<n> <unit>` pairs followed by an
//! optional clock part. Years add twelve months each, a `day`/`days` pair replaces any earlier
//! day count, and unknown units are ignored.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    number,
    scalar::field,
};

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;

/// Validity of an [`Interval`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    /// Never assigned. Has no text or driver encoding.
    #[default]
    Undefined = 0,
    Null = 1,
    Present = 2,
}

impl TryFrom<u8> for Status {
    type Error = DecodeError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Status::Undefined),
            1 => Ok(Status::Null),
            2 => Ok(Status::Present),
            _ => Err(DecodeError::Conversion(format!("unknown interval status {v}"))),
        }
    }
}

/// A calendar-aware span: months and days are kept apart from the clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    pub months: i32,
    pub days: i32,
    pub microseconds: i64,
    pub status: Status,
}

fn bad_format(text: &str, reason: &str) -> DecodeError {
    DecodeError::parse("interval", text, reason)
}

impl Interval {
    pub fn new(months: i32, days: i32, microseconds: i64) -> Self {
        Interval {
            months,
            days,
            microseconds,
            status: Status::Present,
        }
    }

    pub fn null() -> Self {
        Interval {
            status: Status::Null,
            ..Interval::default()
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == Status::Present
    }

    pub fn is_zero(&self) -> bool {
        !self.is_present()
    }

    /// Parse the literal form.
    pub fn parse_literal(text: &str) -> Result<Self, DecodeError> {
        let parts: Vec<&str> = text.split(' ').collect();
        let mut months: i32 = 0;
        let mut days: i32 = 0;
        let mut microseconds: i64 = 0;

        for pair in parts.chunks_exact(2) {
            let scalar: i64 = pair[0]
                .parse()
                .map_err(|_| bad_format(text, "bad interval format"))?;
            let narrow =
                |v: i64| i32::try_from(v).map_err(|_| DecodeError::overflow("interval", text));
            match pair[1] {
                "year" | "years" => {
                    let add = scalar
                        .checked_mul(12)
                        .ok_or_else(|| DecodeError::overflow("interval", text))?;
                    months = narrow(i64::from(months) + add)?;
                }
                "mon" | "mons" => months = narrow(i64::from(months) + scalar)?,
                "day" | "days" => days = narrow(scalar)?,
                _ => {}
            }
        }

        if parts.len() % 2 == 1 {
            let clock = parts[parts.len() - 1];
            let mut fields = clock.splitn(3, ':');
            let (Some(hours), Some(minutes), Some(seconds)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(bad_format(text, "bad interval format"));
            };
            let (negative, hours) = match hours.strip_prefix('-') {
                Some(h) => (true, h),
                None => (false, hours),
            };
            // clock fields are bare digits; only the hour carries a sign
            let digits = |part: &str, reason: &str| {
                number::parse_int::<u32>(part)
                    .map(i64::from)
                    .map_err(|_| bad_format(text, reason))
            };
            let hours = digits(hours, "bad interval hour format")?;
            let minutes = digits(minutes, "bad interval minute format")?;
            let (seconds, frac) = seconds.split_once('.').unwrap_or((seconds, ""));
            let seconds = digits(seconds, "bad interval second format")?;
            let mut micros = 0;
            if !frac.is_empty() {
                if frac.len() > 6 {
                    return Err(bad_format(text, "bad interval decimal format"));
                }
                micros = digits(frac, "bad interval decimal format")?;
                // ".5" means 500000 microseconds
                micros *= 10i64.pow(6 - frac.len() as u32);
            }
            microseconds = hours
                .checked_mul(MICROS_PER_HOUR)
                .and_then(|v| v.checked_add(minutes.checked_mul(MICROS_PER_MINUTE)?))
                .and_then(|v| v.checked_add(seconds.checked_mul(MICROS_PER_SECOND)?))
                .and_then(|v| v.checked_add(micros))
                .ok_or_else(|| DecodeError::overflow("interval", text))?;
            if negative {
                microseconds = -microseconds;
            }
        }

        Ok(Interval::new(months, days, microseconds))
    }

    /// Render the literal form. `None` for a null interval; an undefined interval cannot be
    /// rendered.
    pub fn to_literal(&self) -> Result<Option<String>, EncodeError> {
        match self.status {
            Status::Null => Ok(None),
            Status::Undefined => Err(EncodeError::UnsupportedStatus(self.status)),
            Status::Present => Ok(Some(self.to_string())),
        }
    }

    /// Decode raw JSON bytes.
    pub fn from_json(input: &[u8]) -> Result<Self, DecodeError> {
        if input.is_empty() {
            return Err(DecodeError::NoData);
        }
        let value: JsonValue = serde_json::from_slice(input)?;
        Self::from_json_value(&value)
    }

    /// `null`, a quoted literal, or the field-wise object
    /// `{"Months": .., "Days": .., "Microseconds": .., "Status": ..}`.
    pub fn from_json_value(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::Null => Ok(Interval::null()),
            JsonValue::String(s) => Self::parse_literal(s),
            JsonValue::Object(object) => {
                let int = |key: &str| match field(object, key) {
                    None | Some(JsonValue::Null) => Ok(0),
                    Some(v) => number::from_json::<i64>(v),
                };
                let status = match field(object, "Status") {
                    None | Some(JsonValue::Null) => Status::Undefined,
                    Some(v) => Status::try_from(number::from_json::<u8>(v)?)?,
                };
                Ok(Interval {
                    months: i32::try_from(int("Months")?)?,
                    days: i32::try_from(int("Days")?)?,
                    microseconds: int("Microseconds")?,
                    status,
                })
            }
            other => Err(DecodeError::mismatch("interval", other)),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl fmt::Display for Interval {
    /// The literal form, regardless of status.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months != 0 {
            write!(f, "{} mon ", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{} day ", self.days)?;
        }
        if self.microseconds < 0 {
            f.write_str("-")?;
        }
        let abs = self.microseconds.unsigned_abs();
        let hour = MICROS_PER_HOUR.unsigned_abs();
        let minute = MICROS_PER_MINUTE.unsigned_abs();
        let second = MICROS_PER_SECOND.unsigned_abs();
        write!(
            f,
            "{:02}:{:02}:{:02}.{:06}",
            abs / hour,
            abs % hour / minute,
            abs % minute / second,
            abs % second
        )
    }
}

impl FromStr for Interval {
    type Err = DecodeError;

    /// Blank text and `null` give a null interval.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "" | "null" => Ok(Interval::null()),
            _ => Interval::parse_literal(text),
        }
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_literal() {
            Ok(Some(literal)) => serializer.serialize_str(&literal),
            Ok(None) | Err(EncodeError::UnsupportedStatus(_)) => serializer.serialize_none(),
            Err(e) => Err(ser::Error::custom(e)),
        }
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Interval::from_json_value(&value).map_err(de::Error::custom)
    }
}

impl Encode for Interval {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(match self.to_literal()? {
            Some(literal) => Value::Text(literal.into_bytes(), None),
            None => Value::NULL,
        })
    }
}

impl<'r> Decode<'r> for Interval {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(Interval::null());
        }
        compatible!(value, DataType::Text);
        Interval::parse_literal(value.text()?)
    }
}
