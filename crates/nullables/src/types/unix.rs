//! Timestamps carried as whole Unix seconds.

use std::fmt;

use serde::Serializer;
use serde_json::Value as JsonValue;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    number,
    scalar::{JsonObject, Scalar, strict_time_object},
};

use super::time::scan_time_text;

/// A timestamp truncated to whole seconds.
///
/// Encodes as an integer number of seconds since the Unix epoch at the JSON, text and driver
/// boundaries. Sub-second precision is discarded on construction.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochSeconds(OffsetDateTime);

impl EpochSeconds {
    pub const EPOCH: EpochSeconds = EpochSeconds(OffsetDateTime::UNIX_EPOCH);

    pub fn new(t: OffsetDateTime) -> Self {
        EpochSeconds(t - time::Duration::nanoseconds(i64::from(t.nanosecond())))
    }

    pub fn from_unix(secs: i64) -> Result<Self, DecodeError> {
        OffsetDateTime::from_unix_timestamp(secs)
            .map(EpochSeconds)
            .map_err(|_| DecodeError::overflow("unix time", secs))
    }

    pub fn get(self) -> OffsetDateTime {
        self.0
    }

    pub fn unix_timestamp(self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl From<OffsetDateTime> for EpochSeconds {
    fn from(t: OffsetDateTime) -> Self {
        EpochSeconds::new(t)
    }
}

impl From<EpochSeconds> for OffsetDateTime {
    fn from(t: EpochSeconds) -> Self {
        t.0
    }
}

impl fmt::Debug for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EpochSeconds")
            .field(&self.unix_timestamp())
            .finish()
    }
}

/// Floats are truncated toward zero.
fn from_number(n: &serde_json::Number) -> Result<EpochSeconds, DecodeError> {
    if let Some(secs) = n.as_i64() {
        return EpochSeconds::from_unix(secs);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.trunc() >= i64::MIN as f64 && f.trunc() < i64::MAX as f64 => {
            EpochSeconds::from_unix(f.trunc() as i64)
        }
        _ => Err(DecodeError::overflow("unix time", n)),
    }
}

fn from_rfc3339(text: &str) -> Result<EpochSeconds, DecodeError> {
    OffsetDateTime::parse(text, &Rfc3339)
        .map(EpochSeconds::new)
        .map_err(|e| DecodeError::parse("unix time", text, e))
}

impl Scalar for EpochSeconds {
    const FIELD: &'static str = "Time";

    fn zero() -> Self {
        EpochSeconds::EPOCH
    }

    /// A number of seconds, or an RFC 3339 string.
    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::Number(n) => from_number(n),
            JsonValue::String(s) => from_rfc3339(s),
            other => Err(DecodeError::mismatch("unix time", other)),
        }
    }

    fn from_json_object(object: &JsonObject) -> Result<(Self, bool), DecodeError> {
        strict_time_object(object, "unix time", Self::from_json)
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.unix_timestamp())
    }

    /// Integer seconds, or an RFC 3339 timestamp.
    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        match number::parse_int::<i64>(text) {
            Ok(secs) => EpochSeconds::from_unix(secs),
            Err(e) if e.is_overflow() => Err(e),
            Err(_) => from_rfc3339(text),
        }
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        Ok(self.unix_timestamp().to_string())
    }
}

impl Encode for EpochSeconds {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Integer(self.unix_timestamp(), None))
    }
}

impl<'r> Decode<'r> for EpochSeconds {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(
            value,
            DataType::Int | DataType::Int64 | DataType::Numeric | DataType::Text | DataType::Datetime
        );
        match value {
            Value::Integer(secs, _) => EpochSeconds::from_unix(*secs),
            Value::Text(..) => {
                let text = value.text()?;
                scan_time_text(text)
                    .map(EpochSeconds::new)
                    .ok_or_else(|| DecodeError::parse("unix time", text, "unknown layout"))
            }
            _ => Err(DecodeError::DataType(value.type_info())),
        }
    }
}
