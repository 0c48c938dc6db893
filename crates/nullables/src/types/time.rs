//! Timestamps and the process-wide timestamp layout.
//!
//! Text and JSON timestamps use a [`TimeFormat`]. The process default is RFC 3339 and can be
//! replaced once at startup:
//!
//! ```
//! use nullables::{TimeFormat, null};
//!
//! let layout = TimeFormat::parse("[year]-[month]-[day] [hour]:[minute]:[second]").unwrap();
//! let t = null::Time::parse_text_with("2012-12-21 21:21:21", &layout).unwrap();
//! assert_eq!(t.value().unix_timestamp(), 1356124881);
//! ```
//!
//! The driver boundary does not consult the layout: timestamps are written as RFC 3339 text
//! and read from any of the layouts SQLite commonly stores, or from Unix seconds.

use std::sync::{PoisonError, RwLock};

use serde::{Serializer, ser};
use serde_json::Value as JsonValue;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{self, FormatItem, OwnedFormatItem, well_known::Rfc3339},
    macros::format_description as fd,
};
use tracing::debug;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    nullable::{Family, Nullable},
    scalar::{JsonObject, Scalar, strict_time_object},
};

/// Layout used for timestamps at the text and JSON boundaries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// RFC 3339 with nanosecond precision, e.g. `2012-12-21T21:21:21.123Z`.
    #[default]
    Rfc3339,
    /// A custom layout. Layouts without an offset are read as UTC.
    Layout(OwnedFormatItem),
}

static DEFAULT: RwLock<TimeFormat> = RwLock::new(TimeFormat::Rfc3339);

impl TimeFormat {
    /// Parse a `time` format description (version 2 syntax), e.g.
    /// `[year]-[month]-[day] [hour]:[minute]:[second]`.
    pub fn parse(layout: &str) -> Result<Self, DecodeError> {
        format_description::parse_owned::<2>(layout)
            .map(TimeFormat::Layout)
            .map_err(|e| DecodeError::parse("time layout", layout, e))
    }

    /// Replace the process-wide layout. Intended to be called once, before wrappers are used
    /// concurrently.
    pub fn set_default(format: TimeFormat) {
        debug!(?format, "setting default time format");
        *DEFAULT.write().unwrap_or_else(PoisonError::into_inner) = format;
    }

    /// The process-wide layout.
    pub fn current() -> TimeFormat {
        DEFAULT
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn parse_time(&self, text: &str) -> Result<OffsetDateTime, DecodeError> {
        let err = |e: time::error::Parse| DecodeError::parse("time", text, e);
        match self {
            TimeFormat::Rfc3339 => OffsetDateTime::parse(text, &Rfc3339).map_err(err),
            TimeFormat::Layout(layout) => OffsetDateTime::parse(text, layout).or_else(|e| {
                PrimitiveDateTime::parse(text, layout)
                    .map(PrimitiveDateTime::assume_utc)
                    .map_err(|_| err(e))
            }),
        }
    }

    pub fn format_time(&self, t: &OffsetDateTime) -> Result<String, EncodeError> {
        match self {
            TimeFormat::Rfc3339 => t.format(&Rfc3339),
            TimeFormat::Layout(layout) => t.format(layout),
        }
        .map_err(|e| EncodeError::Conversion(format!("failed to format time: {e}")))
    }
}

impl<F: Family> Nullable<OffsetDateTime, F> {
    /// Decode text with an explicit layout instead of the process default.
    pub fn parse_text_with(text: &str, format: &TimeFormat) -> Result<Self, DecodeError> {
        if text.is_empty() || text == "null" {
            return Ok(Self::null());
        }
        format.parse_time(text).map(Self::from_value)
    }

    /// Encode text with an explicit layout instead of the process default.
    pub fn to_text_with(&self, format: &TimeFormat) -> Result<String, EncodeError> {
        match self.as_option() {
            Some(t) => format.format_time(t),
            None if F::COLLAPSES_ZERO => format.format_time(&OffsetDateTime::UNIX_EPOCH),
            None => Ok(String::new()),
        }
    }
}

fn time_from_json(value: &JsonValue) -> Result<OffsetDateTime, DecodeError> {
    match value {
        JsonValue::String(s) => TimeFormat::current().parse_time(s),
        other => Err(DecodeError::mismatch("time", other)),
    }
}

impl Scalar for OffsetDateTime {
    const FIELD: &'static str = "Time";

    fn zero() -> Self {
        OffsetDateTime::UNIX_EPOCH
    }

    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        time_from_json(value)
    }

    /// Only the exact `{"Time": "..", "Valid": bool}` shape is accepted.
    fn from_json_object(object: &JsonObject) -> Result<(Self, bool), DecodeError> {
        strict_time_object(object, "time", time_from_json)
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.format_text().map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        TimeFormat::current().parse_time(text)
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        TimeFormat::current().format_time(self)
    }
}

impl Encode for OffsetDateTime {
    fn encode(self) -> Result<Value, EncodeError> {
        let formatted = self.format(&Rfc3339).map_err(|e| {
            EncodeError::Conversion(format!("failed to format OffsetDateTime: {e}"))
        })?;
        Ok(Value::Text(formatted.into_bytes(), None))
    }
}

impl<'r> Decode<'r> for OffsetDateTime {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        scan_time(value)
    }
}

pub(crate) fn scan_time(value: &Value) -> Result<OffsetDateTime, DecodeError> {
    compatible!(
        value,
        DataType::Text | DataType::Datetime | DataType::Date | DataType::Int | DataType::Int64
    );
    match value {
        Value::Integer(secs, _) => OffsetDateTime::from_unix_timestamp(*secs)
            .map_err(|_| DecodeError::overflow("time", secs)),
        Value::Text(..) => {
            let text = value.text()?;
            scan_time_text(text).ok_or_else(|| DecodeError::parse("time", text, "unknown layout"))
        }
        _ => Err(DecodeError::DataType(value.type_info())),
    }
}

const OFFSET_LAYOUTS: &[&[FormatItem<'static>]] = &[
    fd!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"),
    fd!("[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"),
];

const UTC_LAYOUTS: &[&[FormatItem<'static>]] = &[
    fd!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    fd!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    fd!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    fd!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    fd!("[year]-[month]-[day] [hour]:[minute]"),
    fd!("[year]-[month]-[day]T[hour]:[minute]"),
];

/// Try the layouts SQLite commonly stores, most specific first. Layouts without an offset
/// are read as UTC.
pub(crate) fn scan_time_text(text: &str) -> Option<OffsetDateTime> {
    if let Ok(t) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(t);
    }
    let text = text.strip_suffix('Z').unwrap_or(text);
    for layout in OFFSET_LAYOUTS {
        if let Ok(t) = OffsetDateTime::parse(text, layout) {
            return Some(t);
        }
    }
    for layout in UTC_LAYOUTS {
        if let Ok(t) = PrimitiveDateTime::parse(text, layout) {
            return Some(t.assume_utc());
        }
    }
    Date::parse(text, fd!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;
    use crate::null;

    #[test]
    fn test_encode_decode() {
        let dt = datetime!(2023-12-25 15:30:45.123456789 +05:30);
        let encoded = dt.encode().unwrap();
        let decoded = OffsetDateTime::decode(&encoded).unwrap();
        assert_eq!(dt, decoded);
        assert_eq!(decoded.offset(), dt.offset());
    }

    #[test]
    fn test_scan_unix_seconds() {
        let v = Value::Integer(1703516445, Some(DataType::Int64));
        assert_eq!(
            OffsetDateTime::decode(&v).unwrap(),
            datetime!(2023-12-25 15:00:45 UTC)
        );
    }

    #[test]
    fn test_scan_layouts() {
        for (text, expected) in [
            ("2023-12-25T15:30:45.123Z", datetime!(2023-12-25 15:30:45.123 UTC)),
            ("2023-12-25 15:30:45.123", datetime!(2023-12-25 15:30:45.123 UTC)),
            ("2023-12-25 15:30:45+05:30", datetime!(2023-12-25 15:30:45 +05:30)),
            ("2023-12-25 15:30:45.5-01:00", datetime!(2023-12-25 15:30:45.5 -01:00)),
            ("2023-12-25T15:30:45", datetime!(2023-12-25 15:30:45 UTC)),
            ("2023-12-25 15:30:45Z", datetime!(2023-12-25 15:30:45 UTC)),
            ("2023-12-25 15:30", datetime!(2023-12-25 15:30 UTC)),
            ("2023-12-25", datetime!(2023-12-25 0:00 UTC)),
        ] {
            let v = Value::Text(text.as_bytes().to_vec(), Some(DataType::Datetime));
            assert_eq!(OffsetDateTime::decode(&v).unwrap(), expected, "{text}");
        }

        let v = Value::Text(b"2023-12-2515:30:45+05:30".to_vec(), None);
        assert!(OffsetDateTime::decode(&v).is_err());
        assert!(matches!(
            OffsetDateTime::decode(&Value::Double(1.0, None)),
            Err(DecodeError::DataType(DataType::Float))
        ));
    }

    #[test]
    fn test_rfc3339_default() {
        let t = OffsetDateTime::parse_text("2012-12-21T21:21:21Z").unwrap();
        assert_eq!(t, datetime!(2012-12-21 21:21:21 UTC));
        assert_eq!(
            datetime!(2012-12-21 21:21:21 UTC).format_text().unwrap(),
            "2012-12-21T21:21:21Z"
        );
        assert!(OffsetDateTime::parse_text("2012-12-21").is_err());
    }

    #[test]
    fn test_explicit_layout() {
        let layout = TimeFormat::parse("[day]/[month]/[year] [hour]:[minute]").unwrap();
        let t = null::Time::parse_text_with("21/12/2012 21:21", &layout).unwrap();
        assert_eq!(*t.value(), datetime!(2012-12-21 21:21 UTC));
        assert_eq!(t.to_text_with(&layout).unwrap(), "21/12/2012 21:21");
        assert_eq!(null::Time::null().to_text_with(&layout).unwrap(), "");
        assert!(!null::Time::parse_text_with("", &layout).unwrap().is_valid());
        assert!(TimeFormat::parse("[nonsense]").is_err());
    }

    #[test]
    fn test_strict_object() {
        let (t, valid) = OffsetDateTime::from_json_object(
            json!({"Time": "2012-12-21T21:21:21Z", "Valid": true})
                .as_object()
                .unwrap(),
        )
        .unwrap();
        assert!(valid);
        assert_eq!(t, datetime!(2012-12-21 21:21:21 UTC));

        for bad in [
            json!({"hello": "world"}),
            json!({"time": "2012-12-21T21:21:21Z", "valid": true}),
            json!({"Time": 5, "Valid": true}),
        ] {
            assert!(OffsetDateTime::from_json_object(bad.as_object().unwrap()).is_err());
        }
    }
}
