use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    number::{self, Integer},
    scalar::Scalar,
};

/// Scan a driver value as an integer of width `I`. Numeric text is parsed with the same
/// grammar as the text boundary.
pub(crate) fn scan_integer<I: Integer>(value: &Value) -> Result<I, DecodeError> {
    compatible!(
        value,
        DataType::Int | DataType::Int64 | DataType::Numeric | DataType::Bool | DataType::Text
    );
    match value {
        Value::Text(..) => number::parse_int(value.text()?),
        _ => {
            let v = value.int64()?;
            I::from_i64(v).ok_or_else(|| DecodeError::overflow(I::NAME, v))
        }
    }
}

macro_rules! signed {
    ($($ty:ty => $field:literal),+ $(,)?) => {$(
        impl Scalar for $ty {
            const FIELD: &'static str = $field;

            fn zero() -> Self {
                0
            }

            fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
                number::from_json(value)
            }

            fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.serialize(serializer)
            }

            fn parse_text(text: &str) -> Result<Self, DecodeError> {
                number::parse_int(text)
            }

            fn format_text(&self) -> Result<String, EncodeError> {
                Ok(self.to_string())
            }
        }

        impl Encode for $ty {
            fn encode(self) -> Result<Value, EncodeError> {
                Ok(Value::Integer(self.into(), None))
            }
        }

        impl<'r> Decode<'r> for $ty {
            fn decode(value: &'r Value) -> Result<Self, DecodeError> {
                scan_integer(value)
            }
        }
    )+};
}

signed!(i8 => "Int8", i16 => "Int16", i32 => "Int32", i64 => "Int64");

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_reference_encode() {
        let value = 42i32;
        assert_eq!((&value).encode().unwrap(), Value::Integer(42, None));
        let value = -128i8;
        assert_eq!(value.encode().unwrap(), Value::Integer(-128, None));
    }

    #[test]
    fn test_scan() {
        assert_eq!(i16::decode(&Value::Integer(32767, None)).unwrap(), 32767);
        assert!(
            i16::decode(&Value::Integer(32768, None))
                .unwrap_err()
                .is_overflow()
        );
        assert_eq!(
            i32::decode(&Value::Text(b"-17".to_vec(), None)).unwrap(),
            -17
        );
        assert_eq!(
            i64::decode(&Value::Integer(1, Some(DataType::Bool))).unwrap(),
            1
        );
        assert!(matches!(
            i64::decode(&Value::Text(b"1.5".to_vec(), None)),
            Err(DecodeError::Parse { .. })
        ));
        assert!(matches!(
            i64::decode(&Value::Blob(b"1".to_vec(), None)),
            Err(DecodeError::DataType(DataType::Blob))
        ));
        assert!(matches!(
            i64::decode(&Value::Double(1.0, None)),
            Err(DecodeError::DataType(DataType::Float))
        ));
    }

    #[test]
    fn test_json_serialize_is_integral() {
        assert_eq!(json_of(7i8), json!(7));
        assert_eq!(json_of(i64::MAX), json!(i64::MAX));
        assert_eq!(i64::MIN.format_text().unwrap(), "-9223372036854775808");
    }

    fn json_of<T: Scalar>(v: T) -> JsonValue {
        v.serialize_json(serde_json::value::Serializer).unwrap()
    }
}
