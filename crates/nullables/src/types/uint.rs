use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    number,
    scalar::Scalar,
};

use super::int::scan_integer;

macro_rules! unsigned {
    ($($ty:ty => $field:literal $(| $alias:literal)*),+ $(,)?) => {$(
        impl Scalar for $ty {
            const FIELD: &'static str = $field;
            const FIELD_ALIASES: &'static [&'static str] = &[$($alias),*];

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
    )+};
}

// `Byte` is the same payload as `Uint8`
unsigned!(u8 => "Uint8" | "Byte", u16 => "Uint16", u32 => "Uint32", u64 => "Uint64");

macro_rules! widened {
    ($($ty:ty),+) => {$(
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

widened!(u8, u16, u32);

impl Encode for u64 {
    /// Bit-cast into the signed 64-bit driver integer. Values above `i64::MAX` are stored as
    /// negative integers; [`Decode`] restores them, but the database compares them as signed.
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Integer(self as i64, None))
    }
}

impl<'r> Decode<'r> for u64 {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(
            value,
            DataType::Int | DataType::Int64 | DataType::Numeric | DataType::Bool | DataType::Text
        );
        match value {
            Value::Text(..) => number::parse_int(value.text()?),
            // reverses the bit-cast done by encode
            _ => Ok(value.int64()? as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_bit_cast() {
        let v = u64::MAX.encode().unwrap();
        assert_eq!(v, Value::Integer(-1, None));
        assert_eq!(u64::decode(&v).unwrap(), u64::MAX);
        assert_eq!(
            u64::decode(&Value::Text(b"18446744073709551615".to_vec(), None)).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_widened_scan() {
        assert_eq!(u8::decode(&Value::Integer(255, None)).unwrap(), 255);
        assert!(u8::decode(&Value::Integer(-1, None)).unwrap_err().is_overflow());
        assert_eq!(u32::encode(u32::MAX).unwrap(), Value::Integer(4294967295, None));
    }

    #[test]
    fn test_text() {
        assert_eq!(u16::parse_text("65535").unwrap(), 65535);
        assert!(u16::parse_text("65536").unwrap_err().is_overflow());
        assert!(u16::parse_text("-1").is_err());
        assert_eq!(u64::MAX.format_text().unwrap(), "18446744073709551615");
    }
}
