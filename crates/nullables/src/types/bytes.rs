use bstr::ByteSlice;
use serde::{Serializer, ser};
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    scalar::Scalar,
};

fn utf8(bytes: &[u8]) -> Result<&str, EncodeError> {
    std::str::from_utf8(bytes).map_err(|_| {
        EncodeError::Unsupported(format!("non-UTF-8 bytes {:?}", bytes.as_bstr()))
    })
}

impl Scalar for Vec<u8> {
    const FIELD: &'static str = "Bytes";

    fn zero() -> Self {
        Vec::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    /// A JSON string, taken as its UTF-8 bytes.
    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(DecodeError::mismatch("bytes", other)),
        }
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(utf8(self).map_err(ser::Error::custom)?)
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        Ok(text.as_bytes().to_vec())
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        utf8(self).map(ToOwned::to_owned)
    }
}

impl Encode for &[u8] {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Blob(self.to_owned(), None))
    }
}

impl Encode for Vec<u8> {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Blob(self, None))
    }
}

impl<'r> Decode<'r> for &'r [u8] {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Blob | DataType::Text);
        Ok(value.blob())
    }
}

impl<'r> Decode<'r> for Vec<u8> {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Blob | DataType::Text);
        Ok(value.blob().to_owned())
    }
}
