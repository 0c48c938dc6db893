use serde::Serializer;
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    scalar::Scalar,
};

impl Scalar for String {
    const FIELD: &'static str = "String";

    fn zero() -> Self {
        String::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::String(s) => Ok(s.clone()),
            other => Err(DecodeError::mismatch("string", other)),
        }
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self)
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        Ok(text.to_owned())
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        Ok(self.clone())
    }
}

impl Encode for &str {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Text(self.as_bytes().to_vec(), None))
    }
}

impl Encode for String {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Text(self.into_bytes(), None))
    }
}

impl<'r> Decode<'r> for &'r str {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(
            value,
            DataType::Text | DataType::Date | DataType::Time | DataType::Datetime
        );
        value.text()
    }
}

impl<'r> Decode<'r> for String {
    /// Text, or a blob holding UTF-8.
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(
            value,
            DataType::Text | DataType::Blob | DataType::Date | DataType::Time | DataType::Datetime
        );
        match value {
            Value::Blob(bytes, _) => String::from_utf8(bytes.clone())
                .map_err(|e| DecodeError::Conversion(e.to_string())),
            _ => value.text().map(ToOwned::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_accepts_strings_only() {
        assert_eq!(String::from_json(&json!("hi")).unwrap(), "hi");
        assert!(matches!(
            String::from_json(&json!(1)),
            Err(DecodeError::TypeMismatch {
                expected: "string",
                found: "number"
            })
        ));
    }

    #[test]
    fn test_scan() {
        let v = "hello".encode().unwrap();
        assert_eq!(v, Value::Text(b"hello".to_vec(), None));
        assert_eq!(<&str>::decode(&v).unwrap(), "hello");
        assert_eq!(
            String::decode(&Value::Blob(b"blob".to_vec(), None)).unwrap(),
            "blob"
        );
        assert!(matches!(
            String::decode(&Value::Blob(vec![0xff], None)),
            Err(DecodeError::Conversion(_))
        ));
        assert!(matches!(
            String::decode(&Value::Integer(1, None)),
            Err(DecodeError::DataType(DataType::Int))
        ));
    }
}
