use serde::Serializer;
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    scalar::Scalar,
};

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(text: &str) -> Result<bool, DecodeError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(DecodeError::parse("bool", text, "invalid syntax")),
    }
}

impl Scalar for bool {
    const FIELD: &'static str = "Bool";

    fn zero() -> Self {
        false
    }

    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::Bool(b) => Ok(*b),
            other => Err(DecodeError::mismatch("bool", other)),
        }
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*self)
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        parse_bool(text)
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        Ok(self.to_string())
    }
}

impl Encode for bool {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Integer(self.into(), None))
    }
}

impl<'r> Decode<'r> for bool {
    fn decode(value: &'r Value) -> Result<bool, DecodeError> {
        compatible!(
            value,
            DataType::Bool | DataType::Int | DataType::Int64 | DataType::Numeric | DataType::Text
        );
        match value {
            Value::Text(..) => parse_bool(value.text()?),
            _ => Ok(value.int64()? != 0),
        }
    }
}
