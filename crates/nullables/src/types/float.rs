use serde::{Serializer, ser};
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
    scalar::Scalar,
};

fn parse_f64(kind: &'static str, text: &str) -> Result<f64, DecodeError> {
    text.parse::<f64>()
        .map_err(|e| DecodeError::parse(kind, text, e))
}

/// Narrow to `f32`, rejecting finite values outside its range.
fn narrow(v: f64, input: &dyn std::fmt::Display) -> Result<f32, DecodeError> {
    let n = v as f32;
    if v.is_finite() && n.is_infinite() {
        return Err(DecodeError::overflow("float32", input));
    }
    Ok(n)
}

fn json_f64(kind: &'static str, value: &JsonValue) -> Result<f64, DecodeError> {
    match value {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| DecodeError::parse(kind, &n.to_string(), "not a float")),
        JsonValue::String(s) => parse_f64(kind, s),
        other => Err(DecodeError::mismatch(kind, other)),
    }
}

fn finite<S: Serializer>(v: f64) -> Result<(), S::Error> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ser::Error::custom(EncodeError::Unsupported(format!(
            "{v} has no JSON representation"
        ))))
    }
}

fn scan_f64(kind: &'static str, value: &Value) -> Result<f64, DecodeError> {
    compatible!(
        value,
        DataType::Float | DataType::Numeric | DataType::Int | DataType::Int64 | DataType::Text
    );
    match value {
        Value::Text(..) => parse_f64(kind, value.text()?),
        _ => value.double(),
    }
}

impl Scalar for f32 {
    const FIELD: &'static str = "Float32";

    fn zero() -> Self {
        0.0
    }

    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        narrow(json_f64("float32", value)?, value)
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        finite::<S>(f64::from(*self))?;
        serializer.serialize_f32(*self)
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        narrow(parse_f64("float32", text)?, &text)
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        Ok(self.to_string())
    }
}

impl Scalar for f64 {
    const FIELD: &'static str = "Float64";

    fn zero() -> Self {
        0.0
    }

    fn from_json(value: &JsonValue) -> Result<Self, DecodeError> {
        json_f64("float64", value)
    }

    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        finite::<S>(*self)?;
        serializer.serialize_f64(*self)
    }

    fn parse_text(text: &str) -> Result<Self, DecodeError> {
        parse_f64("float64", text)
    }

    fn format_text(&self) -> Result<String, EncodeError> {
        Ok(self.to_string())
    }
}

impl Encode for f32 {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Double(self.into(), None))
    }
}

impl<'r> Decode<'r> for f32 {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        let v = scan_f64("float32", value)?;
        narrow(v, &v)
    }
}

impl Encode for f64 {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Double(self, None))
    }
}

impl<'r> Decode<'r> for f64 {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        scan_f64("float64", value)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::E;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_reference_encode() {
        match (&E).encode().unwrap() {
            Value::Double(v, _) => assert!((v - E).abs() < f64::EPSILON),
            other => panic!("expected Double, got {other:?}"),
        }
    }

    #[test]
    fn test_json() {
        assert_eq!(f64::from_json(&json!(1.5)).unwrap(), 1.5);
        assert_eq!(f64::from_json(&json!("-2.25")).unwrap(), -2.25);
        assert_eq!(f32::from_json(&json!(3)).unwrap(), 3.0);
        assert!(f32::from_json(&json!(1e39)).unwrap_err().is_overflow());
        assert!(matches!(
            f64::from_json(&json!(true)),
            Err(DecodeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            f64::from_json(&json!("x")),
            Err(DecodeError::Parse { .. })
        ));
    }

    #[test]
    fn test_non_finite_json_fails() {
        let err = f64::NAN
            .serialize_json(serde_json::value::Serializer)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported value"));
        assert!(
            f32::INFINITY
                .serialize_json(serde_json::value::Serializer)
                .is_err()
        );
    }

    #[test]
    fn test_scan() {
        assert_eq!(f64::decode(&Value::Integer(2, None)).unwrap(), 2.0);
        assert_eq!(f32::decode(&Value::Text(b"0.5".to_vec(), None)).unwrap(), 0.5);
        assert!(
            f32::decode(&Value::Double(f64::MAX, None))
                .unwrap_err()
                .is_overflow()
        );
        assert!(matches!(
            f64::decode(&Value::Blob(vec![1], None)),
            Err(DecodeError::DataType(DataType::Blob))
        ));
    }
}
