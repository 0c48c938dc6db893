use std::str::from_utf8;

use crate::{driver::DataType, error::DecodeError};

/// A database value plus optional type information.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null(Option<DataType>),
    Integer(i64, Option<DataType>),
    Double(f64, Option<DataType>),
    Text(Vec<u8>, Option<DataType>),
    Blob(Vec<u8>, Option<DataType>),
}

impl Value {
    /// An untyped `NULL`.
    pub const NULL: Value = Value::Null(None);

    pub fn int64(&self) -> std::result::Result<i64, DecodeError> {
        match self {
            Value::Integer(v, _) => Ok(*v),
            _ => Err(DecodeError::Conversion("not an integer".into())),
        }
    }

    pub fn double(&self) -> std::result::Result<f64, DecodeError> {
        match self {
            Value::Double(v, _) => Ok(*v),
            Value::Integer(v, _) => Ok(*v as f64),
            _ => Err(DecodeError::Conversion("not a float".into())),
        }
    }

    pub fn blob(&self) -> &[u8] {
        match self {
            Value::Blob(v, _) | Value::Text(v, _) => v.as_slice(),
            _ => &[],
        }
    }

    pub fn text(&self) -> std::result::Result<&str, DecodeError> {
        match self {
            Value::Text(v, _) => from_utf8(v).map_err(|e| DecodeError::Conversion(e.to_string())),
            _ => Err(DecodeError::Conversion("not text".into())),
        }
    }

    pub fn type_info(&self) -> DataType {
        match self {
            Value::Null(t) => t.unwrap_or(DataType::Null),
            Value::Integer(_, t) => t.unwrap_or(DataType::Int),
            Value::Double(_, t) => t.unwrap_or(DataType::Float),
            Value::Text(_, t) => t.unwrap_or(DataType::Text),
            Value::Blob(_, t) => t.unwrap_or(DataType::Blob),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let v = Value::Integer(7, None);
        assert_eq!(v.int64().unwrap(), 7);
        assert_eq!(v.double().unwrap(), 7.0);
        assert!(v.text().is_err());
        assert!(v.blob().is_empty());

        let v = Value::Double(1.5, None);
        assert!(matches!(v.int64(), Err(DecodeError::Conversion(_))));

        let v = Value::Text(b"abc".to_vec(), Some(DataType::Datetime));
        assert_eq!(v.text().unwrap(), "abc");
        assert_eq!(v.blob(), b"abc");
        assert_eq!(v.type_info(), DataType::Datetime);

        assert!(Value::NULL.is_null());
        assert_eq!(Value::NULL.type_info(), DataType::Null);
    }

    #[test]
    fn test_invalid_utf8_text() {
        let v = Value::Text(vec![0xff, 0xfe], None);
        assert!(matches!(v.text(), Err(DecodeError::Conversion(_))));
    }
}
