//! A nullable raw JSON document.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned, ser};
use serde_json::value::RawValue;

use crate::{
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError},
};

/// Raw JSON bytes plus a validity flag.
///
/// The bytes are kept verbatim; they are only interpreted by [`Json::unmarshal_into`] and
/// when the value is serialized into a larger document.
#[derive(Clone, Default)]
pub struct Json {
    bytes: Vec<u8>,
    valid: bool,
}

impl Json {
    pub fn new(bytes: impl Into<Vec<u8>>, valid: bool) -> Self {
        Json {
            bytes: bytes.into(),
            valid,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Json::new(bytes, true)
    }

    pub fn null() -> Self {
        Json::default()
    }

    /// Keep any non-empty input verbatim. The literal `null` produces an invalid value.
    pub fn from_json(input: &[u8]) -> Result<Self, DecodeError> {
        match input {
            [] => Err(DecodeError::NoData),
            b"null" => Ok(Json::null()),
            _ => Ok(Json::from_bytes(input)),
        }
    }

    /// The stored bytes, or `null` when invalid or empty.
    pub fn to_json(&self) -> Vec<u8> {
        if self.is_zero() {
            b"null".to_vec()
        } else {
            self.bytes.clone()
        }
    }

    /// Serialize `value` into a new blob. A value that serializes to `null` gives an invalid
    /// blob.
    pub fn marshal_from<T: Serialize + ?Sized>(value: &T) -> Result<Self, EncodeError> {
        let bytes = serde_json::to_vec(value)?;
        Json::from_json(&bytes).map_err(|e| EncodeError::Conversion(e.to_string()))
    }

    /// Deserialize the blob into `T`. An invalid blob is presented to `T` as `null`.
    pub fn unmarshal_into<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(&self.to_json())?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_zero(&self) -> bool {
        !self.valid || self.bytes.is_empty()
    }

    /// The stored text, or the empty string when invalid.
    pub fn to_text(&self) -> Result<String, EncodeError> {
        if !self.valid {
            return Ok(String::new());
        }
        String::from_utf8(self.bytes.clone())
            .map_err(|e| EncodeError::Unsupported(format!("JSON is not UTF-8: {e}")))
    }
}

impl fmt::Debug for Json {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Json")
            .field("bytes", &bstr::BStr::new(&self.bytes))
            .field("valid", &self.valid)
            .finish()
    }
}

impl PartialEq for Json {
    fn eq(&self, other: &Self) -> bool {
        self.valid == other.valid && (!self.valid || self.bytes == other.bytes)
    }
}

impl Eq for Json {}

impl FromStr for Json {
    type Err = DecodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "" | "null" => Ok(Json::null()),
            _ => Ok(Json::from_bytes(text)),
        }
    }
}

impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            return serializer.serialize_none();
        }
        let raw: &RawValue = serde_json::from_slice(&self.bytes).map_err(ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(match raw.get() {
            "null" => Json::null(),
            text => Json::from_bytes(text),
        })
    }
}

impl Encode for Json {
    fn encode(self) -> Result<Value, EncodeError> {
        if !self.valid {
            return Ok(Value::NULL);
        }
        Ok(Value::Text(self.bytes, None))
    }
}

impl Encode for &Json {
    fn encode(self) -> Result<Value, EncodeError> {
        self.clone().encode()
    }
}

impl<'r> Decode<'r> for Json {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(Json::null());
        }
        compatible!(value, DataType::Text | DataType::Blob);
        Ok(Json::from_bytes(value.blob()))
    }
}
