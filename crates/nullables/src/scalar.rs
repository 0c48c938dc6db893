//! The payload side of a nullable wrapper.
//!
//! [`Scalar`] captures everything that differs between payload kinds: the zero value, the
//! JSON and text grammars, and the key naming the payload in the object form
//! `{"Int64": 5, "Valid": true}`. The wrapper in [`crate::nullable`] supplies the null
//! handling and family policy on top.

use std::fmt::Debug;

use serde::Serializer;
use serde_json::{Map, Value as JsonValue};

use crate::error::{DecodeError, EncodeError};

/// A JSON object as produced by `serde_json`.
pub type JsonObject = Map<String, JsonValue>;

/// A value that can be carried by a [`Nullable`](crate::Nullable).
pub trait Scalar: Clone + PartialEq + Debug + Sized {
    /// Key naming the payload in the `{"<FIELD>": .., "Valid": ..}` object form.
    const FIELD: &'static str;

    /// Other keys accepted for the payload, tried after [`Scalar::FIELD`].
    const FIELD_ALIASES: &'static [&'static str] = &[];

    /// The type's zero value.
    fn zero() -> Self;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Decode a bare, non-null, non-object JSON token.
    fn from_json(value: &JsonValue) -> Result<Self, DecodeError>;

    /// Decode the object form, returning the payload and the validity it carries.
    ///
    /// Keys are matched case-insensitively, an exact match winning. A `null` payload decodes as
    /// zero and a missing `Valid` as `false`. The payload key may only be left out when `Valid`
    /// is present and not `true`; any other object is a type mismatch.
    fn from_json_object(object: &JsonObject) -> Result<(Self, bool), DecodeError> {
        let valid_key = field(object, "Valid");
        let valid = match valid_key {
            None | Some(JsonValue::Null) => false,
            Some(JsonValue::Bool(b)) => *b,
            Some(other) => return Err(DecodeError::mismatch("bool", other)),
        };
        let payload = std::iter::once(Self::FIELD)
            .chain(Self::FIELD_ALIASES.iter().copied())
            .find_map(|key| field(object, key));
        let value = match payload {
            Some(JsonValue::Null) => Self::zero(),
            Some(v) => Self::from_json(v)?,
            None if valid_key.is_some() && !valid => Self::zero(),
            None => {
                return Err(DecodeError::TypeMismatch {
                    expected: Self::FIELD,
                    found: "object without a payload key",
                });
            }
        };
        Ok((value, valid))
    }

    /// Serialize the payload as its canonical JSON scalar.
    fn serialize_json<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;

    /// Parse non-blank text.
    fn parse_text(text: &str) -> Result<Self, DecodeError>;

    /// Render the canonical text form.
    fn format_text(&self) -> Result<String, EncodeError>;
}

/// Look up `key`, preferring an exact match over a case-insensitive one.
pub(crate) fn field<'a>(object: &'a JsonObject, key: &str) -> Option<&'a JsonValue> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Decode the strict `{"Time": .., "Valid": bool}` shape used by timestamp payloads.
///
/// Both keys must be present under exactly these names; `decode` receives the `Time` member.
pub(crate) fn strict_time_object<T>(
    object: &JsonObject,
    kind: &'static str,
    decode: impl FnOnce(&JsonValue) -> Result<T, DecodeError>,
) -> Result<(T, bool), DecodeError> {
    match (object.get("Time"), object.get("Valid")) {
        (Some(time), Some(JsonValue::Bool(valid))) if !time.is_null() => {
            Ok((decode(time)?, *valid))
        }
        _ => Err(DecodeError::TypeMismatch {
            expected: kind,
            found: "object without \"Time\" and boolean \"Valid\" keys",
        }),
    }
}
