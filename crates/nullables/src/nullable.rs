//! The generic nullable wrapper and its two semantic families.
//!
//! A [`Nullable`] pairs a payload with a validity flag. What counts as "no value" depends on
//! the family tag:
//!
//! * [`NullFamily`]: only an explicit absence marker (JSON `null`, blank or `null` text, a
//!   driver `NULL`) makes a wrapper invalid. A present zero is a real value.
//! * [`ZeroFamily`]: a present zero value is folded into the invalid state on every
//!   constructor and decoder, and an invalid wrapper encodes as the zero literal rather than
//!   `null`.
//!
//! The family is part of the type, so the two policies cannot be mixed by accident. Most code
//! uses the aliases in [`crate::null`] and [`crate::zero`].

use std::{fmt, marker::PhantomData, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value as JsonValue;

use crate::{
    decode::Decode,
    driver::Value,
    encode::Encode,
    error::{DecodeError, EncodeError},
    scalar::Scalar,
};

mod private {
    pub trait Sealed {}
}

/// Semantic policy of a [`Nullable`]. Implemented by [`NullFamily`] and [`ZeroFamily`] only.
pub trait Family: private::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Whether a present zero payload is treated as absent.
    const COLLAPSES_ZERO: bool;
}

/// Only an explicit null marker means "no value".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NullFamily;

/// A zero payload means "no value", exactly like null.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ZeroFamily;

impl private::Sealed for NullFamily {}
impl private::Sealed for ZeroFamily {}

impl Family for NullFamily {
    const COLLAPSES_ZERO: bool = false;
}

impl Family for ZeroFamily {
    const COLLAPSES_ZERO: bool = true;
}

/// A payload of type `T` that may be absent.
///
/// The payload is always present in memory; when the wrapper is invalid it is not meaningful
/// and constructors leave it at `T::zero()`.
///
/// Struct fields of this type should carry `#[serde(default)]` so that a missing key decodes
/// as null instead of failing.
#[derive(Clone, Copy)]
pub struct Nullable<T, F = NullFamily> {
    value: T,
    valid: bool,
    family: PhantomData<F>,
}

impl<T: Scalar, F: Family> Nullable<T, F> {
    /// Create a wrapper with explicit validity. A zero-family wrapper still folds a zero payload
    /// into null.
    pub fn new(value: T, valid: bool) -> Self {
        let valid = valid && !(F::COLLAPSES_ZERO && value.is_zero());
        Self {
            value,
            valid,
            family: PhantomData,
        }
    }

    /// An invalid wrapper holding the zero payload.
    pub fn null() -> Self {
        Self::new(T::zero(), false)
    }

    /// Wrap a present value.
    pub fn from_value(value: T) -> Self {
        Self::new(value, true)
    }

    /// Wrap an optional value, `None` becoming null.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::from_value(v),
            None => Self::null(),
        }
    }

    /// Wrap a borrowed optional value, cloning it when present.
    pub fn from_ref(value: Option<&T>) -> Self {
        Self::from_option(value.cloned())
    }

    /// Overwrite the payload and mark the wrapper valid.
    ///
    /// This never folds zero into null, in either family: a zero-family wrapper set to zero
    /// reports `is_valid() == true` while `is_zero()` still returns `true`.
    pub fn set_valid(&mut self, value: T) {
        self.value = value;
        self.valid = true;
    }

    /// The raw payload, meaningful only when the wrapper is valid.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The payload if valid, otherwise the zero value.
    pub fn value_or_default(&self) -> T {
        if self.valid {
            self.value.clone()
        } else {
            T::zero()
        }
    }

    /// A reference to the payload if valid.
    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    /// The omitempty predicate.
    ///
    /// Null family: the wrapper is invalid. Zero family: the wrapper is invalid or holds zero.
    pub fn is_zero(&self) -> bool {
        !self.valid || (F::COLLAPSES_ZERO && self.value.is_zero())
    }

    /// Compare two wrappers.
    ///
    /// Null family: both invalid, or both valid with equal payloads. Zero family: null and zero
    /// are one state, so both empty or both valid with equal payloads.
    pub fn equal(&self, other: &Self) -> bool {
        if F::COLLAPSES_ZERO {
            (self.is_zero() && other.is_zero())
                || (self.valid && other.valid && self.value == other.value)
        } else {
            self.valid == other.valid && (!self.valid || self.value == other.value)
        }
    }

    /// Decode raw JSON bytes.
    ///
    /// Empty input is an error; `null` gives an invalid wrapper; a bare scalar or the
    /// `{"<Field>": .., "Valid": ..}` object form is decoded by the payload type.
    pub fn from_json(input: &[u8]) -> Result<Self, DecodeError> {
        if input.is_empty() {
            return Err(DecodeError::NoData);
        }
        let value: JsonValue = serde_json::from_slice(input)?;
        Self::from_json_value(&value)
    }

    /// Decode an already parsed JSON value, dispatching on its token kind.
    pub fn from_json_value(value: &JsonValue) -> Result<Self, DecodeError> {
        match value {
            JsonValue::Null => Ok(Self::null()),
            JsonValue::Object(object) => {
                let (value, valid) = T::from_json_object(object)?;
                Ok(Self::new(value, valid))
            }
            token => T::from_json(token).map(Self::from_value),
        }
    }

    /// Encode as JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encode as text: the canonical payload text when valid, otherwise the empty string
    /// (null family) or the zero literal (zero family).
    pub fn to_text(&self) -> Result<String, EncodeError> {
        if self.valid {
            self.value.format_text()
        } else if F::COLLAPSES_ZERO {
            T::zero().format_text()
        } else {
            Ok(String::new())
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Nullable<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nullable")
            .field("value", &self.value)
            .field("valid", &self.valid)
            .finish()
    }
}

impl<T: Scalar, F: Family> Default for Nullable<T, F> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Scalar, F: Family> PartialEq for Nullable<T, F> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Scalar + Eq, F: Family> Eq for Nullable<T, F> {}

impl<T: Scalar, F: Family> From<T> for Nullable<T, F> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T: Scalar, F: Family> From<Option<T>> for Nullable<T, F> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T: Scalar, F: Family> From<Nullable<T, F>> for Option<T> {
    fn from(value: Nullable<T, F>) -> Self {
        value.into_option()
    }
}

impl<T: Scalar, F: Family> FromStr for Nullable<T, F> {
    type Err = DecodeError;

    /// Decode text. Blank text and the literal `null` give an invalid wrapper.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() || text == "null" {
            return Ok(Self::null());
        }
        T::parse_text(text).map(Self::from_value)
    }
}

impl<T: Scalar, F: Family> Serialize for Nullable<T, F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.valid {
            self.value.serialize_json(serializer)
        } else if F::COLLAPSES_ZERO {
            T::zero().serialize_json(serializer)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de, T: Scalar, F: Family> Deserialize<'de> for Nullable<T, F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json_value(&value).map_err(de::Error::custom)
    }
}

impl<T, F> Encode for Nullable<T, F>
where
    T: Scalar + Encode,
    F: Family,
{
    /// Null (and, for the zero family, zero) becomes a driver `NULL`.
    fn encode(self) -> Result<Value, EncodeError> {
        if self.is_zero() {
            Ok(Value::NULL)
        } else {
            self.value.encode()
        }
    }
}

impl<T, F> Encode for &Nullable<T, F>
where
    T: Scalar + Encode,
    F: Family,
{
    fn encode(self) -> Result<Value, EncodeError> {
        self.clone().encode()
    }
}

impl<'r, T, F> Decode<'r> for Nullable<T, F>
where
    T: Scalar + Decode<'r>,
    F: Family,
{
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(Self::null());
        }
        T::decode(value).map(Self::from_value)
    }
}
