//! Record-level JSON marshalling with `omitempty` support.
//!
//! `#[derive(Marshal)]` writes a `serde::Serialize` impl that emits a struct as a JSON object
//! and drops `#[nullables(omitempty)]` fields whose [`IsZero::is_zero`] holds:
//!
//! ```
//! use nullables::{Marshal, null};
//!
//! #[derive(Marshal)]
//! #[nullables(rename_all = "camelCase")]
//! struct Row {
//!     #[nullables(omitempty)]
//!     user_id: null::Int,
//!     #[nullables(rename = "n", omitempty)]
//!     count: null::Int,
//! }
//!
//! let row = Row { user_id: null::Int::null(), count: null::Int::from_value(0) };
//! assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"n":0}"#);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    error::{EncodeError, json_kind},
    nullable::{Family, Nullable},
    scalar::Scalar,
    types::{Interval, Json},
};

/// The omitempty predicate.
pub trait IsZero {
    fn is_zero(&self) -> bool;
}

/// Implement [`IsZero`] as "equal to `Default::default()`" for the listed types.
///
/// ```
/// #[derive(Default, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// nullables::is_zero_by_default!(Point);
///
/// use nullables::IsZero;
/// assert!(Point::default().is_zero());
/// ```
#[macro_export]
macro_rules! is_zero_by_default {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::IsZero for $ty {
            fn is_zero(&self) -> bool {
                *self == <$ty as ::core::default::Default>::default()
            }
        }
    )+};
}

is_zero_by_default!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    time::Duration
);

impl<T: Scalar, F: Family> IsZero for Nullable<T, F> {
    fn is_zero(&self) -> bool {
        Nullable::is_zero(self)
    }
}

impl IsZero for Json {
    fn is_zero(&self) -> bool {
        Json::is_zero(self)
    }
}

impl IsZero for Interval {
    fn is_zero(&self) -> bool {
        Interval::is_zero(self)
    }
}

impl IsZero for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<K, V, S> IsZero for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsZero for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for JsonValue {
    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl<T: IsZero + ?Sized> IsZero for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: IsZero + ?Sized> IsZero for Box<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

/// Serialize a record to JSON bytes, failing unless it encodes as a JSON object.
pub fn marshal_record<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let bytes = serde_json::to_vec(value)?;
    if bytes.first() == Some(&b'{') {
        return Ok(bytes);
    }
    let found = serde_json::from_slice::<JsonValue>(&bytes)
        .map(|v| json_kind(&v))
        .unwrap_or("invalid JSON");
    Err(EncodeError::NotRecord { found })
}
