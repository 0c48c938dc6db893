//! Provides [`Decode`] for decoding values handed over by a database driver.
use std::result::Result as StdResult;

use crate::{driver::Value, error::DecodeError};

/// A type that can be decoded from a driver value.
pub trait Decode<'r>: Sized {
    /// Decode a new value of this type using a raw value from the driver.
    fn decode(value: &'r Value) -> StdResult<Self, DecodeError>;
}

// implement `Decode` for Option<T> for all SQL types
impl<'r, T> Decode<'r> for Option<T>
where
    T: Decode<'r>,
{
    fn decode(value: &'r Value) -> StdResult<Self, DecodeError> {
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::decode(value)?))
        }
    }
}
