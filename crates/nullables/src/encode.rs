//! Provides [`Encode`] for producing driver parameter values.
use crate::{driver::Value, error::EncodeError};

/// Encode a single value to be handed to a database driver.
pub trait Encode {
    /// Produce the driver representation of `self`, consuming the value. Encoders are
    /// implemented for references where a shift in ownership is not wanted.
    fn encode(self) -> Result<Value, EncodeError>
    where
        Self: Sized;
}

/// Marker trait for primitive types that can be encoded by reference
pub trait PrimitiveEncode: Encode + Copy + 'static {}

impl PrimitiveEncode for bool {}
impl PrimitiveEncode for i8 {}
impl PrimitiveEncode for i16 {}
impl PrimitiveEncode for i32 {}
impl PrimitiveEncode for i64 {}
impl PrimitiveEncode for u8 {}
impl PrimitiveEncode for u16 {}
impl PrimitiveEncode for u32 {}
impl PrimitiveEncode for u64 {}
impl PrimitiveEncode for f32 {}
impl PrimitiveEncode for f64 {}

// Blanket implementation for primitive types
impl<T> Encode for &T
where
    T: PrimitiveEncode,
{
    fn encode(self) -> Result<Value, EncodeError> {
        (*self).encode()
    }
}

impl<T> Encode for Option<T>
where
    T: Encode,
{
    fn encode(self) -> Result<Value, EncodeError> {
        if let Some(v) = self {
            v.encode()
        } else {
            Ok(Value::NULL)
        }
    }
}
