//! The dynamic value exchanged with a database driver.
//!
//! Drivers hand rows over as [`Value`]s and accept parameters in the same shape. The
//! [`Encode`](crate::encode::Encode) and [`Decode`](crate::decode::Decode) traits convert
//! between these and the wrapper types.

pub use type_info::DataType;
pub use value::Value;

/// Data type tags attached to driver values.
mod type_info;
/// Driver value container and accessors.
mod value;
