//! Wrappers where a zero value is the same as null.
//!
//! Decoding `0`, `""`, `false` or the Unix epoch yields an invalid wrapper, and an invalid
//! wrapper encodes as the zero literal instead of `null`.
//!
//! ```
//! use nullables::zero;
//!
//! let a: zero::Int = serde_json::from_str("0").unwrap();
//! let b: zero::Int = serde_json::from_str("null").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(serde_json::to_string(&b).unwrap(), "0");
//! ```

use time::OffsetDateTime;

use crate::nullable::{Nullable, ZeroFamily};

/// A zero-collapsing value of any [`Scalar`](crate::Scalar) payload.
pub type Value<T> = Nullable<T, ZeroFamily>;

pub type Bool = Value<bool>;
pub type Int = Value<i64>;
pub type Int8 = Value<i8>;
pub type Int16 = Value<i16>;
pub type Int32 = Value<i32>;
pub type Int64 = Value<i64>;
pub type Byte = Value<u8>;
pub type Uint = Value<u64>;
pub type Uint8 = Value<u8>;
pub type Uint16 = Value<u16>;
pub type Uint32 = Value<u32>;
pub type Uint64 = Value<u64>;
pub type Float32 = Value<f32>;
pub type Float64 = Value<f64>;
pub type String = Value<std::string::String>;
pub type Bytes = Value<Vec<u8>>;
pub type Time = Value<OffsetDateTime>;
