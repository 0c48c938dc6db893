//! Wrappers where only an explicit null marker means "no value".
//!
//! ```
//! use nullables::null;
//!
//! let n: null::Int16 = serde_json::from_str("0").unwrap();
//! assert!(n.is_valid());
//! assert_eq!(serde_json::to_string(&null::Int16::null()).unwrap(), "null");
//! ```

use time::OffsetDateTime;

use crate::{
    nullable::{NullFamily, Nullable},
    types::unix::EpochSeconds,
};

/// A nullable value of any [`Scalar`](crate::Scalar) payload.
pub type Value<T> = Nullable<T, NullFamily>;

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
pub type Duration = Value<time::Duration>;

/// A timestamp carried as whole Unix seconds on every boundary.
pub type UnixTime = Value<EpochSeconds>;
