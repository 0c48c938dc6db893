//! Payload types and their conversions at every boundary.
//!
//! # Types
//!
//! | Payload                  | Object key  | JSON                    | Driver value        |
//! |--------------------------|-------------|-------------------------|---------------------|
//! | `bool`                   | `Bool`      | boolean                 | INTEGER 0/1         |
//! | `i8`..`i64`              | `Int8`..    | number or numeric string| INTEGER             |
//! | `u8`..`u64`              | `Uint8`..   | number or numeric string| INTEGER             |
//! | `f32`, `f64`             | `Float32`.. | number or numeric string| REAL                |
//! | [`String`]               | `String`    | string                  | TEXT                |
//! | `Vec<u8>`                | `Bytes`     | string                  | BLOB                |
//! | `time::OffsetDateTime`   | `Time`      | string in the layout    | TEXT (RFC 3339)     |
//! | `time::Duration`         | `Duration`  | `1h2m3s` style string   | TEXT (`HH:MM:SS`)   |
//! | [`EpochSeconds`]         | `Time`      | integer seconds         | INTEGER             |
//!
//! [`Json`] and [`Interval`] carry their own validity and are not wrapped in a
//! [`Nullable`](crate::Nullable).
//!
//! #### Note: Unsigned 64-bit integers
//!
//! Drivers handle integers as 64-bit signed values. `u64` is bit-cast to `i64` on encode and
//! cast back on decode, so values above `i64::MAX` are stored as negative numbers and only
//! round-trip through this crate.
//!
//! # Nullable
//!
//! `Option<T>` and every `Nullable<T, F>` are supported where `T` implements `Encode` or
//! `Decode`. A driver `NULL` always decodes as an invalid wrapper.

macro_rules! compatible {
    ($x:expr, $($y:path)|+) => {
        let t = $x.type_info();
        if !t.is_null() && !matches!(t, $($y)|+) {
            tracing::trace!(data_type = %t, "rejecting incompatible driver value");
            return Err(DecodeError::DataType(t))
        }
    };
}

pub mod duration;
pub mod interval;
pub mod json;
pub mod time;
pub mod unix;

mod bool;
mod bytes;
mod float;
mod int;
mod str;
mod uint;

pub use self::{
    interval::{Interval, Status},
    json::Json,
    time::TimeFormat,
    unix::EpochSeconds,
};
