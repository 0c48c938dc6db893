//! Nullable value wrappers that keep "absent" apart from "present and zero" across JSON,
//! text, database-driver and binary boundaries.
//!
//! Two families share one generic [`Nullable`] implementation:
//!
//! * [`null`]: only an explicit null marker makes a value absent.
//! * [`zero`]: a zero value is treated the same as null.
//!
//! ```
//! use nullables::{null, zero};
//!
//! let a: null::Int = serde_json::from_str("0").unwrap();
//! let b: zero::Int = serde_json::from_str("0").unwrap();
//! assert!(a.is_valid());
//! assert!(!b.is_valid());
//! ```

pub use nullables_macros::*;

mod binary;
pub mod decode;
pub mod driver;
pub mod encode;
mod error;
mod marshal;
pub mod null;
mod nullable;
pub mod number;
mod scalar;
pub mod types;
pub mod zero;

pub use crate::{
    binary::{BinaryCodec, BinaryPayload},
    decode::Decode,
    driver::{DataType, Value},
    encode::Encode,
    error::{DecodeError, EncodeError, Error, Result},
    marshal::{IsZero, marshal_record},
    nullable::{Family, NullFamily, Nullable, ZeroFamily},
    scalar::{JsonObject, Scalar},
    types::{EpochSeconds, Interval, Json, Status, TimeFormat},
};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
