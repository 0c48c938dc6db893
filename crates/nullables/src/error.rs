//! Types for working with errors produced by nullables.

use std::num::TryFromIntError;

use serde_json::Value as JsonValue;

use crate::{driver::DataType, types::interval::Status};

/// A specialized `Result` type for nullables.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn external input into a value.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The input was empty.
    #[error("no data")]
    NoData,

    /// The input does not match the grammar of the target type.
    #[error("cannot parse {input:?} as {kind}: {reason}")]
    Parse {
        kind: &'static str,
        input: String,
        reason: String,
    },

    /// The input is a well-formed number that does not fit the target width.
    #[error("value {input} overflows {kind}")]
    Overflow { kind: &'static str, input: String },

    /// The JSON token has the wrong kind for the target type.
    #[error("cannot decode JSON {found} into {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A driver value of a kind that cannot be converted.
    #[error("incompatible source data type: {0}")]
    DataType(DataType),

    #[error("decoding conversion error: {0}")]
    Conversion(String),

    /// Binary input ended before the value did.
    #[error("buffer too short: needed {needed} bytes, {remaining} remaining")]
    ShortBuffer { needed: usize, remaining: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn parse(kind: &'static str, input: &str, reason: impl ToString) -> Self {
        DecodeError::Parse {
            kind,
            input: input.to_owned(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn overflow(kind: &'static str, input: impl ToString) -> Self {
        DecodeError::Overflow {
            kind,
            input: input.to_string(),
        }
    }

    pub(crate) fn mismatch(expected: &'static str, found: &JsonValue) -> Self {
        DecodeError::TypeMismatch {
            expected,
            found: json_kind(found),
        }
    }

    /// Returns `true` if the input parsed as a number but exceeded the declared width.
    pub fn is_overflow(&self) -> bool {
        matches!(self, DecodeError::Overflow { .. })
    }
}

impl From<TryFromIntError> for DecodeError {
    fn from(err: TryFromIntError) -> Self {
        DecodeError::Conversion(err.to_string())
    }
}

impl From<String> for DecodeError {
    fn from(err: String) -> Self {
        DecodeError::Conversion(err)
    }
}

/// Failure to produce an external representation of a value.
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    /// A composite value is in a state that has no encoding.
    #[error("cannot encode value with status {0:?}")]
    UnsupportedStatus(Status),

    /// The value has no representation in the target format, e.g. a NaN float in JSON.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    #[error("encoding conversion error: {0}")]
    Conversion(String),

    /// A record-level marshal was asked to encode something that is not a record.
    #[error("expected a record, found JSON {found}")]
    NotRecord { found: &'static str },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Represents all the ways a method can fail within nullables.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("error occurred while decoding: {0}")]
    Decode(#[from] DecodeError),

    #[error("error occurred while encoding: {0}")]
    Encode(#[from] EncodeError),
}

impl Error {
    pub fn into_decode_error(self) -> Option<DecodeError> {
        match self {
            Error::Decode(err) => Some(err),
            _ => None,
        }
    }
}

/// Name of a JSON token kind, for error messages.
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
