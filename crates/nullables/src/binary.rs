//! A compact length-prefixed binary encoding.
//!
//! Every value starts with one flag byte: `0` for invalid and `1` for valid (an
//! [`Interval`] writes its [`Status`] instead). A valid value is followed by its payload in
//! little-endian order:
//!
//! | Payload            | Layout                                      |
//! |--------------------|---------------------------------------------|
//! | `bool`             | 1 byte                                      |
//! | integers, floats   | fixed width                                 |
//! | `String`, `Vec<u8>`| `u32` length, then the bytes                |
//! | `OffsetDateTime`   | `i64` seconds, `u32` nanos, `i32` offset    |
//! | `time::Duration`   | `i64` seconds, `i32` nanos                  |
//! | [`EpochSeconds`]   | `i64` seconds                               |
//! | [`Interval`]       | `i32` months, `i32` days, `i64` micros      |
//! | [`Json`]           | `u32` length, then the bytes                |
//!
//! Encoding writes into any [`BufMut`]; a growable buffer such as `Vec<u8>` never runs out of
//! room, while a fixed slice panics if it is too small, as `BufMut` does.

use bytes::{Buf, BufMut};
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::{
    error::{DecodeError, EncodeError},
    nullable::{Family, Nullable},
    scalar::Scalar,
    types::{EpochSeconds, Interval, Json, Status},
};

/// A value with a self-delimiting binary form.
pub trait BinaryCodec: Sized {
    /// Number of bytes [`BinaryCodec::encode_binary`] writes.
    fn encoded_len(&self) -> usize;

    fn encode_binary<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError>;

    /// Decode one value from the front of `input`, returning it with the number of bytes read.
    fn decode_binary(input: &[u8]) -> Result<(Self, usize), DecodeError>;
}

/// The part of a [`BinaryCodec`] that follows the flag byte.
pub trait BinaryPayload: Sized {
    fn payload_len(&self) -> usize;

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError>;

    /// Read the payload, advancing `buf` past it.
    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError>;
}

fn need(buf: &[u8], needed: usize) -> Result<(), DecodeError> {
    if buf.remaining() < needed {
        return Err(DecodeError::ShortBuffer {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

fn put_prefixed<B: BufMut>(buf: &mut B, bytes: &[u8]) -> Result<(), EncodeError> {
    let len = u32::try_from(bytes.len()).map_err(|_| {
        EncodeError::Conversion(format!("{} bytes exceed the length prefix", bytes.len()))
    })?;
    buf.put_u32_le(len);
    buf.put_slice(bytes);
    Ok(())
}

fn get_prefixed(buf: &mut &[u8]) -> Result<Vec<u8>, DecodeError> {
    need(buf, 4)?;
    let len = buf.get_u32_le() as usize;
    need(buf, len)?;
    let bytes = buf[..len].to_vec();
    buf.advance(len);
    Ok(bytes)
}

macro_rules! fixed {
    ($($ty:ty => $put:ident, $get:ident);+ $(;)?) => {$(
        impl BinaryPayload for $ty {
            fn payload_len(&self) -> usize {
                size_of::<$ty>()
            }

            fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
                buf.$put(*self);
                Ok(())
            }

            fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
                need(buf, size_of::<$ty>())?;
                Ok(buf.$get())
            }
        }
    )+};
}

fixed! {
    i8 => put_i8, get_i8;
    i16 => put_i16_le, get_i16_le;
    i32 => put_i32_le, get_i32_le;
    i64 => put_i64_le, get_i64_le;
    u8 => put_u8, get_u8;
    u16 => put_u16_le, get_u16_le;
    u32 => put_u32_le, get_u32_le;
    u64 => put_u64_le, get_u64_le;
    f32 => put_f32_le, get_f32_le;
    f64 => put_f64_le, get_f64_le;
}

impl BinaryPayload for bool {
    fn payload_len(&self) -> usize {
        1
    }

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        buf.put_u8(u8::from(*self));
        Ok(())
    }

    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        need(buf, 1)?;
        Ok(buf.get_u8() != 0)
    }
}

impl BinaryPayload for Vec<u8> {
    fn payload_len(&self) -> usize {
        4 + self.len()
    }

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        put_prefixed(buf, self)
    }

    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        get_prefixed(buf)
    }
}

impl BinaryPayload for String {
    fn payload_len(&self) -> usize {
        4 + self.len()
    }

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        put_prefixed(buf, self.as_bytes())
    }

    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        String::from_utf8(get_prefixed(buf)?).map_err(|e| DecodeError::Conversion(e.to_string()))
    }
}

impl BinaryPayload for OffsetDateTime {
    fn payload_len(&self) -> usize {
        16
    }

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        buf.put_i64_le(self.unix_timestamp());
        buf.put_u32_le(self.nanosecond());
        buf.put_i32_le(self.offset().whole_seconds());
        Ok(())
    }

    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        need(buf, 16)?;
        let (secs, nanos, offset) = (buf.get_i64_le(), buf.get_u32_le(), buf.get_i32_le());
        let conversion = |e: time::error::ComponentRange| DecodeError::Conversion(e.to_string());
        let offset = UtcOffset::from_whole_seconds(offset).map_err(conversion)?;
        // shift to local wall time, then label it with the offset
        let local = secs
            .checked_add(i64::from(offset.whole_seconds()))
            .ok_or_else(|| DecodeError::overflow("time", secs))?;
        Ok(OffsetDateTime::from_unix_timestamp(local)
            .map_err(conversion)?
            .replace_nanosecond(nanos)
            .map_err(conversion)?
            .replace_offset(offset))
    }
}

impl BinaryPayload for Duration {
    fn payload_len(&self) -> usize {
        12
    }

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        buf.put_i64_le(self.whole_seconds());
        buf.put_i32_le(self.subsec_nanoseconds());
        Ok(())
    }

    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        need(buf, 12)?;
        let (secs, nanos) = (buf.get_i64_le(), buf.get_i32_le());
        if nanos.unsigned_abs() >= 1_000_000_000 {
            return Err(DecodeError::Conversion(format!(
                "duration nanoseconds out of range: {nanos}"
            )));
        }
        Ok(Duration::new(secs, nanos))
    }
}

impl BinaryPayload for EpochSeconds {
    fn payload_len(&self) -> usize {
        8
    }

    fn put_payload<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        buf.put_i64_le(self.unix_timestamp());
        Ok(())
    }

    fn get_payload(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        need(buf, 8)?;
        EpochSeconds::from_unix(buf.get_i64_le())
    }
}

fn get_flag(buf: &mut &[u8]) -> Result<bool, DecodeError> {
    need(buf, 1)?;
    match buf.get_u8() {
        0 => Ok(false),
        1 => Ok(true),
        flag => Err(DecodeError::Conversion(format!("invalid flag byte {flag}"))),
    }
}

impl<T, F> BinaryCodec for Nullable<T, F>
where
    T: Scalar + BinaryPayload,
    F: Family,
{
    fn encoded_len(&self) -> usize {
        1 + self.as_option().map_or(0, BinaryPayload::payload_len)
    }

    fn encode_binary<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        match self.as_option() {
            Some(v) => {
                buf.put_u8(1);
                v.put_payload(buf)
            }
            None => {
                buf.put_u8(0);
                Ok(())
            }
        }
    }

    fn decode_binary(input: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut buf = input;
        let v = if get_flag(&mut buf)? {
            Self::from_value(T::get_payload(&mut buf)?)
        } else {
            Self::null()
        };
        Ok((v, input.len() - buf.len()))
    }
}

impl BinaryCodec for Json {
    fn encoded_len(&self) -> usize {
        if self.is_valid() {
            5 + self.as_bytes().len()
        } else {
            1
        }
    }

    fn encode_binary<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        if !self.is_valid() {
            buf.put_u8(0);
            return Ok(());
        }
        buf.put_u8(1);
        put_prefixed(buf, self.as_bytes())
    }

    fn decode_binary(input: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut buf = input;
        let v = if get_flag(&mut buf)? {
            Json::from_bytes(get_prefixed(&mut buf)?)
        } else {
            Json::null()
        };
        Ok((v, input.len() - buf.len()))
    }
}

impl BinaryCodec for Interval {
    fn encoded_len(&self) -> usize {
        if self.is_present() { 17 } else { 1 }
    }

    fn encode_binary<B: BufMut>(&self, buf: &mut B) -> Result<(), EncodeError> {
        buf.put_u8(self.status as u8);
        if self.is_present() {
            buf.put_i32_le(self.months);
            buf.put_i32_le(self.days);
            buf.put_i64_le(self.microseconds);
        }
        Ok(())
    }

    fn decode_binary(input: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut buf = input;
        need(buf, 1)?;
        let v = match Status::try_from(buf.get_u8())? {
            Status::Present => {
                need(buf, 16)?;
                Interval::new(buf.get_i32_le(), buf.get_i32_le(), buf.get_i64_le())
            }
            Status::Null => Interval::null(),
            Status::Undefined => Interval::default(),
        };
        Ok((v, input.len() - buf.len()))
    }
}
