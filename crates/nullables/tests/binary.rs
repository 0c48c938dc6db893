use nullables::{BinaryCodec, DecodeError, Interval, Json, null, zero};
use time::macros::datetime;

fn round_trip<T: BinaryCodec + PartialEq + std::fmt::Debug>(value: &T) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    value.encode_binary(&mut buf)?;
    assert_eq!(buf.len(), value.encoded_len(), "{value:?}");
    let (decoded, used) = T::decode_binary(&buf)?;
    assert_eq!(used, buf.len());
    assert_eq!(&decoded, value);
    Ok(())
}

#[test]
fn test_round_trips() -> anyhow::Result<()> {
    round_trip(&null::Int16::from_value(-2))?;
    round_trip(&null::Uint64::from_value(u64::MAX))?;
    round_trip(&null::Float32::from_value(0.5))?;
    round_trip(&null::Bool::from_value(false))?;
    round_trip(&null::String::from_value("héllo".to_owned()))?;
    round_trip(&zero::Bytes::from_value(vec![1, 2, 3]))?;
    round_trip(&null::Time::from_value(datetime!(2012-12-21 21:21:21.5 +02:00)))?;
    round_trip(&null::Duration::from_value(time::Duration::new(-3, -500)))?;
    round_trip(&Json::from_bytes(r#"{"a": 1}"#))?;
    round_trip(&Json::null())?;
    round_trip(&Interval::new(1, -2, 3_000_000))?;
    round_trip(&Interval::null())?;
    Ok(())
}

#[test]
fn test_stream_of_values() -> anyhow::Result<()> {
    let mut buf = Vec::new();
    null::Int32::from_value(7).encode_binary(&mut buf)?;
    null::String::null().encode_binary(&mut buf)?;
    zero::Int64::from_value(0).encode_binary(&mut buf)?;
    assert_eq!(buf, [1, 7, 0, 0, 0, 0, 0]);

    let mut rest = &buf[..];
    let (a, n) = null::Int32::decode_binary(rest)?;
    rest = &rest[n..];
    let (b, n) = null::String::decode_binary(rest)?;
    rest = &rest[n..];
    let (c, n) = zero::Int64::decode_binary(rest)?;
    rest = &rest[n..];

    assert_eq!(a, null::Int32::from_value(7));
    assert!(!b.is_valid());
    assert!(!c.is_valid());
    assert!(rest.is_empty());
    Ok(())
}

#[test]
fn test_truncated_input() {
    let mut buf = Vec::new();
    null::String::from_value("abcdef".to_owned())
        .encode_binary(&mut buf)
        .unwrap();
    buf.truncate(buf.len() - 1);
    assert!(matches!(
        null::String::decode_binary(&buf),
        Err(DecodeError::ShortBuffer { needed: 6, remaining: 5 })
    ));
    assert!(matches!(
        null::Int::decode_binary(&[]),
        Err(DecodeError::ShortBuffer { .. })
    ));
    assert!(null::Int::decode_binary(&[9]).is_err());
}
