use nullables::{null, zero};
use nullables_test::{assert_blank_is_null, assert_overflow, test_text};

test_text!(null_int16<null::Int16>(
    "32766" == null::Int16::from_value(32766),
    "32767" == null::Int16::from_value(32767),
    "-7" == null::Int16::from_value(-7),
    "" == null::Int16::null(),
    "null" == null::Int16::null(),
));

test_text!(zero_int64<zero::Int64>(
    "0" == zero::Int64::null(),
    "" == zero::Int64::null(),
    "42" == zero::Int64::from_value(42),
));

test_text!(null_bool<null::Bool>(
    "true" == null::Bool::from_value(true),
    "1" == null::Bool::from_value(true),
    "F" == null::Bool::from_value(false),
    "" == null::Bool::null(),
));

test_text!(null_float64<null::Float64>(
    "1.5" == null::Float64::from_value(1.5),
    "-0.25" == null::Float64::from_value(-0.25),
));

test_text!(null_duration<null::Duration>(
    "1h2m3s" == null::Duration::from_value(time::Duration::seconds(3723)),
    "1.5s" == null::Duration::from_value(time::Duration::milliseconds(1500)),
    "" == null::Duration::null(),
));

test_text!(null_unix<null::UnixTime>(
    "60" == null::UnixTime::from_value(nullables::EpochSeconds::from_unix(60)?),
    "1970-01-01T00:01:00Z" == null::UnixTime::from_value(nullables::EpochSeconds::from_unix(60)?),
));

#[test]
fn test_overflow() {
    assert_overflow::<null::Int16>("32768");
    assert_overflow::<null::Int16>("-32769");
    assert_overflow::<zero::Int8>("128");
    assert_overflow::<null::Uint8>("256");
    assert_overflow::<null::Uint64>("18446744073709551616");
    assert_overflow::<null::Int>("9223372036854775808");
}

#[test]
fn test_rejects_garbage() {
    assert!("1.5".parse::<null::Int16>().is_err());
    assert!("12abc".parse::<null::Int32>().is_err());
    assert!("-1".parse::<null::Uint32>().is_err());
    assert!("yes".parse::<null::Bool>().is_err());
    assert!("1.0e".parse::<null::Float64>().is_err());
}

#[test]
fn test_blank_is_null() {
    assert_blank_is_null::<i16>();
    assert_blank_is_null::<u64>();
    assert_blank_is_null::<bool>();
    assert_blank_is_null::<f64>();
    assert_blank_is_null::<time::Duration>();
}

#[test]
fn test_null_text_out() {
    assert_eq!(null::Int16::null().to_text().unwrap(), "");
    assert_eq!(zero::Int16::null().to_text().unwrap(), "0");
    assert_eq!(null::Bool::null().to_text().unwrap(), "");
    assert_eq!(zero::Bool::null().to_text().unwrap(), "false");
    assert_eq!(zero::Value::<time::Duration>::null().to_text().unwrap(), "0s");
}

#[test]
fn test_strings_are_verbatim() {
    let s: null::String = " padded ".parse().unwrap();
    assert_eq!(s.value(), " padded ");
    let s: zero::String = "".parse().unwrap();
    assert!(!s.is_valid());
    assert_eq!(s.to_text().unwrap(), "");
}
