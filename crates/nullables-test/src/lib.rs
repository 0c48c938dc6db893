use std::{fmt::Debug, str::FromStr};

use nullables::{Decode, DecodeError, Encode, Scalar};
use serde::{Serialize, de::DeserializeOwned};

#[doc(hidden)]
pub use {anyhow, paste, serde_json};

/// Encode to JSON text and decode it again.
pub fn json_round_trip<T: Serialize + DeserializeOwned>(value: &T) -> anyhow::Result<T> {
    let text = serde_json::to_string(value)?;
    Ok(serde_json::from_str(&text)?)
}

/// Hand a value to the driver layer and scan it back.
pub fn driver_round_trip<T>(value: T) -> nullables::Result<T>
where
    T: Encode + for<'r> Decode<'r>,
{
    let encoded = value.encode()?;
    Ok(T::decode(&encoded)?)
}

/// Parse text that must be rejected as an overflow of the declared width.
pub fn assert_overflow<T>(text: &str)
where
    T: FromStr<Err = DecodeError> + Debug,
{
    match text.parse::<T>() {
        Err(e) => assert!(e.is_overflow(), "{text:?}: expected overflow, got {e}"),
        Ok(v) => panic!("{text:?}: expected overflow, got {v:?}"),
    }
}

/// Blank text and `null` must both decode as the invalid wrapper.
pub fn assert_blank_is_null<T>()
where
    T: Scalar,
{
    for text in ["", "null"] {
        let v: nullables::null::Value<T> = text.parse().unwrap_or_else(|e| panic!("{e}"));
        assert!(!v.is_valid(), "{text:?} decoded as valid");
        let v: nullables::zero::Value<T> = text.parse().unwrap_or_else(|e| panic!("{e}"));
        assert!(!v.is_valid(), "{text:?} decoded as valid");
    }
}

// Test JSON decoding against expected values, then the encode/decode round trip
#[macro_export]
macro_rules! test_json {
    ($name:ident<$ty:ty>($($json:literal == $value:expr),+ $(,)?)) => {
        $crate::paste::item! {
            #[test]
            fn [< test_json_ $name >] () -> $crate::anyhow::Result<()> {
                $(
                    let decoded: $ty = $crate::serde_json::from_str($json)?;
                    let expected: $ty = $value;
                    assert_eq!(expected, decoded, "decoding {}", $json);

                    let encoded = $crate::serde_json::to_string(&expected)?;
                    let round_trip: $ty = $crate::json_round_trip(&expected)?;
                    assert_eq!(expected, round_trip, "round trip via {}", encoded);
                )+

                Ok(())
            }
        }
    };
}

// Test text decoding against expected values, then the to_text/parse round trip
#[macro_export]
macro_rules! test_text {
    ($name:ident<$ty:ty>($($text:literal == $value:expr),+ $(,)?)) => {
        $crate::paste::item! {
            #[test]
            fn [< test_text_ $name >] () -> $crate::anyhow::Result<()> {
                $(
                    let decoded: $ty = $text.parse()?;
                    let expected: $ty = $value;
                    assert_eq!(expected, decoded, "decoding {:?}", $text);

                    let text = expected.to_text()?;
                    let round_trip: $ty = text.parse()?;
                    assert_eq!(expected, round_trip, "round trip via {:?}", text);
                )+

                Ok(())
            }
        }
    };
}

// Test the driver encode/scan round trip
#[macro_export]
macro_rules! test_driver {
    ($name:ident<$ty:ty>($($value:expr),+ $(,)?)) => {
        $crate::paste::item! {
            #[test]
            fn [< test_driver_ $name >] () -> $crate::anyhow::Result<()> {
                $(
                    let expected: $ty = $value;
                    let round_trip: $ty = $crate::driver_round_trip(expected.clone())?;
                    assert_eq!(expected, round_trip, "driver round trip of {:?}", expected);
                )+

                Ok(())
            }
        }
    };
}

// Test JSON, text and driver boundaries for one wrapper type
#[macro_export]
macro_rules! test_type {
    ($name:ident<$ty:ty>($($text:literal == $value:expr),+ $(,)?)) => {
        $crate::test_json!($name<$ty>($($text == $value),+));
        $crate::test_driver!($name<$ty>($($value),+));
    };
}
