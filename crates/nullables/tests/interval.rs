use nullables::{Decode, Encode, EncodeError, Interval, Status, Value};
use nullables_test::test_type;

test_type!(literal<Interval>(
    "\"1 mon 2 day 00:00:03.000000\"" == Interval::new(1, 2, 3_000_000),
    "\"-01:30:00.250000\"" == Interval::new(0, 0, -5_400_250_000),
    "null" == Interval::null(),
));

#[test]
fn test_literal_forms() -> anyhow::Result<()> {
    assert_eq!(
        Interval::parse_literal("1 year 2 mons 3 days 04:05:06.5")?,
        Interval::new(14, 3, 14_706_500_000)
    );
    assert_eq!(Interval::parse_literal("00:00:00")?, Interval::new(0, 0, 0));
    assert!(Interval::parse_literal("00:00:00.1234567").is_err());
    assert!(Interval::parse_literal("3 days 1:2").is_err());
    assert!(
        Interval::parse_literal("2147483648 days")
            .unwrap_err()
            .is_overflow()
    );
    assert_eq!("".parse::<Interval>()?, Interval::null());
    Ok(())
}

#[test]
fn test_object_form() -> anyhow::Result<()> {
    let i: Interval = serde_json::from_str(
        r#"{"months": 1, "days": 2, "microseconds": 3, "status": 2}"#,
    )?;
    assert_eq!(i, Interval::new(1, 2, 3));
    let i: Interval = serde_json::from_str(r#"{"Status": 1}"#)?;
    assert_eq!(i.status, Status::Null);
    assert!(serde_json::from_str::<Interval>(r#"{"Status": 9}"#).is_err());
    assert!(serde_json::from_str::<Interval>("5").is_err());
    Ok(())
}

#[test]
fn test_undefined() -> anyhow::Result<()> {
    let i = Interval::default();
    assert_eq!(i.status, Status::Undefined);
    assert!(matches!(
        i.to_literal(),
        Err(EncodeError::UnsupportedStatus(Status::Undefined))
    ));
    assert!(i.encode().is_err());
    assert_eq!(serde_json::to_string(&i)?, "null");
    Ok(())
}

#[test]
fn test_driver() -> anyhow::Result<()> {
    assert_eq!(Interval::null().encode()?, Value::NULL);
    let v = Value::Text(b"1 day 12:00:00".to_vec(), None);
    assert_eq!(Interval::decode(&v)?, Interval::new(0, 1, 43_200_000_000));
    assert!(Interval::decode(&Value::Integer(1, None)).is_err());
    Ok(())
}
