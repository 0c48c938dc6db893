use nullables::{IsZero, null, zero};

#[test]
fn test_zero_collapses_to_null() {
    let z = zero::Int::from_value(0);
    assert!(!z.is_valid());
    assert_eq!(z, zero::Int::null());
    assert_eq!(z.into_option(), None);

    let n = null::Int::from_value(0);
    assert!(n.is_valid());
    assert_ne!(n, null::Int::null());
    assert_eq!(n.into_option(), Some(0));
}

#[test]
fn test_options() {
    assert_eq!(null::Int32::from_option(None), null::Int32::null());
    assert_eq!(null::Int32::from(Some(5)), null::Int32::from_value(5));
    assert_eq!(zero::Int32::from(Some(0)), zero::Int32::null());
    let s = "x".to_owned();
    assert_eq!(
        null::String::from_ref(Some(&s)).as_option(),
        Some(&"x".to_owned())
    );
    assert_eq!(Option::<i32>::from(null::Int32::from_value(3)), Some(3));
}

#[test]
fn test_set_valid_never_collapses() {
    let mut z = zero::Int16::null();
    z.set_valid(0);
    assert!(z.is_valid());
    assert!(z.is_zero());
    assert_eq!(z, zero::Int16::null());
    assert_eq!(serde_json::to_string(&z).unwrap(), "0");

    let mut n = null::Int16::null();
    n.set_valid(0);
    assert!(n.is_valid());
    assert!(!n.is_zero());
}

#[test]
fn test_equality() {
    assert_eq!(null::Float64::null(), null::Float64::null());
    assert_eq!(null::Float64::from_value(1.5), null::Float64::from_value(1.5));
    assert_ne!(null::Float64::from_value(1.5), null::Float64::from_value(2.5));
    assert_ne!(null::Float64::from_value(0.0), null::Float64::null());
    assert_eq!(zero::Float64::from_value(0.0), zero::Float64::null());
    assert!(null::String::null().equal(&null::String::null()));
    assert!(zero::String::from_value(String::new()).equal(&zero::String::null()));
    // the payload of an invalid wrapper is ignored
    assert_eq!(null::Int::new(7, false), null::Int::null());
}

#[test]
fn test_value_or_default() {
    assert_eq!(null::Int8::null().value_or_default(), 0);
    assert_eq!(null::Int8::from_value(-3).value_or_default(), -3);
    assert_eq!(zero::String::null().value_or_default(), "");
    assert!(!null::Bool::default().is_valid());
}

#[test]
fn test_is_zero_predicate() {
    assert!(IsZero::is_zero(&null::Int::null()));
    assert!(!IsZero::is_zero(&null::Int::from_value(0)));
    assert!(IsZero::is_zero(&zero::Int::from_value(0)));
    assert!(!IsZero::is_zero(&zero::Int::from_value(1)));
    assert!(IsZero::is_zero(&zero::Bytes::from_value(Vec::new())));
}
