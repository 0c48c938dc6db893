//! End-to-end coverage for `#[derive(Marshal)]`.

use std::collections::BTreeMap;

use nullables::{Json, Marshal, is_zero_by_default, marshal_record, null, zero};

#[derive(Marshal)]
struct Record {
    #[nullables(omitempty)]
    id: null::Int,
    #[nullables(omitempty)]
    score: zero::Float64,
    name: null::String,
    #[nullables(rename = "Tags", omitempty)]
    tags: Vec<String>,
    #[nullables(skip)]
    #[allow(dead_code)]
    cache: u8,
}

#[derive(Marshal)]
#[nullables(rename_all = "camelCase")]
struct Nested<T> {
    user_id: i64,
    #[nullables(omitempty)]
    extra: Json,
    #[nullables(omitempty)]
    meta: BTreeMap<String, T>,
}

#[test]
fn omitempty_follows_family() {
    let r = Record {
        id: null::Int::new(0, false),
        score: zero::Float64::from_value(0.0),
        name: null::String::null(),
        tags: vec![],
        cache: 9,
    };
    assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"name":null}"#);

    let r = Record {
        id: null::Int::from_value(0),
        score: zero::Float64::from_value(1.5),
        name: null::String::from_value("x".into()),
        tags: vec!["a".into()],
        cache: 9,
    };
    assert_eq!(
        serde_json::to_string(&r).unwrap(),
        r#"{"id":0,"score":1.5,"name":"x","Tags":["a"]}"#
    );
}

#[test]
fn renames_and_generics() {
    let mut meta = BTreeMap::new();
    meta.insert("k".to_string(), 1u8);
    let n = Nested {
        user_id: 7,
        extra: Json::from_bytes(r#"{"z":true}"#),
        meta,
    };
    assert_eq!(
        serde_json::to_string(&n).unwrap(),
        r#"{"userId":7,"extra":{"z":true},"meta":{"k":1}}"#
    );

    let n = Nested::<u8> {
        user_id: 0,
        extra: Json::null(),
        meta: BTreeMap::new(),
    };
    assert_eq!(marshal_record(&n).unwrap(), br#"{"userId":0}"#);
}

#[derive(Default, PartialEq, serde::Serialize)]
struct Point {
    x: i32,
    y: i32,
}

is_zero_by_default!(Point);

#[derive(Marshal)]
struct Shape {
    #[nullables(omitempty)]
    origin: Point,
    sides: u8,
}

#[test]
fn default_comparison_for_custom_types() {
    let s = Shape {
        origin: Point::default(),
        sides: 3,
    };
    assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"sides":3}"#);

    let s = Shape {
        origin: Point { x: 1, y: 0 },
        sides: 3,
    };
    assert_eq!(
        serde_json::to_string(&s).unwrap(),
        r#"{"origin":{"x":1,"y":0},"sides":3}"#
    );
}
