#![cfg(feature = "serde")]

mod helpers;

use std::collections::BTreeMap;

use serde::Serialize;
use tessera::value::{Map, Value};
use tessera::{read, to_value, ErrorKind, Output};

use crate::helpers::session;

#[test]
fn to_value_scalars() {
    assert_eq!(to_value('a').unwrap(), Value::from("a"));
    assert_eq!(to_value(Some(7_u8)).unwrap(), Value::Integer(7));
    assert_eq!(to_value(None::<i32>).unwrap(), Value::None);
    assert_eq!(to_value(()).unwrap(), Value::None);
    assert_eq!(to_value(1.5_f32).unwrap(), Value::Float(1.5));
}

#[test]
fn to_value_err_u64_out_of_range() {
    let err = to_value(u64::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialize);
    assert_eq!(
        err.to_string(),
        "out of range integral type conversion attempted"
    );
}

#[test]
fn to_value_struct() {
    #[derive(Serialize)]
    struct Test {
        a: &'static str,
        b: Vec<i32>,
    }
    let expected = Value::Map(Map::from([
        (String::from("a"), Value::from("lorem")),
        (String::from("b"), Value::from(vec![1, 2])),
    ]));
    let test = Test {
        a: "lorem",
        b: vec![1, 2],
    };
    assert_eq!(to_value(test).unwrap(), expected);
}

#[test]
fn to_value_enum_variants() {
    #[derive(Serialize)]
    enum Test {
        Unit,
        Newtype(&'static str),
        Tuple(i32, i32),
        Struct { a: bool },
    }

    let wrap = |name: &str, value: Value| Value::Map(Map::from([(String::from(name), value)]));

    assert_eq!(to_value(Test::Unit).unwrap(), Value::from("Unit"));
    assert_eq!(
        to_value(Test::Newtype("x")).unwrap(),
        wrap("Newtype", Value::from("x"))
    );
    assert_eq!(
        to_value(Test::Tuple(1, 2)).unwrap(),
        wrap("Tuple", Value::from(vec![1, 2]))
    );
    let fields = Value::Map(Map::from([(String::from("a"), Value::Bool(true))]));
    assert_eq!(
        to_value(Test::Struct { a: true }).unwrap(),
        wrap("Struct", fields)
    );
}

#[test]
fn to_value_map_integer_keys() {
    let map = BTreeMap::from([(1, "a"), (2, "b")]);
    let expected = Value::Map(Map::from([
        (String::from("1"), Value::from("a")),
        (String::from("2"), Value::from("b")),
    ]));
    assert_eq!(to_value(map).unwrap(), expected);
}

#[test]
fn to_value_err_map_key_not_string() {
    let map = BTreeMap::from([((1, 2), "a")]);
    let err = to_value(map).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialize);
    assert_eq!(err.to_string(), "map key must be a string, found list");
}

#[test]
fn to_value_list_renders_as_collection() {
    let names = to_value(["a", "b", "c"]).unwrap();
    let s = session(&["<", ">"], [names]);
    match read(s, false).unwrap() {
        Output::Text(s) => assert_eq!(s, "<abc>"),
        Output::Items(items) => panic!("expected text, got items {items:?}"),
    }
}
