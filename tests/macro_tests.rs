use toon_codec::{toon, Map, Number, Value};

#[test]
fn test_macro_null() {
    assert_eq!(toon!(null), Value::Null);
}

#[test]
fn test_macro_booleans() {
    assert_eq!(toon!(true), Value::Bool(true));
    assert_eq!(toon!(false), Value::Bool(false));
}

#[test]
fn test_macro_numbers() {
    assert_eq!(toon!(0), Value::Number(Number::Integer(0)));
    assert_eq!(toon!(-17), Value::Number(Number::Integer(-17)));
    assert_eq!(toon!(2.5), Value::Number(Number::Float(2.5)));
}

#[test]
fn test_macro_strings() {
    assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    assert_eq!(toon!(""), Value::String(String::new()));
}

#[test]
fn test_macro_arrays() {
    assert_eq!(toon!([]), Value::Array(vec![]));

    let arr = toon!([1, "two", true, null]);
    assert_eq!(
        arr,
        Value::Array(vec![
            Value::Number(Number::Integer(1)),
            Value::String("two".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_macro_objects() {
    assert_eq!(toon!({}), Value::Object(Map::new()));

    let obj = toon!({
        "name": "Alice",
        "age": 30,
        "active": true
    });

    let map = obj.as_object().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(map.get("age").and_then(Value::as_i64), Some(30));
    assert_eq!(map.get("active").and_then(Value::as_bool), Some(true));
}

#[test]
fn test_macro_preserves_field_order() {
    let obj = toon!({"zebra": 1, "apple": 2, "mango": 3});
    let keys: Vec<_> = obj.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_macro_nesting() {
    let value = toon!({
        "user": {
            "name": "Alice",
            "roles": ["admin", "ops"]
        },
        "counts": [1, 2, 3]
    });

    let user = value.as_object().and_then(|m| m.get("user")).unwrap();
    let roles = user.as_object().and_then(|m| m.get("roles")).unwrap();
    assert_eq!(roles.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_macro_values_encode() {
    let value = toon!({
        "name": "Alice",
        "tags": ["a", "b"]
    });
    let text = toon_codec::encode(&value, toon_codec::ToonOptions::default()).unwrap();
    assert_eq!(text, "name: Alice\ntags[2]: a,b");
}

#[test]
fn test_macro_roundtrip() {
    let value = toon!({
        "id": 7,
        "nested": {"flag": false},
        "mixed": [1, {"k": "v"}, "s"]
    });
    let text = toon_codec::encode(&value, toon_codec::ToonOptions::default()).unwrap();
    let back = toon_codec::decode(&text, toon_codec::ToonOptions::default()).unwrap();
    assert_eq!(value, back);
}
