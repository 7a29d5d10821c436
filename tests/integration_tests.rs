use serde::{Deserialize, Serialize};
use toon_codec::{from_str, to_string, to_value, Delimiter, Number, ToonOptions, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

fn assert_roundtrip<T>(original: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let toon = to_string(original).unwrap();
    let deserialized: T = from_str(&toon).unwrap();
    assert_eq!(*original, deserialized, "serialized form was: {toon}");
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let toon = to_string(&user).unwrap();
    assert_eq!(
        toon,
        "id: 123\nname: Alice\nactive: true\ntags[2]: admin,developer"
    );

    let user_back: User = from_str(&toon).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    };

    let toon = to_string(&order).unwrap();
    let order_back: Order = from_str(&toon).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_array_of_objects_is_tabular() {
    let products = vec![
        Product {
            sku: "A001".to_string(),
            price: 10.99,
            quantity: 5,
        },
        Product {
            sku: "B002".to_string(),
            price: 15.99,
            quantity: 3,
        },
    ];

    let toon = to_string(&products).unwrap();
    assert_eq!(
        toon,
        "[2]{sku,price,quantity}:\n  A001,10.99,5\n  B002,15.99,3"
    );

    let products_back: Vec<Product> = from_str(&toon).unwrap();
    assert_eq!(products, products_back);
}

#[test]
fn test_primitives() {
    assert_roundtrip(&42i32);
    assert_roundtrip(&3.5f64);
    assert_roundtrip(&true);
    assert_roundtrip(&false);
    assert_roundtrip(&"hello world".to_string());
    assert_roundtrip(&vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_option() {
    assert_roundtrip(&Some(5i32));
    let none: Option<i32> = None;
    let toon = to_string(&none).unwrap();
    assert_eq!(toon, "null");
    let back: Option<i32> = from_str(&toon).unwrap();
    assert_eq!(back, None);
}

#[test]
fn test_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Suspended(String),
        Limits { daily: u32, burst: u32 },
    }

    assert_roundtrip(&Status::Active);
    assert_roundtrip(&Status::Suspended("abuse".to_string()));
    assert_roundtrip(&Status::Limits {
        daily: 100,
        burst: 10,
    });
}

#[test]
fn test_delimiter_options_roundtrip() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
        let options = ToonOptions::new().with_delimiter(delimiter);
        let toon = toon_codec::to_string_with_options(&user, options).unwrap();
        let user_back: User = from_str(&toon).unwrap();
        assert_eq!(user, user_back);
    }
}

#[test]
fn test_to_value() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string()],
    };

    let value = to_value(&user).unwrap();

    match value {
        Value::Object(obj) => {
            assert_eq!(obj.get("id"), Some(&Value::Number(Number::Integer(123))));
            assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
            assert_eq!(obj.get("active"), Some(&Value::Bool(true)));

            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 1);
                assert_eq!(tags[0], Value::String("admin".to_string()));
            } else {
                panic!("Expected tags to be an array");
            }
        }
        _ => panic!("Expected object"),
    }
}

#[test]
fn test_field_order_preserved() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Unordered {
        zebra: u32,
        apple: u32,
        mango: u32,
    }

    let toon = to_string(&Unordered {
        zebra: 1,
        apple: 2,
        mango: 3,
    })
    .unwrap();
    assert_eq!(toon, "zebra: 1\napple: 2\nmango: 3");
}

#[test]
fn test_empty_collections() {
    let empty_vec: Vec<i32> = vec![];
    assert_roundtrip(&empty_vec);

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Empty {}

    assert_roundtrip(&Empty {});

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        items: Vec<i32>,
        name: String,
    }

    assert_roundtrip(&Holder {
        items: vec![],
        name: "x".to_string(),
    });
}

#[test]
fn test_special_strings() {
    let special_strings = vec![
        "".to_string(),                // empty
        "hello, world".to_string(),    // comma
        "line1\nline2".to_string(),    // newline
        "tab\there".to_string(),       // tab
        "pipe|here".to_string(),       // pipe
        "colon: here".to_string(),     // colon
        " leading space".to_string(),  // leading space
        "trailing space ".to_string(), // trailing space
        "true".to_string(),            // boolean literal
        "false".to_string(),           // boolean literal
        "null".to_string(),            // null literal
        "123".to_string(),             // integer literal
        "3.5".to_string(),             // float literal
        "-1".to_string(),              // leading minus
        "1e-6".to_string(),            // exponent form
        "05".to_string(),              // leading zero
        "- item".to_string(),          // dash prefix
        "[3]: x,y".to_string(),        // array header lookalike
        "{key}".to_string(),           // brace lookalike
        "\"quoted\"".to_string(),      // embedded quotes
        "back\\slash".to_string(),     // backslash
        "emoji 😀 text".to_string(),   // non-ascii
    ];

    for s in special_strings {
        assert_roundtrip(&s);

        let mut map = std::collections::BTreeMap::new();
        map.insert("k".to_string(), s.clone());
        assert_roundtrip(&map);

        assert_roundtrip(&vec![s.clone(), "plain".to_string()]);
    }
}

#[test]
fn test_numbers() {
    assert_roundtrip(&0i8);
    assert_roundtrip(&127i8);
    assert_roundtrip(&-128i8);
    assert_roundtrip(&32767i16);
    assert_roundtrip(&-32768i16);
    assert_roundtrip(&2147483647i32);
    assert_roundtrip(&-2147483648i32);
    assert_roundtrip(&9223372036854775807i64);
    assert_roundtrip(&-9223372036854775808i64);

    assert_roundtrip(&255u8);
    assert_roundtrip(&65535u16);
    assert_roundtrip(&4294967295u32);

    assert_roundtrip(&0.0f32);
    assert_roundtrip(&3.5f32);
    assert_roundtrip(&-2.5f32);
    assert_roundtrip(&0.0f64);
    assert_roundtrip(&4.25f64);
    assert_roundtrip(&-5.75f64);
    assert_roundtrip(&0.1f64);
    assert_roundtrip(&1e300f64);
}

#[test]
fn test_maps_preserve_insertion_order() {
    use toon_codec::{decode, Map};

    let value = decode(
        "zebra: 1\napple: 2\nmango: 3",
        ToonOptions::default(),
    )
    .unwrap();
    let map: &Map = value.as_object().unwrap();
    let keys: Vec<_> = map.keys().cloned().collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_deeply_nested() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Node {
        name: String,
        child: Option<Box<Node>>,
    }

    let tree = Node {
        name: "root".to_string(),
        child: Some(Box::new(Node {
            name: "leaf".to_string(),
            child: None,
        })),
    };

    assert_roundtrip(&tree);
}

#[test]
fn test_mixed_array_roundtrip() {
    use toon_codec::{decode, encode, toon};

    let value = toon!({"items": [1, {"name": "Alice"}, [2, 3], "text"]});
    let text = encode(&value, ToonOptions::default()).unwrap();
    let back = decode(&text, ToonOptions::default()).unwrap();
    assert_eq!(value, back);
}
