use serde::{Deserialize, Serialize};
use serde_dyaml::{
    dyaml, from_str, from_value, parse, serialize, to_string, to_value, Error, Mapping, Value,
};
use std::collections::BTreeMap;

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
    price_cents: u64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "active: true\nid: 123\nname: Alice\ntags:\n  - admin\n  - developer\n"
    );

    let user_back: User = from_str(&text).unwrap();
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
                price_cents: 2999,
                quantity: 2,
            },
            Product {
                sku: "GADGET_7".to_string(),
                price_cents: 1499,
                quantity: 1,
            },
        ],
        note: None,
    };

    let text = to_string(&order).unwrap();
    let expected = "\
customer:
  active: true
  id: 123
  name: Alice
  tags:
    - vip
items:
  -
    price_cents: 2999
    quantity: 2
    sku: \"WIDGET-001\"
  -
    price_cents: 1499
    quantity: 1
    sku: GADGET_7
note: null
order_id: 12345
";
    assert_eq!(text, expected);

    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_primitives() {
    assert_eq!(to_string(&42).unwrap(), "42\n");
    assert_eq!(to_string(&-7i8).unwrap(), "-7\n");
    assert_eq!(to_string(&true).unwrap(), "true\n");
    assert_eq!(to_string(&"hello").unwrap(), "hello\n");
    assert_eq!(to_string(&"hello world").unwrap(), "\"hello world\"\n");
    assert_eq!(to_string(&()).unwrap(), "null\n");
    assert_eq!(to_string(&'x').unwrap(), "x\n");

    assert_eq!(from_str::<i32>("42\n").unwrap(), 42);
    assert!(!from_str::<bool>("false\n").unwrap());
    assert_eq!(from_str::<String>("\"30\"\n").unwrap(), "30");
    assert_eq!(from_str::<Option<u8>>("null\n").unwrap(), None);
}

#[test]
fn test_floats_are_unsupported() {
    #[derive(Serialize)]
    struct Price {
        amount: f64,
    }

    let err = to_string(&Price { amount: 9.99 }).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));

    assert!(from_str::<f64>("1.5\n").is_err());
}

#[test]
fn test_to_value() {
    let user = User {
        id: 1,
        name: "Bob".to_string(),
        active: false,
        tags: vec![],
    };
    let value = to_value(&user).unwrap();
    assert_eq!(
        value,
        dyaml!({"id": 1, "name": "Bob", "active": false, "tags": []})
    );

    let user_back: User = from_value(value).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_empty_collections() {
    let empty_vec: Vec<i32> = vec![];
    assert_eq!(to_string(&empty_vec).unwrap(), "[]\n");
    assert_eq!(from_str::<Vec<i32>>("[]\n").unwrap(), empty_vec);

    let empty_map: BTreeMap<String, i32> = BTreeMap::new();
    assert_eq!(to_string(&empty_map).unwrap(), "{}\n");
    assert_eq!(from_str::<BTreeMap<String, i32>>("{}\n").unwrap(), empty_map);

    let value = dyaml!({"a": {}, "b": []});
    assert_eq!(parse(&serialize(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_special_strings() {
    let cases = vec![
        "",
        "true",
        "false",
        "null",
        "42",
        "-0",
        "with space",
        "with:colon",
        "with\"quote",
        "back\\slash",
        "line\nbreak",
        "tab\tand\rreturn",
        "# not a comment",
        "{flow}",
        "- dash",
        "café",
    ];

    for case in cases {
        let text = to_string(&case).unwrap();
        assert!(text.starts_with('"'), "{:?} should be quoted: {}", case, text);
        let back: String = from_str(&text).unwrap();
        assert_eq!(back, case, "round trip of {:?}", case);
    }
}

#[test]
fn test_integer_bounds() {
    assert_eq!(to_string(&i64::MIN).unwrap(), "-9223372036854775808\n");
    assert_eq!(from_str::<i64>("-9223372036854775808\n").unwrap(), i64::MIN);
    assert!(parse("9223372036854775808\n").is_err());
    assert!(to_value(&(i64::MAX as u64 + 1)).is_err());
}

#[test]
fn test_map_with_invalid_key() {
    let mut map = BTreeMap::new();
    map.insert("user-id".to_string(), 1);
    let err = to_string(&map).unwrap_err();
    assert!(matches!(err, Error::InvalidKey { .. }));
}

#[test]
fn test_value_mapping_api() {
    let mut map = Mapping::new();
    map.insert("b".to_string(), Value::from(2));
    map.insert("a".to_string(), Value::from(1));
    let value = Value::Mapping(map);

    assert_eq!(serialize(&value).unwrap(), "a: 1\nb: 2\n");
    assert_eq!(value.get("a").and_then(Value::as_i64), Some(1));
    assert!(value.get("missing").is_none());
}
