use serde_dyaml::{dyaml, serialize, Mapping, Value};

#[test]
fn test_dyaml_macro_null() {
    let value = dyaml!(null);
    assert!(value.is_null());
}

#[test]
fn test_dyaml_macro_booleans() {
    assert_eq!(dyaml!(true), Value::Bool(true));
    assert_eq!(dyaml!(false), Value::Bool(false));
}

#[test]
fn test_dyaml_macro_numbers() {
    assert_eq!(dyaml!(42), Value::Int(42));
    assert_eq!(dyaml!(-123), Value::Int(-123));
    assert_eq!(dyaml!(i64::MAX), Value::Int(i64::MAX));

    let offsets = dyaml!({"start": -40, "steps": [-1, 2, -3]});
    assert_eq!(offsets.get("start"), Some(&Value::Int(-40)));
    assert_eq!(
        serialize(&offsets).unwrap(),
        "start: -40\nsteps:\n  - -1\n  - 2\n  - -3\n"
    );
}

#[test]
fn test_dyaml_macro_strings() {
    assert_eq!(dyaml!("hello world"), Value::from("hello world"));
    assert_eq!(dyaml!(""), Value::Str(String::new()));

    let name = String::from("dynamic");
    assert_eq!(dyaml!(name), Value::from("dynamic"));
}

#[test]
fn test_dyaml_macro_sequences() {
    assert_eq!(dyaml!([]), Value::Sequence(vec![]));

    let mixed = dyaml!([1, "hello", true, null, [], {}]);
    assert_eq!(
        mixed,
        Value::Sequence(vec![
            Value::Int(1),
            Value::from("hello"),
            Value::Bool(true),
            Value::Null,
            Value::Sequence(vec![]),
            Value::Mapping(Mapping::new()),
        ])
    );
}

#[test]
fn test_dyaml_macro_mappings() {
    assert_eq!(dyaml!({}), Value::Mapping(Mapping::new()));

    let value = dyaml!({
        "name": "Alice",
        "age": 30,
    });
    let map = value.as_mapping().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("name"), Some(&Value::from("Alice")));
    assert_eq!(map.get("age"), Some(&Value::Int(30)));
}

#[test]
fn test_dyaml_macro_nested() {
    let nested = dyaml!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let user = nested.get("user").and_then(Value::as_mapping).unwrap();
    assert_eq!(user.get("id"), Some(&Value::Int(123)));
    assert_eq!(user.get("active"), Some(&Value::Bool(true)));

    let tags = nested.get("tags").and_then(Value::as_sequence).unwrap();
    assert_eq!(tags, &vec![Value::from("admin"), Value::from("developer")]);

    assert_eq!(
        serialize(&nested).unwrap(),
        "count: 42\ntags:\n  - admin\n  - developer\nuser:\n  active: true\n  id: 123\n  name: Bob\n"
    );
}

#[test]
fn test_value_predicates() {
    let null_val = dyaml!(null);
    assert!(null_val.is_null());
    assert!(null_val.is_scalar());
    assert!(!null_val.is_mapping());

    let seq = dyaml!([1, 2, 3]);
    assert!(seq.is_sequence());
    assert!(!seq.is_inline());
    assert_eq!(seq.as_sequence().map(Vec::len), Some(3));

    assert!(dyaml!([]).is_inline());
    assert!(dyaml!({}).is_inline());
    assert_eq!(dyaml!({"k": "v"}).kind(), "mapping");
}
