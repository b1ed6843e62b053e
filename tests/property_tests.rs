//! Property-based tests for the round-trip and canonical-form guarantees.
//!
//! Typed values go through serde; dynamic values are generated as arbitrary
//! trees of mappings and sequences, with the annotation key mixed in.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_dyaml::{
    from_str, is_canonical, normalize, parse, serialize, to_string, validate, Mapping, Value,
    RESERVED_KEY,
};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn text() -> impl Strategy<Value = String> {
    "[ -~\t\n\ré]{0,12}"
}

fn key() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,8}"
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        text().prop_map(Value::Str),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            (
                prop::collection::vec((key(), inner), 0..6),
                proptest::option::of(text()),
            )
                .prop_map(|(entries, note)| {
                    let mut map: Mapping = entries.into_iter().collect();
                    if let Some(note) = note {
                        map.insert(RESERVED_KEY.to_string(), Value::Str(note));
                    }
                    Value::Mapping(map)
                }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_string(s in text()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_value_round_trip(value in tree()) {
        let text = serialize(&value).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_canonical_is_fixed_point(value in tree()) {
        let text = serialize(&value).unwrap();
        prop_assert!(is_canonical(&text).unwrap());
        prop_assert_eq!(normalize(&text).unwrap(), text);
    }

    #[test]
    fn prop_serializer_output_validates(value in tree()) {
        let text = serialize(&value).unwrap();
        let result = validate(&text, true);
        prop_assert!(result.valid, "{}\n{:?}", text, result.errors);
        prop_assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }
}
