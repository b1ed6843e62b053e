//! Grammar-level behavior of the parser and the canonical serializer.

use serde_dyaml::{
    dyaml, is_canonical, merge_annotations, normalize, parse, parse_with_options, serialize,
    strip_annotations, Annotation, Error, Options, Value, RESERVED_KEY,
};

#[test]
fn test_scalar_round_trip_table() {
    assert_eq!(parse("null").unwrap(), Value::Null);
    assert_eq!(parse("true").unwrap(), Value::Bool(true));
    assert_eq!(parse("30").unwrap(), Value::Int(30));
    assert_eq!(parse("\"true\"").unwrap(), Value::Str("true".to_string()));
    assert_eq!(parse("abc_1").unwrap(), Value::Str("abc_1".to_string()));
}

#[test]
fn test_nested_round_trip() {
    let value = dyaml!({"config": {"host": "localhost", "port": 5432}});
    let text = serialize(&value).unwrap();
    assert_eq!(text, "config:\n  host: localhost\n  port: 5432\n");
    assert_eq!(parse(&text).unwrap(), value);
}

#[test]
fn test_sequence_order_preserved() {
    let value = dyaml!({"tags": ["ops", "dev"]});
    let text = serialize(&value).unwrap();
    assert_eq!(text, "tags:\n  - ops\n  - dev\n");

    let back = parse(&text).unwrap();
    let tags: Vec<_> = back
        .get("tags")
        .and_then(Value::as_sequence)
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(tags, vec!["ops", "dev"]);
}

#[test]
fn test_reserved_key_first() {
    let value = dyaml!({
        "a": 1,
        "$human$": "context",
        "B": {"z": 1, "$human$": "inner", "y": 2}
    });
    let text = serialize(&value).unwrap();
    assert_eq!(
        text,
        "$human$: context\nB:\n  $human$: inner\n  y: 2\n  z: 1\na: 1\n"
    );
    assert_eq!(parse(&text).unwrap(), value);
}

#[test]
fn test_annotation_merge_example() {
    let value = dyaml!({"name": "X"});
    let merged = merge_annotations(value.clone(), &[Annotation::line(vec![], "note")]);
    assert_eq!(merged, dyaml!({"$human$": "note", "name": "X"}));
    assert_eq!(serialize(&merged).unwrap(), "$human$: note\nname: X\n");
    assert_eq!(strip_annotations(merged), value);
}

#[test]
fn test_canonical_stability() {
    let documents = [
        "null\n",
        "[]\n",
        "{}\n",
        "\"\"\n",
        "- 1\n- \"two words\"\n-\n  - 3\n-\n  a: {}\n",
        "$human$: \"a | b: c\"\nlist:\n  - null\n  - true\n  - -12\nname: \"John Smith\"\n",
        "a:\n  b:\n    c:\n      d: []\n",
    ];
    for text in documents {
        let value = parse(text).unwrap();
        assert_eq!(serialize(&value).unwrap(), text);
        assert!(is_canonical(text).unwrap());
    }
}

#[test]
fn test_normalize_rewrites_to_canonical() {
    let messy = "\
zeta:  \"plain\"

alpha:
  - 007
  -
    y: \"true\"
    x: -0
";
    let canonical = "alpha:\n  - 7\n  -\n    x: 0\n    y: \"true\"\nzeta: plain\n";
    assert_eq!(normalize(messy).unwrap(), canonical);
    assert!(is_canonical(canonical).unwrap());
    assert!(!is_canonical(messy).unwrap());
}

#[test]
fn test_missing_nested_block_is_null() {
    assert_eq!(
        parse("a:\nb:\n").unwrap(),
        dyaml!({"a": null, "b": null})
    );
    assert_eq!(parse("-\n- 1\n").unwrap(), dyaml!([null, 1]));
}

#[test]
fn test_unknown_escape_passes_through() {
    let value = parse("path: \"C:\\windows\"\n").unwrap();
    assert_eq!(value.get("path"), Some(&Value::from("C:\\windows")));
    assert_eq!(serialize(&value).unwrap(), "path: \"C:\\\\windows\"\n");
}

#[test]
fn test_rejected_constructs() {
    let cases = [
        "a: {b: 1}\n",
        "a: [1, 2]\n",
        "a: 'single'\n",
        "a: |\n",
        "a: &anchor x\n",
        "a: 1.5\n",
        "a: x # comment\n",
        "---\n",
        "a: \"x\" y\n",
    ];
    for text in cases {
        let err = parse(text).unwrap_err();
        assert!(
            matches!(err, Error::Scalar { .. } | Error::Structure { .. }),
            "{:?} gave {:?}",
            text,
            err
        );
    }
}

#[test]
fn test_errors_name_the_line() {
    let err = parse("a: 1\nb:\n  c: 2\n   d: 3\n").unwrap_err();
    assert_eq!(err.line(), Some(4));

    let err = parse("a: 1\nb:\n    c: 2\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Indentation {
            line: 3,
            expected: 2,
            ..
        }
    ));
    assert!(err.to_string().contains("Expected 2 spaces, found 4"));
}

#[test]
fn test_depth_limit_is_configurable() {
    let mut text = String::new();
    for level in 0..20 {
        text.push_str(&"  ".repeat(level));
        text.push_str("k:\n");
    }

    assert!(parse(&text).is_ok());

    let err = parse_with_options(&text, &Options::new().with_max_depth(10)).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 10, .. }));
}

#[test]
fn test_reserved_key_must_be_string() {
    assert!(parse("$human$: \"ok\"\n").is_ok());
    assert!(parse("$human$: 1\n").is_err());
    assert!(parse("$human$:\n  a: 1\n").is_err());

    let value = dyaml!({"$human$": ["no"]});
    assert!(matches!(
        serialize(&value).unwrap_err(),
        Error::InvalidKey { ref key, .. } if key == RESERVED_KEY
    ));
}
