/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals. Negative integer literals can be
/// written directly as mapping values and sequence items. Anything that is
/// not `null`, `true`, `false`, an array or an object is converted with
/// [`to_value`](crate::to_value), falling back to `Value::Null` for values
/// with no Deterministic YAML form.
///
/// ```rust
/// use serde_dyaml::{dyaml, Value};
///
/// let value = dyaml!({
///     "name": "John",
///     "offset": -3,
///     "tags": ["dev", "ops"],
///     "meta": {}
/// });
/// assert_eq!(value.get("name"), Some(&Value::from("John")));
/// assert_eq!(value.get("offset"), Some(&Value::Int(-3)));
/// ```
#[macro_export]
macro_rules! dyaml {
    // Sequence items, accumulated as finished expressions
    (@seq [$($done:expr,)*]) => {
        vec![$($done,)*]
    };

    (@seq [$($done:expr,)*] - $num:literal $(, $($rest:tt)*)?) => {
        $crate::dyaml!(@seq [$($done,)* $crate::dyaml!((-$num)),] $($($rest)*)?)
    };

    (@seq [$($done:expr,)*] $next:tt $(, $($rest:tt)*)?) => {
        $crate::dyaml!(@seq [$($done,)* $crate::dyaml!($next),] $($($rest)*)?)
    };

    // Mapping entries, inserted one statement at a time
    (@map $mapping:ident) => {};

    (@map $mapping:ident $key:literal : - $num:literal $(, $($rest:tt)*)?) => {
        $mapping.insert($key.to_string(), $crate::dyaml!((-$num)));
        $crate::dyaml!(@map $mapping $($($rest)*)?);
    };

    (@map $mapping:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $mapping.insert($key.to_string(), $crate::dyaml!($value));
        $crate::dyaml!(@map $mapping $($($rest)*)?);
    };

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($items:tt)+ ]) => {
        $crate::Value::Sequence($crate::dyaml!(@seq [] $($items)+))
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($entries:tt)+ }) => {{
        let mut mapping = $crate::Mapping::new();
        $crate::dyaml!(@map mapping $($entries)+);
        $crate::Value::Mapping(mapping)
    }};

    // Any other expression goes through serde
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Value};

    #[test]
    fn test_dyaml_macro_primitives() {
        assert_eq!(dyaml!(null), Value::Null);
        assert_eq!(dyaml!(true), Value::Bool(true));
        assert_eq!(dyaml!(false), Value::Bool(false));
        assert_eq!(dyaml!(42), Value::Int(42));
        assert_eq!(dyaml!("hello"), Value::Str("hello".to_string()));
    }

    #[test]
    fn test_dyaml_macro_floats_fall_back_to_null() {
        assert_eq!(dyaml!(3.5), Value::Null);
    }

    #[test]
    fn test_dyaml_macro_collections() {
        assert_eq!(dyaml!([]), Value::Sequence(vec![]));
        assert_eq!(dyaml!({}), Value::Mapping(Mapping::new()));

        let seq = dyaml!([1, "two", null]);
        assert_eq!(
            seq,
            Value::Sequence(vec![Value::Int(1), Value::from("two"), Value::Null])
        );

        let map = dyaml!({"$human$": "note", "name": "X"});
        match map {
            Value::Mapping(m) => {
                assert_eq!(m.len(), 2);
                assert_eq!(m.annotation(), Some("note"));
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_dyaml_macro_negative_literals() {
        let value = dyaml!({"low": -1, "high": 1, "range": [-5, 0, -10,]});
        let map = value.as_mapping().unwrap();
        assert_eq!(map.get("low"), Some(&Value::Int(-1)));
        assert_eq!(map.get("high"), Some(&Value::Int(1)));
        assert_eq!(
            map.get("range"),
            Some(&Value::Sequence(vec![
                Value::Int(-5),
                Value::Int(0),
                Value::Int(-10)
            ]))
        );
    }
}
