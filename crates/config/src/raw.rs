//! Lenient field access over a parsed JSON document.
//!
//! Lookups follow the rules of a JSON DOM walk rather than strict schema
//! decoding:
//! - object member names match case-insensitively, first match wins;
//! - a string accessor on a member of any other type yields `None`;
//! - sequence accessors on a non-array yield an empty sequence.

use serde_json::{Map, Value};

/// Find a member of `obj` by case-insensitive name.
pub fn member<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// String value of member `name`, if present and a string.
pub fn string(obj: &Map<String, Value>, name: &str) -> Option<String> {
    member(obj, name).and_then(Value::as_str).map(str::to_string)
}

/// Numeric value of member `name`, if present and a number.
pub fn number(obj: &Map<String, Value>, name: &str) -> Option<f64> {
    member(obj, name).and_then(Value::as_f64)
}

/// Items of array member `name`; empty when absent or not an array.
pub fn items<'a>(obj: &'a Map<String, Value>, name: &str) -> &'a [Value] {
    match member(obj, name) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn member_names_ignore_case() {
        let o = obj(json!({"Exec": "a.exe"}));
        assert_eq!(string(&o, "exec").as_deref(), Some("a.exe"));
    }

    #[test]
    fn wrong_types_are_absent() {
        let o = obj(json!({"exec": 5, "id": "x", "hotkey": {"key": "a"}}));
        assert_eq!(string(&o, "exec"), None);
        assert_eq!(number(&o, "id"), None);
        assert!(items(&o, "hotkey").is_empty());
        assert!(items(&o, "missing").is_empty());
    }
}
