//! Typed extraction over the untyped document tree.
//!
//! Every accessor returns `None` when the key is missing *or* holds a value of
//! the wrong shape. Callers turn `None` into a hard error with context.

use serde_json::{Map, Value};

/// A JSON object node.
pub type Object = Map<String, Value>;

/// The object stored under `key`.
pub fn get_object<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
    obj.get(key)?.as_object()
}

/// The array stored under `key`.
pub fn get_array<'a>(obj: &'a Object, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key)?.as_array()
}

/// The array under `key`, viewed as a sequence of objects.
///
/// All-or-nothing: a single non-object element makes the whole lookup fail.
pub fn get_object_array<'a>(obj: &'a Object, key: &str) -> Option<Vec<&'a Object>> {
    get_array(obj, key)?.iter().map(Value::as_object).collect()
}

/// The string stored under `key`.
pub fn get_str<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
    obj.get(key)?.as_str()
}

/// The number stored under `key`, as a float.
pub fn get_number(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key)?.as_f64()
}
