//! Key lookup across spelling variants and lenient numeric coercion.
//!
//! None of these functions fail: a missing key or an unparseable value comes
//! back as `None` and the caller decides on a default.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::fields::Keys;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-+]?\d*\.?\d+").expect("static pattern compiles"))
}

/// Returns the value under the first key in `keys` that is present and not
/// `null`. Non-object records yield `None`.
pub fn pick<'a>(record: &'a Value, keys: Keys) -> Option<&'a Value> {
    let map = record.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Textual view of a scalar field. Numbers and booleans are rendered, nested
/// values are ignored.
pub fn pick_text(record: &Value, keys: Keys) -> Option<String> {
    pick(record, keys).and_then(as_text)
}

pub fn pick_int(record: &Value, keys: Keys) -> Option<i64> {
    pick(record, keys).and_then(to_int)
}

pub fn pick_float(record: &Value, keys: Keys) -> Option<f64> {
    pick(record, keys).and_then(to_float)
}

pub fn pick_bool(record: &Value, keys: Keys) -> Option<bool> {
    match pick(record, keys)? {
        Value::Bool(flag) => Some(*flag),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        other => to_int(other).map(|n| n != 0),
    }
}

/// The array under the first matching key, or an empty slice.
pub fn pick_list<'a>(record: &'a Value, keys: Keys) -> &'a [Value] {
    pick(record, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The object under the first matching key, if it is a non-empty object.
pub fn pick_object<'a>(record: &'a Value, keys: Keys) -> Option<&'a Value> {
    pick(record, keys).filter(|value| is_present(value))
}

/// `true` for anything but `null`, `""`, `{}` and `[]`.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Lenient float conversion.
///
/// Numbers cast directly. Strings yield the first signed decimal substring
/// (`"12.5 ov"` is `12.5`, `"-"` is `None`).
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => number_pattern()
            .find(s)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        _ => None,
    }
}

/// Lenient integer conversion.
///
/// Booleans become 0/1. Everything else goes through a float parse and is
/// truncated toward zero, so `"45"`, `45.9` and `"45.0"` all give 45.
pub fn to_int(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Bool(b) => return Some(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(int) => return Some(int),
            None => n.as_f64()?,
        },
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    truncate(float)
}

fn truncate(float: f64) -> Option<i64> {
    if !float.is_finite() || float >= i64::MAX as f64 || float < i64::MIN as f64 {
        return None;
    }
    Some(float.trunc() as i64)
}
