//! Helpers over the dynamic value model
//!
//! Documents are plain [`serde_json::Value`] trees produced by an external
//! decoder. Nothing in this crate mutates them.

use serde_json::{Number, Value};

/// Get the type name of a Value for diagnostics
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Integer projection of a number, truncating floating values.
///
/// Floats outside the `i64` range are rejected rather than saturated.
#[inline]
pub fn number_as_i64(num: &Number) -> Option<i64> {
    num.as_i64().or_else(|| {
        num.as_f64()
            .filter(|f| (I64_FLOOR..I64_CEIL).contains(f))
            .map(|f| f as i64)
    })
}

/// Unsigned projection of a number, truncating floating values.
///
/// Negative numbers and floats beyond `u64::MAX` are rejected.
#[inline]
pub fn number_as_u64(num: &Number) -> Option<u64> {
    num.as_u64().or_else(|| {
        num.as_f64()
            .filter(|f| (0.0..U64_CEIL).contains(f))
            .map(|f| f as u64)
    })
}

// -2^63, 2^63 and 2^64 are exact in f64; the upper bounds are exclusive
const I64_FLOOR: f64 = i64::MIN as f64;
const I64_CEIL: f64 = 9_223_372_036_854_775_808.0;
const U64_CEIL: f64 = 18_446_744_073_709_551_616.0;

/// Floating projection of a number
#[inline]
pub fn number_as_f64(num: &Number) -> Option<f64> {
    num.as_f64().or_else(|| num.as_i64().map(|i| i as f64))
}

/// Boolean projection of a number: anything but zero is true
#[inline]
pub fn number_as_bool(num: &Number) -> Option<bool> {
    number_as_f64(num).map(|f| f != 0.0)
}

/// Short type label used in error reports.
///
/// Module paths are stripped from every component, so
/// `alloc::vec::Vec<my_app::Entity>` becomes `Vec<Entity>`.
pub fn type_label<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut label = String::with_capacity(full.len());
    let mut token = String::new();

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            token.push(ch);
        } else {
            push_last_component(&mut label, &token);
            token.clear();
            label.push(ch);
        }
    }
    push_last_component(&mut label, &token);
    label
}

fn push_last_component(label: &mut String, token: &str) {
    if let Some(last) = token.rsplit("::").next() {
        label.push_str(last);
    }
}
