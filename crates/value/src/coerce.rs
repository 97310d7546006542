//! Leaf coercions
//!
//! Each function accepts a resolved value and returns `None` when the value
//! cannot stand in for the target type. Numeric and boolean coercions try the
//! native form first, then the number projection, then string parsing.

use crate::value::{number_as_bool, number_as_f64, number_as_i64, number_as_u64, type_label};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use std::num::IntErrorKind;
use url::Url;

/// String values only
pub fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Native float, any number, or a string parseable as `f64`
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) if number.is_f64() => number.as_f64(),
        Value::Number(number) => number_as_f64(number),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// Native float, any number, or a string parseable as `f32`
pub fn as_f32(value: &Value) -> Option<f32> {
    match value {
        Value::Number(number) => number_as_f64(number).map(|f| f as f32),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// Native integer, the truncated projection of any number, or a string
/// parseable as `i64`
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number_as_i64(number),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// Native boolean, non-zero number, or a boolean string (see [`parse_bool`])
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number_as_bool(number),
        Value::String(text) => parse_bool(text),
        _ => None,
    }
}

/// Case-insensitive `"1"`/`"true"` and `"0"`/`"false"`
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Absolute URL strings
pub fn as_url(value: &Value) -> Option<Url> {
    value.as_str().and_then(|text| Url::parse(text).ok())
}

/// Minor-unit amount (cents) as a major-unit amount
pub fn as_currency(value: &Value) -> Option<f64> {
    as_f64(value).map(|minor| minor / 100.0)
}

/// Scan a leading integer token.
///
/// Leading whitespace is skipped, an optional sign is accepted, and scanning
/// stops at the first non-digit. Returns `None` when no digit follows. A
/// token beyond the `i64` range clamps to `i64::MAX` or `i64::MIN`.
pub fn scan_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    match trimmed[..sign_len + digits].parse::<i64>() {
        Ok(int) => Some(int),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Types with a leaf coercion chain.
///
/// Implemented for the scalar types the accessors hand out directly.
pub trait Primitive: Sized {
    /// Accept or reject a resolved value
    fn coerce(value: &Value) -> Option<Self>;

    /// Label used in error reports
    fn label() -> String {
        type_label::<Self>()
    }
}

impl Primitive for String {
    fn coerce(value: &Value) -> Option<Self> {
        as_string(value)
    }
}

impl Primitive for bool {
    fn coerce(value: &Value) -> Option<Self> {
        as_bool(value)
    }
}

impl Primitive for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        as_f64(value)
    }
}

impl Primitive for f32 {
    fn coerce(value: &Value) -> Option<Self> {
        as_f32(value)
    }
}

impl Primitive for i64 {
    fn coerce(value: &Value) -> Option<Self> {
        as_i64(value)
    }
}

impl Primitive for i32 {
    fn coerce(value: &Value) -> Option<Self> {
        as_i64(value).and_then(|int| Self::try_from(int).ok())
    }
}

impl Primitive for u32 {
    fn coerce(value: &Value) -> Option<Self> {
        as_i64(value).and_then(|int| Self::try_from(int).ok())
    }
}

impl Primitive for u64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number_as_u64(number),
            Value::String(text) => text.parse().ok(),
            _ => None,
        }
    }
}

impl Primitive for usize {
    fn coerce(value: &Value) -> Option<Self> {
        u64::coerce(value).and_then(|int| Self::try_from(int).ok())
    }
}

/// Types built from a raw backing value, the way fieldless enums map to
/// their wire codes.
///
/// ```
/// use keyway_value::FromRaw;
///
/// enum Transport {
///     Flight,
///     Train,
/// }
///
/// impl FromRaw for Transport {
///     type Raw = String;
///
///     fn from_raw(raw: String) -> Option<Self> {
///         match raw.as_str() {
///             "flight" => Some(Self::Flight),
///             "train" => Some(Self::Train),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait FromRaw: Sized {
    /// Backing value type
    type Raw: Primitive;

    /// Map a raw value, `None` when it names no variant
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

/// Date and time types parseable with a `strftime`-style format
pub trait ParseDate: Sized {
    /// Parse `text` with `format`
    fn parse_date(text: &str, format: &str) -> Option<Self>;
}

impl ParseDate for NaiveDate {
    fn parse_date(text: &str, format: &str) -> Option<Self> {
        Self::parse_from_str(text, format).ok()
    }
}

impl ParseDate for NaiveTime {
    fn parse_date(text: &str, format: &str) -> Option<Self> {
        Self::parse_from_str(text, format).ok()
    }
}

impl ParseDate for NaiveDateTime {
    fn parse_date(text: &str, format: &str) -> Option<Self> {
        Self::parse_from_str(text, format).ok()
    }
}

impl ParseDate for DateTime<FixedOffset> {
    fn parse_date(text: &str, format: &str) -> Option<Self> {
        Self::parse_from_str(text, format).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(12.5), Some(12.5))]
    #[case(json!(7), Some(7.0))]
    #[case(json!("12.5"), Some(12.5))]
    #[case(json!("twelve"), None)]
    #[case(json!(true), None)]
    #[case(Value::Null, None)]
    fn test_as_f64(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(as_f64(&value), expected);
    }

    #[rstest]
    #[case(json!(5), Some(5))]
    #[case(json!(12.9), Some(12))]
    #[case(json!("42"), Some(42))]
    #[case(json!("12.5"), None)]
    #[case(json!([1]), None)]
    fn test_as_i64(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(as_i64(&value), expected);
    }

    #[rstest]
    #[case(json!(false), Some(false))]
    #[case(json!(2), Some(true))]
    #[case(json!(0), Some(false))]
    #[case(json!("TRUE"), Some(true))]
    #[case(json!("0"), Some(false))]
    #[case(json!("yes"), None)]
    fn test_as_bool(#[case] value: Value, #[case] expected: Option<bool>) {
        assert_eq!(as_bool(&value), expected);
    }

    #[test]
    fn test_native_false_wins_over_string_parsing() {
        // a present but falsy native value is still the answer
        assert_eq!(as_bool(&json!(false)), Some(false));
        assert_eq!(as_i64(&json!(0)), Some(0));
    }

    #[test]
    fn test_currency_divides_minor_units() {
        assert_eq!(as_currency(&json!(250)), Some(2.5));
        assert_eq!(as_currency(&json!("1999")), Some(19.99));
        assert_eq!(as_currency(&json!(null)), None);
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("  -7 stops", Some(-7))]
    #[case("+3", Some(3))]
    #[case("12abc", Some(12))]
    #[case("abc 12", None)]
    #[case("-", None)]
    #[case("", None)]
    #[case("99999999999999999999", Some(i64::MAX))]
    #[case("-99999999999999999999 stops", Some(i64::MIN))]
    #[case("9223372036854775807", Some(i64::MAX))]
    fn test_scan_int(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(scan_int(text), expected);
    }

    #[test]
    fn test_narrow_integers_reject_out_of_range() {
        assert_eq!(i32::coerce(&json!(i64::MAX)), None);
        assert_eq!(u32::coerce(&json!(-1)), None);
        assert_eq!(u64::coerce(&json!(u64::MAX)), Some(u64::MAX));
        assert_eq!(usize::coerce(&json!("3")), Some(3));
    }

    #[rstest]
    #[case(json!(1.5e19), Some(15_000_000_000_000_000_000))]
    #[case(json!(42.9), Some(42))]
    #[case(json!(1e20), None)]
    #[case(json!(-2.5), None)]
    #[case(json!(-1), None)]
    fn test_u64_from_floats(#[case] value: Value, #[case] expected: Option<u64>) {
        assert_eq!(u64::coerce(&value), expected);
    }

    #[rstest]
    #[case(json!(1e20))]
    #[case(json!(-1e20))]
    #[case(json!(9.3e18))]
    fn test_floats_beyond_i64_are_rejected(#[case] value: Value) {
        assert_eq!(as_i64(&value), None);
        assert_eq!(i64::coerce(&value), None);
        assert_eq!(i32::coerce(&value), None);
    }

    #[test]
    fn test_as_url() {
        assert!(as_url(&json!("https://example.com/logo.png")).is_some());
        assert_eq!(as_url(&json!("not a url")), None);
        assert_eq!(as_url(&json!(1)), None);
    }

    #[test]
    fn test_parse_date() {
        let time = NaiveTime::parse_date("08:30", "%H:%M").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert!(NaiveDate::parse_date("2017-02-11", "%Y-%m-%d").is_some());
        assert!(NaiveDate::parse_date("11/02/2017", "%Y-%m-%d").is_none());
    }
}
