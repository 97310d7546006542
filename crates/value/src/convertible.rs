//! Types constructible from a single dynamic value

use crate::accessor::Extract;
use crate::error::ExtractResult;
use serde_json::Value;
use url::Url;

/// A type that builds itself from a dynamic value.
///
/// Composite types implement this by calling the [`Extract`] accessors on the
/// value they receive, so conversion composes by plain recursive descent.
///
/// ```
/// use keyway_value::prelude::*;
/// use serde_json::{Value, json};
///
/// struct Recipe {
///     name: String,
///     minutes: i64,
/// }
///
/// impl Convertible for Recipe {
///     fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
///         Ok(Self {
///             name: value.string("name")?,
///             minutes: value.int("minutes")?,
///         })
///     }
/// }
///
/// let doc = json!({"items": [{"recipe": {"name": "soup", "minutes": "20"}}]});
/// let recipe: Recipe = doc.object_of("items.0.recipe").unwrap();
/// assert_eq!(recipe.name, "soup");
/// assert_eq!(recipe.minutes, 20);
/// ```
pub trait Convertible: Sized {
    /// Build from a value that may be absent
    fn from_value(value: Option<&Value>) -> ExtractResult<Self>;
}

macro_rules! impl_convertible_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Convertible for $ty {
                fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
                    value.get_as::<Self>(())
                }
            }
        )*
    };
}

impl_convertible_for_primitive!(String, bool, f64, f32, i64, i32, u32, u64, usize);

impl Convertible for Url {
    fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
        value.url(())
    }
}

/// Any present value, cloned as is
impl Convertible for Value {
    fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
        value.value(()).cloned()
    }
}

/// Lossy list: elements that fail to convert are dropped
impl<T: Convertible> Convertible for Vec<T> {
    fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
        value.array_of_convertible(())
    }
}

/// Absent and `null` become `None`, anything else must convert
impl<T: Convertible> Convertible for Option<T> {
    fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(_) => T::from_value(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use serde_json::json;

    #[test]
    fn test_primitives_convert_from_root() {
        assert_eq!(String::from_value(Some(&json!("abc"))), Ok("abc".into()));
        assert_eq!(i64::from_value(Some(&json!("17"))), Ok(17));
        assert_eq!(bool::from_value(Some(&json!(1))), Ok(true));
        assert_eq!(
            f64::from_value(None),
            Err(ExtractError::no_data((), "f64"))
        );
        assert_eq!(
            i32::from_value(Some(&json!("x"))),
            Err(ExtractError::invalid_type((), "i32", json!("x")))
        );
    }

    #[test]
    fn test_vec_is_lossy() {
        let doc = json!([1, "2", "three", null, 4.7]);
        assert_eq!(Vec::<i64>::from_value(Some(&doc)), Ok(vec![1, 2, 4]));
    }

    #[test]
    fn test_option_accepts_null_and_absence() {
        assert_eq!(Option::<i64>::from_value(None), Ok(None));
        assert_eq!(Option::<i64>::from_value(Some(&Value::Null)), Ok(None));
        assert_eq!(Option::<i64>::from_value(Some(&json!(3))), Ok(Some(3)));
        assert!(Option::<i64>::from_value(Some(&json!("x"))).is_err());
    }

    #[test]
    fn test_value_requires_presence() {
        assert_eq!(Value::from_value(Some(&json!({"a": 1}))), Ok(json!({"a": 1})));
        assert!(Value::from_value(None).unwrap_err().is_missing());
    }
}
