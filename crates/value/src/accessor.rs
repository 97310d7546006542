//! Typed accessors over dynamic documents
//!
//! Every accessor normalizes its key path, resolves it against the root and
//! applies a coercion. Resolution failures raise [`ExtractError::NoData`],
//! coercion failures raise [`ExtractError::InvalidType`]; the two never mix.

use crate::coerce::{self, FromRaw, ParseDate, Primitive};
use crate::convertible::Convertible;
use crate::error::{ExtractError, ExtractResult};
use crate::path::{IntoKeyPath, KeyPath, resolve};
use crate::value::{type_label, value_type_name};
use indexmap::IndexMap;
use regex::RegexBuilder;
use serde_json::{Map, Value};
use url::Url;

/// Typed extraction by key path.
///
/// Implemented for [`Value`], `Option<&Value>` and `Option<Value>`, so
/// accessors work on a whole document as well as on a value that may be
/// absent, such as the argument of [`Convertible::from_value`].
pub trait Extract {
    /// Root value the key paths are resolved against
    fn root(&self) -> Option<&Value>;

    /// Get the value at `path` as is
    fn value(&self, path: impl IntoKeyPath) -> ExtractResult<&Value> {
        self.get_with(path, "Value", Some)
    }

    /// Get a value at `path` using a fallible coercion.
    ///
    /// `coerce` may return `Ok(None)` to reject the value, which raises
    /// `InvalidType`, or an error, which is passed through unchanged.
    fn try_get_with<'a, T, F>(
        &'a self,
        path: impl IntoKeyPath,
        expected: &str,
        coerce: F,
    ) -> ExtractResult<T>
    where
        F: FnOnce(&'a Value) -> ExtractResult<Option<T>>,
    {
        let path = path.into_key_path();
        let Some(value) = resolve(self.root(), &path) else {
            tracing::trace!(%path, expected, "key path resolved to nothing");
            return Err(ExtractError::no_data(path, expected));
        };

        match coerce(value)? {
            Some(converted) => Ok(converted),
            None => {
                tracing::trace!(
                    %path,
                    expected,
                    found = value_type_name(value),
                    "value rejected by coercion"
                );
                Err(ExtractError::invalid_type(path, expected, value.clone()))
            }
        }
    }

    /// Get a value at `path` using a coercion function
    fn get_with<'a, T, F>(&'a self, path: impl IntoKeyPath, expected: &str, coerce: F) -> ExtractResult<T>
    where
        F: FnOnce(&'a Value) -> Option<T>,
    {
        self.try_get_with(path, expected, |value| Ok(coerce(value)))
    }

    /// Get a primitive value at `path` using its coercion chain
    fn get_as<T: Primitive>(&self, path: impl IntoKeyPath) -> ExtractResult<T> {
        self.get_with(path, &T::label(), T::coerce)
    }

    /// Get a string, trimming surrounding whitespace
    fn string(&self, path: impl IntoKeyPath) -> ExtractResult<String> {
        self.string_trimming(path, char::is_whitespace)
    }

    /// Get a string, trimming surrounding characters matching `trim`
    fn string_trimming<P>(&self, path: impl IntoKeyPath, trim: P) -> ExtractResult<String>
    where
        P: Fn(char) -> bool,
    {
        let text: String = self.get_as(path)?;
        Ok(text.trim_matches(|ch: char| trim(ch)).to_owned())
    }

    /// Match a string against a case-insensitive regex.
    ///
    /// Returns every capture group of the first match, the whole match first.
    /// Groups that did not participate are left out; no match gives an empty
    /// list. An invalid pattern raises `Unknown`.
    fn string_matching(&self, path: impl IntoKeyPath, pattern: &str) -> ExtractResult<Vec<String>> {
        let text: String = self.get_as(path)?;
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ExtractError::unknown(e, "Regex", Value::String(pattern.to_owned())))?;

        Ok(regex
            .captures(&text)
            .map(|captures| {
                captures
                    .iter()
                    .flatten()
                    .map(|group| group.as_str().to_owned())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default())
    }

    /// Get an `f64` from a float, any number, or a numeric string
    fn double(&self, path: impl IntoKeyPath) -> ExtractResult<f64> {
        self.get_as(path)
    }

    /// Get an `f32` from a float, any number, or a numeric string
    fn float(&self, path: impl IntoKeyPath) -> ExtractResult<f32> {
        self.get_as(path)
    }

    /// Get an `i64` from an integer, any number, or an integer string
    fn int(&self, path: impl IntoKeyPath) -> ExtractResult<i64> {
        self.get_as(path)
    }

    /// Get a `bool` from a boolean, any number, or a boolean string
    fn bool(&self, path: impl IntoKeyPath) -> ExtractResult<bool> {
        self.get_as(path)
    }

    /// Get an absolute URL from a string
    fn url(&self, path: impl IntoKeyPath) -> ExtractResult<Url> {
        self.get_with(path, "Url", coerce::as_url)
    }

    /// Get a date or time parsed from a string with a `strftime`-style format
    fn date<D: ParseDate>(&self, path: impl IntoKeyPath, format: &str) -> ExtractResult<D> {
        self.date_with(path, |text| D::parse_date(text, format))
    }

    /// Get a date or time parsed from a string by `parser`
    fn date_with<D, P>(&self, path: impl IntoKeyPath, parser: P) -> ExtractResult<D>
    where
        P: FnOnce(&str) -> Option<D>,
    {
        self.get_with(path, &type_label::<D>(), |value| {
            value.as_str().and_then(parser)
        })
    }

    /// Get a major-unit amount from a minor-unit number (cents)
    fn currency(&self, path: impl IntoKeyPath) -> ExtractResult<f64> {
        self.get_with(path, "f64", coerce::as_currency)
    }

    /// Get a value built from its raw backing value
    fn raw<T: FromRaw>(&self, path: impl IntoKeyPath) -> ExtractResult<T> {
        self.get_with(path, &type_label::<T>(), |value| {
            <T::Raw as Primitive>::coerce(value).and_then(T::from_raw)
        })
    }

    /// Scan a leading integer out of a string.
    ///
    /// A string without an integer token raises `InvalidData`, any other
    /// shape raises `InvalidType`.
    fn scanned_int(&self, path: impl IntoKeyPath) -> ExtractResult<i64> {
        let path = path.into_key_path();
        let text: String = self.get_as(&path)?;
        coerce::scan_int(&text)
            .ok_or_else(|| ExtractError::invalid_data(path, "i64", Value::String(text)))
    }

    /// Get a list as is
    fn array(&self, path: impl IntoKeyPath) -> ExtractResult<&[Value]> {
        self.get_with(path, "[Value]", |value| value.as_array().map(Vec::as_slice))
    }

    /// Get a list, keeping only elements accepted by `coerce`
    fn array_with<T, F>(&self, path: impl IntoKeyPath, expected: &str, coerce: F) -> ExtractResult<Vec<T>>
    where
        F: Fn(&Value) -> Option<T>,
    {
        let path = path.into_key_path();
        let items = self.get_with(&path, &format!("Vec<{expected}>"), Value::as_array)?;
        let kept: Vec<T> = items.iter().filter_map(coerce).collect();
        log_discarded(&path, items.len(), kept.len());
        Ok(kept)
    }

    /// Get a list of primitives, dropping elements that do not coerce
    fn array_of<T: Primitive>(&self, path: impl IntoKeyPath) -> ExtractResult<Vec<T>> {
        self.array_with(path, &T::label(), T::coerce)
    }

    /// Get a list of convertible values, dropping elements that fail to convert
    fn array_of_convertible<T: Convertible>(&self, path: impl IntoKeyPath) -> ExtractResult<Vec<T>> {
        let path = path.into_key_path();
        let items = self.get_with(&path, &type_label::<Vec<T>>(), Value::as_array)?;
        let kept: Vec<T> = items
            .iter()
            .filter_map(|item| T::from_value(Some(item)).ok())
            .collect();
        log_discarded(&path, items.len(), kept.len());
        Ok(kept)
    }

    /// Like [`array_with`](Self::array_with), raising `InvalidEmptyArray`
    /// when nothing is left
    fn not_empty_array_with<T, F>(
        &self,
        path: impl IntoKeyPath,
        expected: &str,
        coerce: F,
    ) -> ExtractResult<Vec<T>>
    where
        F: Fn(&Value) -> Option<T>,
    {
        let path = path.into_key_path();
        let kept = self.array_with(&path, expected, coerce)?;
        ensure_not_empty(self.root(), path, expected, kept)
    }

    /// Like [`array_of`](Self::array_of), raising `InvalidEmptyArray` when
    /// nothing is left
    fn not_empty_array_of<T: Primitive>(&self, path: impl IntoKeyPath) -> ExtractResult<Vec<T>> {
        self.not_empty_array_with(path, &T::label(), T::coerce)
    }

    /// Like [`array_of_convertible`](Self::array_of_convertible), raising
    /// `InvalidEmptyArray` when nothing is left
    fn not_empty_array_of_convertible<T: Convertible>(
        &self,
        path: impl IntoKeyPath,
    ) -> ExtractResult<Vec<T>> {
        let path = path.into_key_path();
        let kept = self.array_of_convertible(&path)?;
        ensure_not_empty(self.root(), path, &type_label::<T>(), kept)
    }

    /// Get a string-keyed map of convertible values, dropping entries that
    /// fail to convert
    fn dictionary<T: Convertible>(&self, path: impl IntoKeyPath) -> ExtractResult<IndexMap<String, T>> {
        let path = path.into_key_path();
        let entries = self.get_with(&path, &type_label::<IndexMap<String, T>>(), Value::as_object)?;
        let kept: IndexMap<String, T> = entries
            .iter()
            .filter_map(|(key, item)| T::from_value(Some(item)).ok().map(|v| (key.clone(), v)))
            .collect();
        log_discarded(&path, entries.len(), kept.len());
        Ok(kept)
    }

    /// Get a string-keyed map, converting every entry with `map`.
    ///
    /// An entry mapped to `None` is left out of the result; an error from
    /// `map` fails the whole accessor.
    fn dictionary_with<T, F>(&self, path: impl IntoKeyPath, map: F) -> ExtractResult<IndexMap<String, T>>
    where
        F: Fn(&Value) -> ExtractResult<Option<T>>,
    {
        self.try_get_with(path, &type_label::<IndexMap<String, T>>(), |value| {
            let Some(entries) = value.as_object() else {
                return Ok(None);
            };
            let mut converted = IndexMap::with_capacity(entries.len());
            for (key, item) in entries {
                if let Some(item) = map(item)? {
                    converted.insert(key.clone(), item);
                }
            }
            Ok(Some(converted))
        })
    }

    /// Get an object as is
    fn object(&self, path: impl IntoKeyPath) -> ExtractResult<&Map<String, Value>> {
        self.get_with(path, "Map<String, Value>", Value::as_object)
    }

    /// Build a convertible value from whatever is at `path`.
    ///
    /// Raises `NoData` when the path resolves to nothing; otherwise the
    /// result of [`Convertible::from_value`] is returned unchanged.
    fn object_of<T: Convertible>(&self, path: impl IntoKeyPath) -> ExtractResult<T> {
        let value = self.get_with(path, &type_label::<T>(), Some)?;
        T::from_value(Some(value))
    }
}

impl Extract for Value {
    fn root(&self) -> Option<&Value> {
        Some(self)
    }
}

impl Extract for Option<&Value> {
    fn root(&self) -> Option<&Value> {
        *self
    }
}

impl Extract for Option<Value> {
    fn root(&self) -> Option<&Value> {
        self.as_ref()
    }
}

fn ensure_not_empty<T>(
    root: Option<&Value>,
    path: KeyPath,
    expected: &str,
    items: Vec<T>,
) -> ExtractResult<Vec<T>> {
    if items.is_empty() {
        let list = resolve(root, &path).cloned();
        return Err(ExtractError::invalid_empty_array(path, expected, list));
    }
    Ok(items)
}

fn log_discarded(path: &KeyPath, total: usize, kept: usize) {
    if kept < total {
        tracing::debug!(%path, discarded = total - kept, total, "discarded elements that failed to convert");
    }
}
