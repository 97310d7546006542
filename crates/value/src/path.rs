//! Key paths and path resolution
//!
//! A [`KeyPath`] is an ordered list of segments. A segment made only of ASCII
//! digits indexes into an array, any other segment looks up an object key.
//! Every input string is split on `.` during construction, so
//! `["items.0.recipe", "name"]` and `["items", "0", "recipe", "name"]` build
//! the same path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Normalized key path into a dynamic document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Build a path from dot-joined parts
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = Vec::new();
        for part in parts {
            segments.extend(part.as_ref().split('.').map(str::to_owned));
        }
        Self { segments }
    }

    /// The identity path, resolving to the root value itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments that are already split.
    ///
    /// Segments are taken verbatim, dots included.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Path segments in resolution order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the identity path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append another path after this one
    #[must_use]
    pub fn join(&self, other: impl IntoKeyPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.into_key_path().segments);
        Self { segments }
    }

    /// Resolve this path against a root value
    pub fn resolve<'a>(&self, root: Option<&'a Value>) -> Option<&'a Value> {
        resolve(root, self)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl IntoIterator for KeyPath {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::new([path])
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        Self::new([path])
    }
}

impl From<()> for KeyPath {
    fn from((): ()) -> Self {
        Self::root()
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl<S: AsRef<str>> From<Vec<S>> for KeyPath {
    fn from(parts: Vec<S>) -> Self {
        Self::new(parts)
    }
}

/// Conversion into a normalized [`KeyPath`].
///
/// Accessors accept anything implementing this trait, so a single key, an
/// array of keys or an already built path can all be passed directly.
pub trait IntoKeyPath {
    /// Normalize into a key path
    fn into_key_path(self) -> KeyPath;
}

impl IntoKeyPath for KeyPath {
    fn into_key_path(self) -> KeyPath {
        self
    }
}

impl IntoKeyPath for &KeyPath {
    fn into_key_path(self) -> KeyPath {
        self.clone()
    }
}

impl IntoKeyPath for () {
    fn into_key_path(self) -> KeyPath {
        KeyPath::root()
    }
}

impl IntoKeyPath for &str {
    fn into_key_path(self) -> KeyPath {
        KeyPath::new([self])
    }
}

impl IntoKeyPath for String {
    fn into_key_path(self) -> KeyPath {
        KeyPath::new([self])
    }
}

impl IntoKeyPath for &String {
    fn into_key_path(self) -> KeyPath {
        KeyPath::new([self])
    }
}

impl<S: AsRef<str>, const N: usize> IntoKeyPath for [S; N] {
    fn into_key_path(self) -> KeyPath {
        KeyPath::new(self)
    }
}

impl<S: AsRef<str>> IntoKeyPath for &[S] {
    fn into_key_path(self) -> KeyPath {
        KeyPath::new(self)
    }
}

impl<S: AsRef<str>> IntoKeyPath for Vec<S> {
    fn into_key_path(self) -> KeyPath {
        KeyPath::new(self)
    }
}

/// Walk `root` along `path`.
///
/// Returns `None` as soon as a segment cannot be followed: a missing key, an
/// index out of bounds, or an intermediate value of the wrong shape. The
/// empty path returns `root` unchanged. Never fails, never allocates.
pub fn resolve<'a>(root: Option<&'a Value>, path: &KeyPath) -> Option<&'a Value> {
    path.segments
        .iter()
        .try_fold(root?, |current, segment| step(current, segment))
}

/// Follow a single segment
fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match parse_index(segment) {
        Some(index) => current.as_array()?.get(index),
        None => current.as_object()?.get(segment),
    }
}

/// Non-negative decimal index, `None` for map keys
fn parse_index(segment: &str) -> Option<usize> {
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalization_splits_on_dots() {
        let path = KeyPath::new(["items.0.recipe", "name"]);
        assert_eq!(path.segments(), ["items", "0", "recipe", "name"]);
        assert_eq!(path.len(), 4);
        assert_eq!(path, ["items", "0", "recipe", "name"].into_key_path());
        assert_eq!(path.to_string(), "items.0.recipe.name");
    }

    #[test]
    fn test_root_path() {
        let doc = json!({"a": 1});
        assert!(KeyPath::root().is_empty());
        assert_eq!(resolve(Some(&doc), &KeyPath::root()), Some(&doc));
        assert_eq!(resolve(None, &KeyPath::root()), None);
    }

    #[test]
    fn test_resolve_nested() {
        let doc = json!({"items": [{"recipe": {"name": "soup"}}, {"recipe": null}]});

        let name = resolve(Some(&doc), &"items.0.recipe.name".into());
        assert_eq!(name, Some(&json!("soup")));

        let null = resolve(Some(&doc), &"items.1.recipe".into());
        assert_eq!(null, Some(&Value::Null));

        let recipe = KeyPath::from("items.0.recipe");
        assert_eq!(recipe.resolve(Some(&doc)), Some(&json!({"name": "soup"})));
        assert_eq!(recipe.join("name.first").resolve(Some(&doc)), None);
    }

    #[test]
    fn test_resolve_short_circuits() {
        let doc = json!({"items": [1, 2], "user": {"name": "ann"}});

        // out of bounds
        assert_eq!(resolve(Some(&doc), &"items.2".into()), None);
        // index into a map
        assert_eq!(resolve(Some(&doc), &"user.0".into()), None);
        // key into a list
        assert_eq!(resolve(Some(&doc), &"items.first".into()), None);
        // through a leaf
        assert_eq!(resolve(Some(&doc), &"user.name.first".into()), None);
    }

    #[test]
    fn test_negative_index_is_a_key() {
        let doc = json!({"-1": "minus one", "list": [1]});
        assert_eq!(resolve(Some(&doc), &"-1".into()), Some(&json!("minus one")));
        assert_eq!(resolve(Some(&doc), &"list.-1".into()), None);
    }

    #[test]
    fn test_join() {
        let base = KeyPath::from("data.items");
        assert_eq!(base.join("0.name").to_string(), "data.items.0.name");
        assert_eq!(base.join(()), base);
    }
}
