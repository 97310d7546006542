//! # Keyway Value
//!
//! Key-path navigation and typed extraction over dynamic JSON documents.
//!
//! Documents are [`serde_json::Value`] trees produced by an external decoder.
//! This crate never parses text and never mutates a document: it resolves
//! key paths into the tree, coerces what it finds into precise Rust types and
//! reports failures as structured [`ExtractError`] values.
//!
//! ## Key Components
//!
//! - **Key paths**: [`KeyPath`] and [`resolve`], dot-splitting normalization
//!   and a total, side-effect-free walk through maps and lists
//! - **Accessors**: the [`Extract`] trait with one accessor per target type,
//!   each with its own coercion chain
//! - **Combinators**: lossy and non-empty arrays, string-keyed maps,
//!   [`Either`] payloads
//! - **Conversion**: the [`Convertible`] trait for composite types built from
//!   the same accessors
//! - **Errors**: [`ExtractError`] and its serializable [`ErrorRecord`] form
//!
//! ## Usage
//!
//! ```rust
//! use keyway_value::prelude::*;
//! use serde_json::json;
//!
//! let doc = json!({"items": [{"id": "5", "tags": ["a", 1, "b"]}]});
//!
//! assert_eq!(doc.int("items.0.id").unwrap(), 5);
//! assert_eq!(doc.array_of::<String>(["items.0", "tags"]).unwrap(), ["a", "b"]);
//! assert!(doc.int("items.1.id").unwrap_err().is_missing());
//! ```

#![deny(unused_must_use)]
#![warn(missing_docs)]

pub mod accessor;
pub mod coerce;
pub mod convertible;
pub mod either;
pub mod error;
pub mod path;
pub mod value;

pub use accessor::Extract;
pub use coerce::{FromRaw, ParseDate, Primitive};
pub use convertible::Convertible;
pub use either::Either;
pub use error::{ErrorCode, ErrorRecord, ExtractError, ExtractResult};
pub use path::{IntoKeyPath, KeyPath, resolve};
pub use value::{type_label, value_type_name};

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude for common imports
    //!
    //! # Example
    //! ```rust
    //! use keyway_value::prelude::*;
    //! ```

    pub use crate::accessor::Extract;
    pub use crate::coerce::{FromRaw, ParseDate, Primitive};
    pub use crate::convertible::Convertible;
    pub use crate::either::Either;
    pub use crate::error::{ExtractError, ExtractResult};
    pub use crate::path::{IntoKeyPath, KeyPath};
}
