//! Extraction error types

use crate::path::KeyPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Standard result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Structured extraction failure.
///
/// Every variant records where the failure happened, which type the caller
/// asked for and, when there was one, the value found at that location.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractError {
    /// Value at the key path has the wrong shape for the requested type
    #[error("Value for key \"{path}\" is not {expected}.")]
    InvalidType {
        /// Normalized key path that was requested
        path: KeyPath,
        /// Label of the requested type
        expected: String,
        /// Value found at the key path
        value: Option<Value>,
    },

    /// Value at the key path has the right shape but malformed content
    #[error("Value for key \"{path}\" is invalid.")]
    InvalidData {
        /// Normalized key path that was requested
        path: KeyPath,
        /// Label of the requested type
        expected: String,
        /// Value found at the key path
        value: Option<Value>,
    },

    /// A non-empty array was required but no element survived conversion
    #[error("Value for key \"{path}\" is empty array. Not empty array of {expected} expected.")]
    InvalidEmptyArray {
        /// Normalized key path that was requested
        path: KeyPath,
        /// Label of the element type
        expected: String,
        /// List found at the key path
        value: Option<Value>,
    },

    /// Nothing at the key path
    #[error("No value for key \"{path}\"")]
    NoData {
        /// Normalized key path that was requested
        path: KeyPath,
        /// Label of the requested type
        expected: String,
        /// Always `None` when raised by an accessor
        value: Option<Value>,
    },

    /// Failure coming from outside the extraction taxonomy
    #[error("{}", message.as_deref().unwrap_or("Unknown error"))]
    Unknown {
        /// Message of the wrapped error
        message: Option<String>,
        /// Label of the requested type
        expected: String,
        /// Value being converted when the failure happened
        value: Option<Value>,
    },
}

/// Integer discriminants of [`ExtractError`] variants.
///
/// These values cross serialization boundaries and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i64)]
pub enum ErrorCode {
    /// [`ExtractError::InvalidType`]
    InvalidType = 0,
    /// [`ExtractError::InvalidData`]
    InvalidData = 1,
    /// [`ExtractError::InvalidEmptyArray`]
    InvalidEmptyArray = 2,
    /// [`ExtractError::NoData`]
    NoData = 3,
    /// [`ExtractError::Unknown`]
    Unknown = 4,
}

impl ErrorCode {
    /// Numeric discriminant
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// Look up a code by its discriminant
    pub fn from_i64(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::InvalidType),
            1 => Some(Self::InvalidData),
            2 => Some(Self::InvalidEmptyArray),
            3 => Some(Self::NoData),
            4 => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Domain-agnostic form of an [`ExtractError`].
///
/// Carries everything needed to log the failure or rebuild it on the other
/// side of a process or serialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Variant discriminant, see [`ErrorCode`]
    pub code: i64,
    /// Key path segments, empty for unknown errors
    pub key_paths: Vec<String>,
    /// Label of the requested type
    pub expected_type: String,
    /// Offending value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Human-readable failure reason
    pub reason: String,
    /// Message of the wrapped foreign error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
}

impl ExtractError {
    /// Create a no data error
    pub fn no_data(path: impl Into<KeyPath>, expected: impl Into<String>) -> Self {
        Self::NoData {
            path: path.into(),
            expected: expected.into(),
            value: None,
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        path: impl Into<KeyPath>,
        expected: impl Into<String>,
        value: impl Into<Option<Value>>,
    ) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(
        path: impl Into<KeyPath>,
        expected: impl Into<String>,
        value: impl Into<Option<Value>>,
    ) -> Self {
        Self::InvalidData {
            path: path.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Create an invalid empty array error
    pub fn invalid_empty_array(
        path: impl Into<KeyPath>,
        expected: impl Into<String>,
        value: impl Into<Option<Value>>,
    ) -> Self {
        Self::InvalidEmptyArray {
            path: path.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Wrap a foreign error, keeping only its message
    pub fn unknown(
        error: impl std::fmt::Display,
        expected: impl Into<String>,
        value: impl Into<Option<Value>>,
    ) -> Self {
        Self::Unknown {
            message: Some(error.to_string()),
            expected: expected.into(),
            value: value.into(),
        }
    }

    /// Variant discriminant
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidType { .. } => ErrorCode::InvalidType,
            Self::InvalidData { .. } => ErrorCode::InvalidData,
            Self::InvalidEmptyArray { .. } => ErrorCode::InvalidEmptyArray,
            Self::NoData { .. } => ErrorCode::NoData,
            Self::Unknown { .. } => ErrorCode::Unknown,
        }
    }

    /// Key path of the failure, `None` for unknown errors
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            Self::InvalidType { path, .. }
            | Self::InvalidData { path, .. }
            | Self::InvalidEmptyArray { path, .. }
            | Self::NoData { path, .. } => Some(path),
            Self::Unknown { .. } => None,
        }
    }

    /// Label of the requested type
    pub fn expected_type(&self) -> &str {
        match self {
            Self::InvalidType { expected, .. }
            | Self::InvalidData { expected, .. }
            | Self::InvalidEmptyArray { expected, .. }
            | Self::NoData { expected, .. }
            | Self::Unknown { expected, .. } => expected,
        }
    }

    /// Offending value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::InvalidType { value, .. }
            | Self::InvalidData { value, .. }
            | Self::InvalidEmptyArray { value, .. }
            | Self::NoData { value, .. }
            | Self::Unknown { value, .. } => value.as_ref(),
        }
    }

    /// Check if the failure is a missing value rather than a bad one
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    /// Convert into the domain-agnostic record form
    pub fn to_record(&self) -> ErrorRecord {
        let underlying = match self {
            Self::Unknown { message, .. } => message.clone(),
            _ => None,
        };

        ErrorRecord {
            code: self.code().as_i64(),
            key_paths: self
                .path()
                .map(|path| path.segments().to_vec())
                .unwrap_or_default(),
            expected_type: self.expected_type().to_string(),
            value: self.value().cloned(),
            reason: self.to_string(),
            underlying,
        }
    }

    /// Rebuild an error from its record form.
    ///
    /// Returns `None` when the record carries an unknown code.
    pub fn from_record(record: &ErrorRecord) -> Option<Self> {
        let path = KeyPath::from_segments(record.key_paths.clone());
        let expected = record.expected_type.clone();
        let value = record.value.clone();

        let error = match ErrorCode::from_i64(record.code)? {
            ErrorCode::InvalidType => Self::InvalidType {
                path,
                expected,
                value,
            },
            ErrorCode::InvalidData => Self::InvalidData {
                path,
                expected,
                value,
            },
            ErrorCode::InvalidEmptyArray => Self::InvalidEmptyArray {
                path,
                expected,
                value,
            },
            ErrorCode::NoData => Self::NoData {
                path,
                expected,
                value,
            },
            ErrorCode::Unknown => Self::Unknown {
                message: record.underlying.clone(),
                expected,
                value,
            },
        };
        Some(error)
    }

    /// Recover an extraction error from a type-erased error.
    ///
    /// Looks at the error itself and then at its direct source, so callers
    /// that wrapped the failure in their own error type still get it back.
    pub fn recover(error: &(dyn std::error::Error + 'static)) -> Option<Self> {
        error
            .downcast_ref::<Self>()
            .or_else(|| error.source().and_then(|source| source.downcast_ref::<Self>()))
            .cloned()
    }
}

impl From<ExtractError> for ErrorRecord {
    fn from(error: ExtractError) -> Self {
        error.to_record()
    }
}
