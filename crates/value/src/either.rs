//! Success-or-error payloads sharing one input shape

use crate::convertible::Convertible;
use crate::error::ExtractResult;
use serde_json::Value;

/// Either a data payload or a structured error payload.
///
/// Conversion tries `T` first and falls back to `E`. When both fail, the
/// error from `T` is returned and the one from `E` is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<T, E> {
    /// Successful payload
    Data(T),
    /// Error payload
    Error(E),
}

impl<T, E> Either<T, E> {
    /// Data payload, if any
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Error payload, if any
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Data(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// Check if this holds the data payload
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Convert into a `Result`
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(error) => Err(error),
        }
    }
}

impl<T, E> From<Either<T, E>> for Result<T, E> {
    fn from(either: Either<T, E>) -> Self {
        either.into_result()
    }
}

impl<T: Convertible, E: Convertible> Convertible for Either<T, E> {
    fn from_value(value: Option<&Value>) -> ExtractResult<Self> {
        match T::from_value(value) {
            Ok(data) => Ok(Self::Data(data)),
            Err(data_error) => match E::from_value(value) {
                Ok(error) => {
                    tracing::debug!(error = %data_error, "payload converted as error branch");
                    Ok(Self::Error(error))
                }
                Err(_) => Err(data_error),
            },
        }
    }
}
