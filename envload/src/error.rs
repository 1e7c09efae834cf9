//! Error types for struct population

use std::num::{ParseFloatError, ParseIntError};

use crate::de::ParseBoolError;
use crate::duration::DurationError;
use crate::field::ElementType;

/// Errors that can occur while populating a struct from a source mapping.
///
/// Every variant names the Rust field it was raised for. Population stops at
/// the first error; fields converted before it keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum EnvLoadError {
    /// A required field resolved to an empty value.
    ///
    /// Occurs when the key is missing from the mapping (or mapped to an empty
    /// string) and the field has no non-empty default.
    #[error("missing required field: field={field} env={key}")]
    MissingRequiredField {
        /// Name of the struct field
        field: &'static str,
        /// Source key the field is read from
        key: &'static str,
    },

    /// Malformed or out-of-range signed integer.
    #[error("invalid int for field '{field}': {source}")]
    InvalidInt {
        field: &'static str,
        source: ParseIntError,
    },

    /// Malformed or out-of-range unsigned integer.
    #[error("invalid uint for field '{field}': {source}")]
    InvalidUint {
        field: &'static str,
        source: ParseIntError,
    },

    /// Malformed float, or a finite literal beyond the declared width.
    #[error("invalid float for field '{field}': {source}")]
    InvalidFloat {
        field: &'static str,
        source: FloatError,
    },

    /// Value outside the accepted boolean literal set.
    #[error("invalid bool for field '{field}': {source}")]
    InvalidBool {
        field: &'static str,
        source: ParseBoolError,
    },

    /// Malformed, overflowing or negative duration literal.
    #[error("invalid duration for field '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        source: DurationError,
    },

    /// A comma-separated element failed to parse.
    ///
    /// `index` counts only the non-empty elements, so `"1,,x"` reports
    /// index 1.
    #[error("invalid {element} in slice for field '{field}' at index {index}: {source}")]
    InvalidSliceElement {
        field: &'static str,
        index: usize,
        element: ElementType,
        source: ValueError,
    },

    /// A map entry is missing its `:` separator.
    #[error("invalid map format for field '{field}': '{pair}'")]
    InvalidMapFormat {
        field: &'static str,
        /// The offending entry as it appeared in the raw value
        pair: String,
    },

    /// A map value failed to parse.
    #[error("invalid map value for field '{field}' key '{key}': {source}")]
    InvalidMapValue {
        field: &'static str,
        key: String,
        source: ValueError,
    },

    /// A field-level `deserializer` function rejected the value.
    #[error("failed to parse field '{field}' as {type_name}: {message}")]
    Custom {
        field: &'static str,
        /// Fully qualified type name that parsing was attempted for
        type_name: &'static str,
        /// Error message from the deserializer
        message: String,
    },
}

impl EnvLoadError {
    /// Create a missing required field error
    #[doc(hidden)]
    pub fn missing(field: &'static str, key: &'static str) -> Self {
        Self::MissingRequiredField { field, key }
    }

    /// Create a deserializer error (used by macro-generated code)
    #[doc(hidden)]
    pub fn custom<T>(field: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Custom {
            field,
            type_name: std::any::type_name::<T>(),
            message: message.to_string(),
        }
    }

    /// Name of the struct field the error was raised for.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field, .. }
            | Self::InvalidInt { field, .. }
            | Self::InvalidUint { field, .. }
            | Self::InvalidFloat { field, .. }
            | Self::InvalidBool { field, .. }
            | Self::InvalidDuration { field, .. }
            | Self::InvalidSliceElement { field, .. }
            | Self::InvalidMapFormat { field, .. }
            | Self::InvalidMapValue { field, .. }
            | Self::Custom { field, .. } => field,
        }
    }

    /// Whether a single scalar value failed to convert (int, uint, float,
    /// bool or duration).
    pub fn is_scalar_conversion(&self) -> bool {
        matches!(
            self,
            Self::InvalidInt { .. }
                | Self::InvalidUint { .. }
                | Self::InvalidFloat { .. }
                | Self::InvalidBool { .. }
                | Self::InvalidDuration { .. }
        )
    }
}

/// Why a float literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FloatError {
    #[error(transparent)]
    Parse(#[from] ParseFloatError),

    /// The literal overflows the declared float width.
    #[error("value {0:?} out of range")]
    OutOfRange(String),
}

/// Why a single slice element or map value failed to parse.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] FloatError),
    #[error(transparent)]
    Bool(#[from] ParseBoolError),
}
