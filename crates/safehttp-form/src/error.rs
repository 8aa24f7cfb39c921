//! Form error types.
//!
//! [`FormError`] covers both failures recorded in a form's error slot
//! (value conversion, unsupported destination types) and failures returned
//! while building a form from a raw request.

use safehttp_core::StatusCode;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Result type alias using [`FormError`].
pub type FormResult<T> = Result<T, FormError>;

/// Error raised while reading or building a form.
///
/// # Example
///
/// ```rust
/// use safehttp_core::StatusCode;
/// use safehttp_form::Form;
///
/// let mut form: Form = [("n", "abc")].into_iter().collect();
/// assert_eq!(form.int64("n", 7), 7);
///
/// let err = form.err().unwrap();
/// assert_eq!(err.key(), Some("n"));
/// assert_eq!(err.status_code(), StatusCode::BadRequest);
/// assert_eq!(err.error_code(), "INVALID_PARAMETER");
/// ```
#[derive(Error, Debug)]
pub enum FormError {
    /// The value is not a base-10 signed 64-bit integer.
    #[error("form parameter {key:?} is not a valid integer: {source}")]
    InvalidInt {
        /// The parameter key.
        key: String,
        /// The underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The value is not a base-10 unsigned 64-bit integer.
    #[error("form parameter {key:?} is not a valid unsigned integer: {source}")]
    InvalidUint {
        /// The parameter key.
        key: String,
        /// The underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The value is not a 64-bit float.
    #[error("form parameter {key:?} is not a valid float: {source}")]
    InvalidFloat {
        /// The parameter key.
        key: String,
        /// The underlying parse error.
        #[source]
        source: ParseFloatError,
    },

    /// The value is an unsigned integer written with an explicit `+` sign.
    #[error("form parameter {key:?} is not a valid unsigned integer: unexpected sign")]
    UnexpectedSign {
        /// The parameter key.
        key: String,
    },

    /// The value is a finite float too large to represent.
    #[error("form parameter {key:?} is not a valid float: value out of range")]
    FloatOutOfRange {
        /// The parameter key.
        key: String,
    },

    /// The value is neither `true` nor `false`.
    #[error("values of form parameter {key:?} not a boolean")]
    InvalidBool {
        /// The parameter key.
        key: String,
    },

    /// The slice destination has an element type forms cannot convert to.
    #[error("type not supported in slice call: {type_name}")]
    UnsupportedType {
        /// Name of the destination type.
        type_name: &'static str,
    },

    /// The body (or one part of it) exceeds the configured limit.
    #[error("payload too large: max {max} bytes, got {actual} bytes")]
    PayloadTooLarge {
        /// Configured limit in bytes.
        max: usize,
        /// Actual size in bytes.
        actual: usize,
    },

    /// The body holds more fields than allowed.
    #[error("too many form fields (max {max})")]
    TooManyFields {
        /// Configured field limit.
        max: usize,
    },

    /// The body or query is not valid form encoding.
    #[error("invalid form encoding: {0}")]
    InvalidEncoding(String),

    /// The Content-Type header is missing or unusable.
    #[error("invalid content type: {0}")]
    InvalidContentType(String),

    /// The multipart stream is malformed.
    #[error("multipart parse error: {0}")]
    Multipart(#[from] multer::Error),
}

impl FormError {
    /// Returns the parameter key for conversion errors.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidInt { key, .. }
            | Self::InvalidUint { key, .. }
            | Self::InvalidFloat { key, .. }
            | Self::UnexpectedSign { key }
            | Self::FloatOutOfRange { key }
            | Self::InvalidBool { key } => Some(key),
            _ => None,
        }
    }

    /// Returns true if the error came from converting a present value.
    #[must_use]
    pub fn is_conversion(&self) -> bool {
        matches!(
            self,
            Self::InvalidInt { .. }
                | Self::InvalidUint { .. }
                | Self::InvalidFloat { .. }
                | Self::UnexpectedSign { .. }
                | Self::FloatOutOfRange { .. }
                | Self::InvalidBool { .. }
        )
    }

    /// Returns the status code a handler should answer with.
    ///
    /// Unsupported destination types are programming errors and map to
    /// 500; everything else is the client's fault.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedType { .. } => StatusCode::InternalServerError,
            _ => StatusCode::BadRequest,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInt { .. }
            | Self::InvalidUint { .. }
            | Self::InvalidFloat { .. }
            | Self::UnexpectedSign { .. }
            | Self::FloatOutOfRange { .. }
            | Self::InvalidBool { .. } => "INVALID_PARAMETER",
            Self::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::TooManyFields { .. } => "TOO_MANY_FIELDS",
            Self::InvalidEncoding(_) => "INVALID_ENCODING",
            Self::InvalidContentType(_) => "INVALID_CONTENT_TYPE",
            Self::Multipart(_) => "MULTIPART_PARSE_FAILED",
        }
    }
}

/// Errors that can occur while loading a [`FormConfig`](crate::FormConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },
}
