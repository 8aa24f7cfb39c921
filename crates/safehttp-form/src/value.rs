//! Conversion of raw parameter strings into typed values.
//!
//! The set of convertible types is closed: [`FormValue`] is sealed and
//! implemented for `String`, `i64`, `u64`, `f64` and `bool` only.

use crate::{FormError, FormResult};

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
}

/// A type a form parameter value can be converted to.
pub trait FormValue: sealed::Sealed + Sized {
    /// Converts the raw value submitted under `key`.
    fn from_param(key: &str, raw: &str) -> FormResult<Self>;
}

impl FormValue for String {
    fn from_param(_key: &str, raw: &str) -> FormResult<Self> {
        Ok(raw.to_owned())
    }
}

impl FormValue for i64 {
    fn from_param(key: &str, raw: &str) -> FormResult<Self> {
        raw.parse().map_err(|source| FormError::InvalidInt {
            key: key.to_owned(),
            source,
        })
    }
}

impl FormValue for u64 {
    fn from_param(key: &str, raw: &str) -> FormResult<Self> {
        if raw.starts_with('+') {
            return Err(FormError::UnexpectedSign {
                key: key.to_owned(),
            });
        }
        raw.parse().map_err(|source| FormError::InvalidUint {
            key: key.to_owned(),
            source,
        })
    }
}

impl FormValue for f64 {
    fn from_param(key: &str, raw: &str) -> FormResult<Self> {
        let value: f64 = raw.parse().map_err(|source| FormError::InvalidFloat {
            key: key.to_owned(),
            source,
        })?;

        // Finite literals past f64::MAX parse to infinity.
        if value.is_infinite() && !is_infinity_literal(raw) {
            return Err(FormError::FloatOutOfRange {
                key: key.to_owned(),
            });
        }
        Ok(value)
    }
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

impl FormValue for bool {
    // Only the exact lowercase tokens are accepted.
    fn from_param(key: &str, raw: &str) -> FormResult<Self> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(FormError::InvalidBool {
                key: key.to_owned(),
            }),
        }
    }
}
