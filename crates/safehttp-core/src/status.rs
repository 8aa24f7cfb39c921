//! HTTP status codes.
//!
//! [`StatusCode`] is a closed enumeration of the IANA-registered codes the
//! framework produces. It is not a general-purpose status type:
//! response writers convert it into [`http::StatusCode`] at the edge.
//!
//! See <https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml>.

use std::fmt;
use thiserror::Error;

/// HTTP status codes as registered with IANA.
///
/// # Example
///
/// ```
/// use safehttp_core::StatusCode;
///
/// assert_eq!(StatusCode::Forbidden.as_u16(), 403);
/// assert_eq!(StatusCode::try_from(200_u16), Ok(StatusCode::Ok));
/// assert_eq!(StatusCode::BadRequest.to_string(), "400 Bad Request");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum StatusCode {
    /// 200 OK (RFC 7231, 6.3.1)
    Ok = 200,
    /// 301 Moved Permanently (RFC 7231, 6.4.2)
    MovedPermanently = 301,
    /// 400 Bad Request (RFC 7231, 6.5.1)
    BadRequest = 400,
    /// 401 Unauthorized (RFC 7235, 3.1)
    Unauthorized = 401,
    /// 403 Forbidden (RFC 7231, 6.5.3)
    Forbidden = 403,
    /// 500 Internal Server Error (RFC 7231, 6.6.1)
    InternalServerError = 500,
}

impl StatusCode {
    /// Every status code in the set, in ascending numeric order.
    pub const ALL: [StatusCode; 6] = [
        Self::Ok,
        Self::MovedPermanently,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::InternalServerError,
    ];

    /// Returns the numeric value of the status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the canonical reason phrase.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::MovedPermanently => "Moved Permanently",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    /// Returns true for 2xx codes.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self.as_u16(), 200..=299)
    }

    /// Returns true for 3xx codes.
    #[must_use]
    pub const fn is_redirection(self) -> bool {
        matches!(self.as_u16(), 300..=399)
    }

    /// Returns true for 4xx codes.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self.as_u16(), 400..=499)
    }

    /// Returns true for 5xx codes.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        matches!(self.as_u16(), 500..=599)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A numeric status code that is not part of [`StatusCode`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported HTTP status code: {0}")]
pub struct UnknownStatusCode(pub u16);

impl TryFrom<u16> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_u16() == code)
            .ok_or(UnknownStatusCode(code))
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.as_u16()
    }
}

impl From<StatusCode> for http::StatusCode {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::Ok => http::StatusCode::OK,
            StatusCode::MovedPermanently => http::StatusCode::MOVED_PERMANENTLY,
            StatusCode::BadRequest => http::StatusCode::BAD_REQUEST,
            StatusCode::Unauthorized => http::StatusCode::UNAUTHORIZED,
            StatusCode::Forbidden => http::StatusCode::FORBIDDEN,
            StatusCode::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_iana_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::MovedPermanently.as_u16(), 301);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
        assert_eq!(StatusCode::Forbidden.as_u16(), 403);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    }

    #[test]
    fn test_try_from_round_trip() {
        for status in StatusCode::ALL {
            assert_eq!(StatusCode::try_from(status.as_u16()), Ok(status));
            assert_eq!(u16::from(status), status as u16);
        }
    }

    #[test]
    fn test_try_from_unknown() {
        let err = StatusCode::try_from(404_u16).unwrap_err();
        assert_eq!(err, UnknownStatusCode(404));
        assert_eq!(err.to_string(), "unsupported HTTP status code: 404");
    }

    #[test]
    fn test_http_conversion_matches_numeric_value() {
        for status in StatusCode::ALL {
            let converted: http::StatusCode = status.into();
            assert_eq!(converted.as_u16(), status.as_u16());
            assert_eq!(converted.canonical_reason(), Some(status.reason_phrase()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::Forbidden.to_string(), "403 Forbidden");
        assert_eq!(
            StatusCode::InternalServerError.to_string(),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn test_classes() {
        assert!(StatusCode::Ok.is_success());
        assert!(StatusCode::MovedPermanently.is_redirection());
        assert!(StatusCode::Unauthorized.is_client_error());
        assert!(StatusCode::InternalServerError.is_server_error());
        assert!(!StatusCode::Forbidden.is_server_error());
    }

    #[test]
    fn test_all_is_sorted() {
        let mut sorted = StatusCode::ALL;
        sorted.sort();
        assert_eq!(sorted, StatusCode::ALL);
    }

    proptest! {
        #[test]
        fn prop_try_from_accepts_only_known_codes(code in any::<u16>()) {
            let known = StatusCode::ALL.iter().any(|s| s.as_u16() == code);
            prop_assert_eq!(StatusCode::try_from(code).is_ok(), known);
        }
    }
}
