//! Error codes for the vitrina storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 6xxx: Product errors (65xx: image upload)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Represented as u16 values so UIs in any language can match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Admin gate not passed
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 6xxx: Product ====================
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,
    CategoryNotFound = 6101,

    // ==================== 65xx: Image Upload ====================
    ImageUploadFailed = 6509,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    StoreUnavailable = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Administrator login required",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::CategoryNotFound => "Category not found",

            // Upload
            ErrorCode::ImageUploadFailed => "Image upload failed",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StoreUnavailable => "Catalog store unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),

            // Upload
            6509 => Ok(ErrorCode::ImageUploadFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StoreUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::ImageUploadFailed.code(), 6509);
        assert_eq!(ErrorCode::StoreUnavailable.code(), 9002);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::SessionExpired,
            ErrorCode::CategoryNotFound,
            ErrorCode::ImageUploadFailed,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::ProductInvalidPrice).unwrap();
        assert_eq!(json, "6002");
        let code: ErrorCode = serde_json::from_str("9002").unwrap();
        assert_eq!(code, ErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::RequiredField.to_string(), "E0007");
        assert_eq!(ErrorCode::StoreUnavailable.to_string(), "E9002");
    }
}
