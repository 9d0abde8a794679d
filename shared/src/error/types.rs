//! Engine-boundary error type

use super::codes::ErrorCode;
use thiserror::Error;

/// Failure kinds returned by catalog engine operations
///
/// Every variant leaves the engine state untouched; the UI decides how to
/// render it (inline next to `field` for validation failures).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Missing or invalid required field, nothing was written
    #[error("{message}")]
    Validation {
        field: String,
        message: String,
        missing: bool,
    },

    /// Asset upload failed, nothing was written
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// Remote store call failed, prior in-memory state retained
    #[error("Catalog store unavailable: {0}")]
    StoreUnavailable(String),

    /// Target record no longer exists
    #[error("Product {0} not found")]
    NotFound(String),
}

impl CatalogError {
    /// A required field is empty or absent
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::Validation {
            message: format!("{field} must not be empty"),
            field,
            missing: true,
        }
    }

    /// A field is present but not acceptable
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            missing: false,
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Offending field for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Stable code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { missing: true, .. } => ErrorCode::RequiredField,
            Self::Validation { field, .. } if field == "price" => ErrorCode::ProductInvalidPrice,
            Self::Validation { field, .. } if field == "category" => ErrorCode::CategoryNotFound,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::Upload(_) => ErrorCode::ImageUploadFailed,
            Self::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            Self::NotFound(_) => ErrorCode::ProductNotFound,
        }
    }
}

/// Result type for catalog engine operations
pub type CatalogResult<T> = Result<T, CatalogError>;
