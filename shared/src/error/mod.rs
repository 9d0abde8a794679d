//! Error system for the vitrina storefront
//!
//! - [`ErrorCode`]: stable numeric codes a UI can render
//! - [`ErrorCategory`]: classification of codes by range
//! - [`CatalogError`]: the failure kinds surfaced at the engine boundary
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 6xxx: Product / category / upload errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{CatalogError, ErrorCode};
//!
//! let err = CatalogError::missing("name");
//! assert_eq!(err.field(), Some("name"));
//! assert_eq!(err.code(), ErrorCode::RequiredField);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{CatalogError, CatalogResult};
