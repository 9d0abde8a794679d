//! Shared types for the vitrina storefront
//!
//! Domain models, the engine-boundary error taxonomy and pagination types
//! used by both the catalog core and the network adapters.

pub mod error;
pub mod models;
pub mod page;

// Re-exports
pub use error::{CatalogError, CatalogResult, ErrorCategory, ErrorCode};
pub use models::{CategoryGroup, CategorySet, Product, ProductFields, ProductPatch};
pub use page::Page;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
