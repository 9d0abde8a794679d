//! Data models
//!
//! Shared between the catalog core and the network adapters.
//! Product IDs are opaque strings assigned by the remote store.

pub mod category;
pub mod product;

// Re-exports
pub use category::*;
pub use product::*;
