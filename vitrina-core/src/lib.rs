//! Vitrina Core - catalog state & presentation engine
//!
//! # Overview
//!
//! - **Store** (`store`): the remote document store seam plus an in-memory implementation
//! - **Repository** (`repository`): typed product / category-config facades over the store
//! - **Engine** (`engine`): authoritative in-session products + categories, write-through CRUD
//! - **Views** (`views`): storefront and admin projections over the engine
//! - **Auth** (`auth`): the shared-secret admin gate with an expiring session
//!
//! # Layout
//!
//! ```text
//! vitrina-core/src/
//! ├── store/         # RemoteStore trait, MemoryStore
//! ├── repository/    # ProductRepository, CategoryConfigRepository
//! ├── engine/        # CatalogEngine, ProductForm
//! ├── views/         # StorefrontView, AdminView, pure projections
//! ├── auth/          # SharedSecretGate, SessionStore
//! ├── upload.rs      # AssetUploader seam
//! ├── checkout.rs    # messaging deep-link composer
//! ├── image_url.rs   # CDN delivery URL rewriting
//! ├── config.rs      # environment configuration
//! └── utils/         # logger, validation helpers
//! ```

pub mod auth;
pub mod checkout;
pub mod config;
pub mod engine;
pub mod image_url;
pub mod repository;
pub mod store;
pub mod upload;
pub mod utils;
pub mod views;

// Re-export public types
pub use auth::{AdminSession, AuthError, SessionRecord, SessionStore, SharedSecretGate};
pub use checkout::CheckoutLinkComposer;
pub use config::{Config, MerchantConfig, TenantConfig};
pub use engine::{
    CatalogEngine, CatalogSnapshot, CategoryAdd, ProductForm, RefreshReport, RemoveOutcome,
    SaveKind, SaveOutcome,
};
pub use repository::{CatalogRepository, CategoryConfigRepository, ProductRepository};
pub use store::{MemoryStore, Record, RemoteStore, StoreError, StoreResult};
pub use upload::{AssetUploader, ImageFile, UploadError, UploadProfile};
pub use image_url::optimized_image_url;
pub use views::{
    AdminMode, AdminPage, AdminView, Confirm, GroupPanel, PanelContent, ProductCard,
    StorefrontRender, StorefrontView,
};

// Re-export shared types used at the engine boundary
pub use shared::{
    CatalogError, CatalogResult, CategoryGroup, CategorySet, Decimal, ErrorCode, Page, Product,
    ProductFields, ProductPatch,
};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
