//! Repository Module
//!
//! Typed facades translating store records into the catalog model.
//! Products and the category configuration are separate aggregates.

pub mod category;
pub mod product;

pub use category::CategoryConfigRepository;
pub use product::ProductRepository;

use crate::config::TenantConfig;
use crate::store::RemoteStore;
use shared::{CatalogResult, CategorySet, Product, ProductFields, ProductPatch};
use std::sync::Arc;

/// The six catalog store operations, grouped
#[derive(Clone)]
pub struct CatalogRepository {
    products: ProductRepository,
    categories: CategoryConfigRepository,
}

impl CatalogRepository {
    pub fn new(products: ProductRepository, categories: CategoryConfigRepository) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Both repositories over one store
    pub fn with_store(
        store: Arc<dyn RemoteStore>,
        products_collection: impl Into<String>,
        config_collection: impl Into<String>,
        config_document: impl Into<String>,
    ) -> Self {
        Self {
            products: ProductRepository::new(store.clone(), products_collection),
            categories: CategoryConfigRepository::new(store, config_collection, config_document),
        }
    }

    /// Repositories over the collections named by a tenant
    pub fn for_tenant(store: Arc<dyn RemoteStore>, tenant: &TenantConfig) -> Self {
        Self::with_store(
            store,
            tenant.products_collection.clone(),
            tenant.config_collection.clone(),
            tenant.config_document.clone(),
        )
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn categories(&self) -> &CategoryConfigRepository {
        &self.categories
    }

    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.products.list().await
    }

    pub async fn list_categories(&self) -> CatalogResult<CategorySet> {
        self.categories.list().await
    }

    pub async fn create_product(&self, fields: &ProductFields) -> CatalogResult<String> {
        self.products.create(fields).await
    }

    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> CatalogResult<()> {
        self.products.update(id, patch).await
    }

    pub async fn delete_product(&self, id: &str) -> CatalogResult<()> {
        self.products.delete(id).await
    }

    pub async fn add_category(&self, name: &str) -> CatalogResult<()> {
        self.categories.add(name).await
    }
}

impl std::fmt::Debug for CatalogRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogRepository")
            .field("products", &self.products.collection())
            .field("categories", &self.categories.collection())
            .finish()
    }
}
