//! Category Configuration Repository
//!
//! The category list lives in one configuration document
//! (`{categories: [..]}`) rather than one record per category.

use crate::store::RemoteStore;
use serde_json::Value;
use shared::{CatalogResult, CategorySet};
use std::sync::Arc;

const CATEGORIES_FIELD: &str = "categories";

#[derive(Clone)]
pub struct CategoryConfigRepository {
    store: Arc<dyn RemoteStore>,
    collection: String,
    document_id: String,
}

impl CategoryConfigRepository {
    pub fn new(
        store: Arc<dyn RemoteStore>,
        collection: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            collection: collection.into(),
            document_id: document_id.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Current category set; an absent document or field yields an empty set
    pub async fn list(&self) -> CatalogResult<CategorySet> {
        let Some(record) = self.store.get(&self.collection).await? else {
            tracing::debug!(collection = %self.collection, "No category config document");
            return Ok(CategorySet::new());
        };

        let names = match record.fields.get(CATEGORIES_FIELD) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>(),
            Some(other) => {
                tracing::warn!(
                    collection = %self.collection,
                    value = %other,
                    "Category config field is not a list, ignoring"
                );
                Vec::new()
            }
            None => Vec::new(),
        };
        Ok(CategorySet::from_names(names))
    }

    /// Union `name` into the stored set
    pub async fn add(&self, name: &str) -> CatalogResult<()> {
        self.store
            .append_to_set(
                &self.collection,
                &self.document_id,
                CATEGORIES_FIELD,
                Value::String(name.to_string()),
            )
            .await?;
        tracing::debug!(collection = %self.collection, category = %name, "Appended category");
        Ok(())
    }
}
