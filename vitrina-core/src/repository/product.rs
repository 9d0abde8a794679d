//! Product Repository

use crate::store::{Fields, Record, RemoteStore};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::{CatalogError, CatalogResult, Product, ProductFields, ProductPatch};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn RemoteStore>,
    collection: String,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn RemoteStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// All products in store order
    pub async fn list(&self) -> CatalogResult<Vec<Product>> {
        let records = self.store.list(&self.collection).await?;
        tracing::debug!(collection = %self.collection, count = records.len(), "Listed product records");
        Ok(records.into_iter().map(product_from_record).collect())
    }

    /// Insert a product, returning the store-assigned id
    pub async fn create(&self, fields: &ProductFields) -> CatalogResult<String> {
        let body = to_fields(fields)?;
        let id = self.store.create(&self.collection, body).await?;
        tracing::debug!(collection = %self.collection, id = %id, "Created product");
        Ok(id)
    }

    /// Replace the present fields of a product; the id never changes
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> CatalogResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let body = to_fields(patch)?;
        self.store.update(&self.collection, id, body).await?;
        tracing::debug!(collection = %self.collection, id = %id, "Updated product");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        self.store.delete(&self.collection, id).await?;
        tracing::debug!(collection = %self.collection, id = %id, "Deleted product");
        Ok(())
    }
}

fn to_fields<T: serde::Serialize>(value: &T) -> CatalogResult<Fields> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CatalogError::store_unavailable(format!(
            "product payload is not an object: {other}"
        ))),
        Err(e) => Err(CatalogError::store_unavailable(format!(
            "failed to serialize product: {e}"
        ))),
    }
}

/// Map a store record onto a Product.
///
/// The key becomes the id; known fields map by name; unknown fields are
/// ignored; missing or mistyped fields fall back to empty values.
pub(crate) fn product_from_record(record: Record) -> Product {
    let Record { id, fields } = record;
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Product {
        name: text("name"),
        description: text("description"),
        image: text("image"),
        category: text("category"),
        price: price_value(fields.get("price")).unwrap_or_else(|| {
            tracing::warn!(id = %id, "Product record has no usable price, defaulting to 0");
            Decimal::ZERO
        }),
        id,
    }
}

fn price_value(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => {
            let raw = n.to_string();
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, value: Value) -> Record {
        Record::new(id, value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_record_maps_by_name() {
        let product = product_from_record(record(
            "abc",
            json!({
                "name": "Cola",
                "description": "2L",
                "price": 10.5,
                "image": "https://cdn/x.jpg",
                "category": "Gaseosas",
                "stock": 12
            }),
        ));
        assert_eq!(product.id, "abc");
        assert_eq!(product.name, "Cola");
        assert_eq!(product.price, Decimal::new(105, 1));
        assert_eq!(product.category, "Gaseosas");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let product = product_from_record(record("x", json!({"name": "Agua"})));
        assert_eq!(product.description, "");
        assert_eq!(product.image, "");
        assert_eq!(product.category, "");
        assert_eq!(product.price, Decimal::ZERO);
    }

    #[test]
    fn test_price_accepts_integers_and_strings() {
        assert_eq!(price_value(Some(&json!(5))), Some(Decimal::new(5, 0)));
        assert_eq!(price_value(Some(&json!("7.25"))), Some(Decimal::new(725, 2)));
        assert_eq!(price_value(Some(&json!(true))), None);
        assert_eq!(price_value(None), None);
    }

    #[test]
    fn test_fields_serialize_to_flat_object() {
        let fields = ProductFields {
            name: "Cola".into(),
            description: "2L".into(),
            price: Decimal::new(10, 0),
            image: "u".into(),
            category: "Gaseosas".into(),
        };
        let body = to_fields(&fields).unwrap();
        assert_eq!(body.len(), 5);
        assert_eq!(body["price"].as_f64(), Some(10.0));
        assert!(!body.contains_key("id"));
    }
}
