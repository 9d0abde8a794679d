//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned key, immutable after creation
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL on the asset CDN
    pub image: String,
    /// Category name (not revalidated after save)
    pub category: String,
}

impl Product {
    /// Everything except the identity, as written to the store
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.clone(),
        }
    }

    /// Price as shown to shoppers, e.g. `$10` or `$2.5`
    pub fn display_price(&self) -> String {
        format!("${}", self.price.normalize())
    }
}

/// Create product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub category: String,
}

impl ProductFields {
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
        }
    }
}

/// Update product payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category.is_none()
    }

    /// Apply the present fields onto an existing product
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(v) = &self.name {
            product.name = v.clone();
        }
        if let Some(v) = &self.description {
            product.description = v.clone();
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = &self.image {
            product.image = v.clone();
        }
        if let Some(v) = &self.category {
            product.category = v.clone();
        }
    }
}

impl From<ProductFields> for ProductPatch {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: Some(fields.name),
            description: Some(fields.description),
            price: Some(fields.price),
            image: Some(fields.image),
            category: Some(fields.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Cola".to_string(),
            description: "Botella 2L".to_string(),
            price: Decimal::new(10, 0),
            image: "https://cdn.example.com/upload/cola.jpg".to_string(),
            category: "Gaseosas".to_string(),
        }
    }

    #[test]
    fn test_display_price_strips_trailing_zeros() {
        let mut product = cola();
        assert_eq!(product.display_price(), "$10");

        product.price = Decimal::new(2500, 3);
        assert_eq!(product.display_price(), "$2.5");
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = ProductPatch {
            price: Some(Decimal::new(12, 0)),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert!(json.get("price").is_some());
    }

    #[test]
    fn test_patch_apply_preserves_id() {
        let mut product = cola();
        let patch = ProductPatch {
            name: Some("Cola Zero".to_string()),
            category: Some("Light".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut product);

        assert_eq!(product.id, "p1");
        assert_eq!(product.name, "Cola Zero");
        assert_eq!(product.category, "Light");
        assert_eq!(product.description, "Botella 2L");
    }

    #[test]
    fn test_fields_roundtrip_through_patch() {
        let product = cola();
        let patch = ProductPatch::from(product.fields());
        assert!(!patch.is_empty());

        let mut other = Product {
            id: "p2".to_string(),
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            image: String::new(),
            category: String::new(),
        };
        patch.apply_to(&mut other);
        assert_eq!(other.fields(), product.fields());
        assert_eq!(other.id, "p2");
    }
}
