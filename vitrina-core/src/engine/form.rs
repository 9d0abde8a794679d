//! Product form draft and its validation

use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};
use rust_decimal::Decimal;
use shared::{CatalogError, CatalogResult, CategorySet, Product, ProductFields};

/// Draft product fields as typed by an administrator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    /// `None` until a price is entered
    pub price: Option<Decimal>,
    /// Existing image URL; may stay empty while an image file is pending
    pub image: String,
    pub category: String,
}

impl ProductForm {
    /// Copy every field of an existing product (edit mode)
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: Some(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }

    /// Check fields in form order (name, description, price, category, image)
    /// and return the first failure.
    ///
    /// On success the returned fields are trimmed; `image` is empty when
    /// `has_pending_image` is set and no URL was typed, and gets filled in
    /// after the upload.
    pub fn validate(
        &self,
        categories: &CategorySet,
        has_pending_image: bool,
    ) -> CatalogResult<ProductFields> {
        let name = validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        let description =
            validate_required_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;

        let price = self.price.ok_or_else(|| CatalogError::missing("price"))?;
        if price < Decimal::ZERO {
            return Err(CatalogError::invalid("price", "price must not be negative"));
        }

        let category = validate_required_text(&self.category, "category", MAX_NAME_LEN)?;
        if !categories.contains(category) {
            return Err(CatalogError::invalid(
                "category",
                format!("category '{category}' is not in the category list"),
            ));
        }

        let image = if has_pending_image {
            validate_optional_text(&self.image, "image", MAX_URL_LEN)?
        } else {
            validate_required_text(&self.image, "image", MAX_URL_LEN)?
        };

        Ok(ProductFields {
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: image.to_string(),
            category: category.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategorySet {
        CategorySet::from_names(["Gaseosas", "Aguas"])
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Cola".into(),
            description: "Botella 2L".into(),
            price: Some(Decimal::new(10, 0)),
            image: "https://cdn.example.com/upload/cola.jpg".into(),
            category: "Gaseosas".into(),
        }
    }

    #[test]
    fn test_valid_form_produces_trimmed_fields() {
        let mut form = valid_form();
        form.name = "  Cola  ".into();
        let fields = form.validate(&categories(), false).unwrap();
        assert_eq!(fields.name, "Cola");
        assert_eq!(fields.price, Decimal::new(10, 0));
    }

    #[test]
    fn test_reports_first_missing_field_in_order() {
        let form = ProductForm::default();
        assert_eq!(form.validate(&categories(), false).unwrap_err().field(), Some("name"));

        let mut form = valid_form();
        form.description.clear();
        form.price = None;
        assert_eq!(
            form.validate(&categories(), false).unwrap_err().field(),
            Some("description")
        );

        let mut form = valid_form();
        form.price = None;
        assert_eq!(form.validate(&categories(), false).unwrap_err().field(), Some("price"));
    }

    #[test]
    fn test_negative_price_rejected_zero_accepted() {
        let mut form = valid_form();
        form.price = Some(Decimal::new(-1, 0));
        let err = form.validate(&categories(), false).unwrap_err();
        assert_eq!(err.field(), Some("price"));

        form.price = Some(Decimal::ZERO);
        assert!(form.validate(&categories(), false).is_ok());
    }

    #[test]
    fn test_category_must_be_in_set() {
        let mut form = valid_form();
        form.category = "Vinos".into();
        let err = form.validate(&categories(), false).unwrap_err();
        assert_eq!(err.field(), Some("category"));
        assert!(!matches!(err, CatalogError::Validation { missing: true, .. }));
    }

    #[test]
    fn test_image_optional_only_with_pending_file() {
        let mut form = valid_form();
        form.image.clear();
        assert_eq!(form.validate(&categories(), false).unwrap_err().field(), Some("image"));

        let fields = form.validate(&categories(), true).unwrap();
        assert!(fields.image.is_empty());
    }

    #[test]
    fn test_from_product_copies_everything() {
        let product = valid_form()
            .validate(&categories(), false)
            .unwrap()
            .into_product("p1");
        let form = ProductForm::from_product(&product);
        assert_eq!(form, valid_form());
    }
}
