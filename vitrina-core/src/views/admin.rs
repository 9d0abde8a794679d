//! Admin View Model
//!
//! Holds the draft form, the pending image file, the edit target and the
//! list filters; every write goes through [`CatalogEngine`].

use super::projection::filter_by_name_and_category;
use crate::auth::{AdminSession, AuthError};
use crate::engine::{CatalogEngine, CategoryAdd, ProductForm, RefreshReport, RemoveOutcome, SaveOutcome};
use crate::upload::ImageFile;
use shared::{CatalogResult, CategorySet, Page, Product};
use std::sync::Arc;

/// Products per admin list page
pub const PAGE_SIZE: u32 = 5;

pub const DELETE_PROMPT: &str = "¿Eliminar producto?";

/// Yes/no gate in front of destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminMode {
    Create,
    Edit(String),
}

/// One page of the filtered admin list
#[derive(Debug, Clone, PartialEq)]
pub struct AdminPage {
    pub page: Page<Product>,
    /// Controls only appear once the filtered list outgrows one page
    pub show_pagination: bool,
}

pub struct AdminView {
    engine: Arc<CatalogEngine>,
    form: ProductForm,
    image_file: Option<ImageFile>,
    editing_id: Option<String>,
    search: String,
    filter_category: String,
    page: u32,
    new_category: String,
}

impl AdminView {
    /// Enter the admin boundary; the session is checked here only
    pub fn open(engine: Arc<CatalogEngine>, session: &dyn AdminSession) -> Result<Self, AuthError> {
        if !session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(Self {
            engine,
            form: ProductForm::default(),
            image_file: None,
            editing_id: None,
            search: String::new(),
            filter_category: String::new(),
            page: 1,
            new_category: String::new(),
        })
    }

    pub async fn load(&self) -> CatalogResult<RefreshReport> {
        self.engine.refresh().await
    }

    // =========================================================================
    // Form
    // =========================================================================

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn set_form(&mut self, form: ProductForm) {
        self.form = form;
    }

    pub fn set_image_file(&mut self, file: Option<ImageFile>) {
        self.image_file = file;
    }

    pub fn image_file(&self) -> Option<&ImageFile> {
        self.image_file.as_ref()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn mode(&self) -> AdminMode {
        match &self.editing_id {
            Some(id) => AdminMode::Edit(id.clone()),
            None => AdminMode::Create,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.editing_id {
            Some(_) => "Guardar cambios",
            None => "Agregar producto",
        }
    }

    /// Load a product into the form by id; false when it is not in the list
    pub fn edit(&mut self, id: &str) -> bool {
        match self.engine.product(id) {
            Some(product) => {
                self.start_edit(&product);
                true
            }
            None => false,
        }
    }

    pub fn start_edit(&mut self, product: &Product) {
        self.form = ProductForm::from_product(product);
        self.editing_id = Some(product.id.clone());
    }

    /// Back to create mode with empty defaults
    pub fn cancel_edit(&mut self) {
        self.form = ProductForm::default();
        self.image_file = None;
        self.editing_id = None;
    }

    pub fn is_saving(&self) -> bool {
        self.engine.is_saving()
    }

    /// Create or update from the form. On success the form resets and the
    /// list goes back to page 1; on failure everything is kept for a retry.
    pub async fn submit(&mut self) -> CatalogResult<SaveOutcome> {
        let engine = Arc::clone(&self.engine);
        let outcome = engine
            .create_or_update(
                &self.form,
                self.image_file.as_ref(),
                self.editing_id.as_deref(),
            )
            .await?;

        self.cancel_edit();
        self.page = 1;
        Ok(outcome)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Ask first, then delete. `Ok(None)` when the user declined.
    pub async fn delete(
        &mut self,
        id: &str,
        confirm: &dyn Confirm,
    ) -> CatalogResult<Option<RemoveOutcome>> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(None);
        }

        let outcome = self.engine.remove(id).await?;
        if self.editing_id.as_deref() == Some(id) {
            self.cancel_edit();
        }
        self.page = 1;
        Ok(Some(outcome))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub fn set_new_category(&mut self, name: impl Into<String>) {
        self.new_category = name.into();
    }

    pub fn new_category(&self) -> &str {
        &self.new_category
    }

    /// Add the typed category; the input clears on any success, including
    /// the blank no-op
    pub async fn add_category(&mut self) -> CatalogResult<CategoryAdd> {
        let added = self.engine.add_category(&self.new_category).await?;
        self.new_category.clear();
        Ok(added)
    }

    pub fn categories(&self) -> CategorySet {
        self.engine.categories()
    }

    // =========================================================================
    // List
    // =========================================================================

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Exact category filter; empty shows all
    pub fn set_filter_category(&mut self, category: impl Into<String>) {
        self.filter_category = category.into();
        self.page = 1;
    }

    pub fn filter_category(&self) -> &str {
        &self.filter_category
    }

    pub fn filtered(&self) -> Vec<Product> {
        filter_by_name_and_category(
            &self.engine.snapshot().products,
            &self.search,
            &self.filter_category,
        )
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_view(&self) -> AdminPage {
        let filtered = self.filtered();
        AdminPage {
            show_pagination: filtered.len() > PAGE_SIZE as usize,
            page: Page::slice(&filtered, self.page, PAGE_SIZE),
        }
    }

    /// Advance unless this page already reaches the end
    pub fn next_page(&mut self) -> bool {
        if self.page_view().page.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }
}
