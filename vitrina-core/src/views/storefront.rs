//! Storefront View Model
//!
//! Read-only projection over the engine: a flat result grid while a search
//! term is set, otherwise one collapsible panel per category with at most
//! one panel open.

use super::projection::{filter_by_name, group_by_category};
use crate::checkout::CheckoutLinkComposer;
use crate::engine::{CatalogEngine, RefreshReport};
use crate::image_url::optimized_image_url;
use shared::{CatalogResult, CategoryGroup, Product};
use std::sync::Arc;

/// A product as shown to shoppers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    /// e.g. `$10`
    pub price: String,
    pub image_url: String,
    pub checkout_url: String,
}

impl ProductCard {
    pub fn new(product: &Product, checkout: &CheckoutLinkComposer) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.display_price(),
            image_url: optimized_image_url(&product.image),
            checkout_url: checkout.link(product),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Collapsed,
    Items(Vec<ProductCard>),
    /// Expanded, but nothing in this category
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPanel {
    pub category: String,
    pub expanded: bool,
    pub content: PanelContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontRender {
    /// First load has not settled yet
    Loading,
    SearchResults(Vec<ProductCard>),
    /// Search term set, nothing matched
    NoResults,
    Groups(Vec<GroupPanel>),
}

pub struct StorefrontView {
    engine: Arc<CatalogEngine>,
    checkout: CheckoutLinkComposer,
    priority_category: Option<String>,
    search: String,
    active_category: Option<String>,
    loading: bool,
}

impl StorefrontView {
    pub fn new(engine: Arc<CatalogEngine>, checkout: CheckoutLinkComposer) -> Self {
        Self {
            engine,
            checkout,
            priority_category: None,
            search: String::new(),
            active_category: None,
            loading: true,
        }
    }

    /// Group this category ahead of all others (matched ignoring case)
    pub fn with_priority_category(mut self, category: Option<String>) -> Self {
        self.priority_category = category;
        self
    }

    /// Initial load. A failure is logged and the catalog renders empty.
    pub async fn load(&mut self) -> CatalogResult<RefreshReport> {
        let result = self.engine.refresh().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to load products");
        }
        self.loading = false;
        result
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Open `category`, or close it if it is the open one
    pub fn toggle_category(&mut self, category: &str) {
        if self.active_category.as_deref() == Some(category) {
            self.active_category = None;
        } else {
            self.active_category = Some(category.to_string());
        }
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn filtered(&self) -> Vec<Product> {
        filter_by_name(&self.engine.snapshot().products, &self.search)
    }

    /// Category groups over the current search; categories come from the
    /// products themselves, not from the stored category set
    pub fn groups(&self) -> Vec<CategoryGroup> {
        let snapshot = self.engine.snapshot();
        let filtered = filter_by_name(&snapshot.products, &self.search);
        group_by_category(
            &snapshot.products,
            &filtered,
            self.priority_category.as_deref(),
        )
    }

    pub fn render(&self) -> StorefrontRender {
        if self.loading {
            return StorefrontRender::Loading;
        }

        if !self.search.is_empty() {
            let cards: Vec<ProductCard> = self.filtered().iter().map(|p| self.card(p)).collect();
            return if cards.is_empty() {
                StorefrontRender::NoResults
            } else {
                StorefrontRender::SearchResults(cards)
            };
        }

        let panels = self
            .groups()
            .into_iter()
            .map(|group| {
                let expanded = self.active_category.as_deref() == Some(group.category.as_str());
                let content = if !expanded {
                    PanelContent::Collapsed
                } else if group.items.is_empty() {
                    PanelContent::Empty
                } else {
                    PanelContent::Items(group.items.iter().map(|p| self.card(p)).collect())
                };
                GroupPanel {
                    category: group.category,
                    expanded,
                    content,
                }
            })
            .collect();
        StorefrontRender::Groups(panels)
    }

    fn card(&self, product: &Product) -> ProductCard {
        ProductCard::new(product, &self.checkout)
    }
}
