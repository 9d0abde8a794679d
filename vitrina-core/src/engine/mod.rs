//! Catalog State Engine
//!
//! Sole owner of the in-session product list and category set. Reads are
//! served from an immutable snapshot that is swapped wholesale, so a reader
//! never sees products from one fetch paired with categories from another.
//! Mutations write through the repository first, then re-fetch.

mod form;

pub use form::ProductForm;

use crate::repository::CatalogRepository;
use crate::upload::{AssetUploader, ImageFile, UploadError, UploadProfile};
use crate::utils::validation::{MAX_NAME_LEN, validate_max_chars};
use parking_lot::RwLock;
use shared::{CatalogError, CatalogResult, CategorySet, Product, ProductPatch};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

// =============================================================================
// Types
// =============================================================================

/// Authoritative catalog state at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: CategorySet,
    /// Locally appended categories not yet confirmed by a refresh
    pending_categories: Vec<String>,
}

impl CatalogSnapshot {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn pending_categories(&self) -> &[String] {
        &self.pending_categories
    }
}

/// What a refresh loaded and how pending category appends settled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub products: usize,
    pub categories: usize,
    /// Local appends the store confirmed
    pub reconciled: Vec<String>,
    /// Local appends the store does not have; dropped from the local set
    pub rolled_back: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
    /// The edited product no longer exists; treated as a no-op
    TargetMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: String,
    pub kind: SaveKind,
    /// False when the write landed but the follow-up refresh failed
    pub refreshed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub id: String,
    /// False when the product was already gone
    pub existed: bool,
    pub refreshed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryAdd {
    /// Blank after trimming; nothing written
    Ignored,
    Added(String),
    /// Written through, but the local set already had it
    AlreadyPresent(String),
}

/// Marks a save as in flight for the lifetime of the guard
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// CatalogEngine
// =============================================================================

pub struct CatalogEngine {
    repo: CatalogRepository,
    uploader: Option<Arc<dyn AssetUploader>>,
    upload_profile: UploadProfile,
    state: RwLock<Arc<CatalogSnapshot>>,
    /// Bumped on every state replacement
    revision: watch::Sender<u64>,
    saving: AtomicBool,
}

impl std::fmt::Debug for CatalogEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CatalogEngine")
            .field("products_count", &state.products.len())
            .field("categories_count", &state.categories.len())
            .field("revision", &*self.revision.borrow())
            .finish()
    }
}

impl CatalogEngine {
    /// Engine with empty state; call [`refresh`](Self::refresh) at session start
    pub fn new(repo: CatalogRepository) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            repo,
            uploader: None,
            upload_profile: UploadProfile::new("", ""),
            state: RwLock::new(Arc::new(CatalogSnapshot::default())),
            revision,
            saving: AtomicBool::new(false),
        }
    }

    pub fn with_uploader(mut self, uploader: Arc<dyn AssetUploader>, profile: UploadProfile) -> Self {
        self.uploader = Some(uploader);
        self.upload_profile = profile;
        self
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Current state as one consistent pair
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.state.read().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    pub fn categories(&self) -> CategorySet {
        self.state.read().categories.clone()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.state.read().product(id).cloned()
    }

    /// True while a create/update is running
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Change notifications: the revision ticks on every state replacement
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|r| *r += 1);
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Re-fetch products and categories and replace both at once.
    ///
    /// On failure the previous state is kept untouched.
    pub async fn refresh(&self) -> CatalogResult<RefreshReport> {
        let pending_at_start = self.state.read().pending_categories.clone();

        let (products, mut categories) =
            tokio::try_join!(self.repo.list_products(), self.repo.list_categories())
                .inspect_err(|e| {
                    tracing::warn!(error = %e, "Catalog refresh failed, keeping previous state");
                })?;

        let report = {
            let mut state = self.state.write();

            let (reconciled, rolled_back): (Vec<String>, Vec<String>) = pending_at_start
                .iter()
                .cloned()
                .partition(|name| categories.contains(name));

            // Appends that landed while the fetch was in flight stay pending
            let still_pending: Vec<String> = state
                .pending_categories
                .iter()
                .filter(|name| !pending_at_start.contains(name))
                .cloned()
                .collect();
            for name in &still_pending {
                categories.push(name.as_str());
            }

            let report = RefreshReport {
                products: products.len(),
                categories: categories.len(),
                reconciled,
                rolled_back,
            };

            *state = Arc::new(CatalogSnapshot {
                products,
                categories,
                pending_categories: still_pending,
            });
            report
        };
        self.bump_revision();

        for name in &report.rolled_back {
            tracing::warn!(category = %name, "Category append not found in store, rolled back");
        }
        tracing::info!(
            "📦 Catalog refreshed: {} products, {} categories",
            report.products,
            report.categories
        );

        Ok(report)
    }

    /// Refresh after a successful write; failure only leaves the state stale
    async fn refresh_after_write(&self, operation: &str) -> bool {
        match self.refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    operation = %operation,
                    error = %e,
                    "Write succeeded but refresh failed, state is stale until the next refresh"
                );
                false
            }
        }
    }

    // =========================================================================
    // Product - Write (store first, then refresh)
    // =========================================================================

    /// Validate, upload a pending image if any, then create (no `editing_id`)
    /// or update (with `editing_id`) and refresh.
    ///
    /// At most one store write per call. Validation and upload failures
    /// happen before any write.
    pub async fn create_or_update(
        &self,
        form: &ProductForm,
        image_file: Option<&ImageFile>,
        editing_id: Option<&str>,
    ) -> CatalogResult<SaveOutcome> {
        let snapshot = self.snapshot();
        let mut fields = form.validate(&snapshot.categories, image_file.is_some())?;

        let _in_flight = InFlight::enter(&self.saving);

        if let Some(file) = image_file {
            fields.image = self.upload_image(file).await?;
        }

        let (id, kind) = match editing_id {
            Some(id) => match self.repo.update_product(id, &ProductPatch::from(fields)).await {
                Ok(()) => (id.to_string(), SaveKind::Updated),
                Err(CatalogError::NotFound(_)) => {
                    tracing::warn!(id = %id, "Edited product no longer exists, nothing updated");
                    (id.to_string(), SaveKind::TargetMissing)
                }
                Err(e) => return Err(e),
            },
            None => (self.repo.create_product(&fields).await?, SaveKind::Created),
        };

        let refreshed = self.refresh_after_write("save").await;
        Ok(SaveOutcome {
            id,
            kind,
            refreshed,
        })
    }

    async fn upload_image(&self, file: &ImageFile) -> CatalogResult<String> {
        let uploader = self.uploader.as_ref().ok_or(UploadError::NotConfigured)?;
        if file.is_empty() {
            return Err(UploadError::EmptyFile.into());
        }

        let url = uploader
            .upload(file, &self.upload_profile)
            .await
            .inspect_err(|e| {
                tracing::warn!(file = %file.file_name, error = %e, "Image upload failed");
            })?;
        if url.trim().is_empty() {
            return Err(UploadError::MissingUrl.into());
        }

        tracing::info!(file = %file.file_name, size = file.len(), "Image uploaded");
        Ok(url)
    }

    /// Delete a product and refresh. Confirmation is the caller's job.
    ///
    /// A product that is already gone resolves as a no-op success.
    pub async fn remove(&self, id: &str) -> CatalogResult<RemoveOutcome> {
        let existed = match self.repo.delete_product(id).await {
            Ok(()) => true,
            Err(CatalogError::NotFound(_)) => {
                tracing::debug!(id = %id, "Product already gone, delete is a no-op");
                false
            }
            Err(e) => return Err(e),
        };

        let refreshed = self.refresh_after_write("remove").await;
        Ok(RemoveOutcome {
            id: id.to_string(),
            existed,
            refreshed,
        })
    }

    // =========================================================================
    // Category
    // =========================================================================

    /// Trim, write through, then append locally without a full refresh.
    ///
    /// Names longer than the product form accepts fail validation unwritten.
    ///
    /// The local append stays pending until the next refresh confirms it.
    pub async fn add_category(&self, name: &str) -> CatalogResult<CategoryAdd> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(CategoryAdd::Ignored);
        }
        // Same cap the product form applies, so every added category is usable
        validate_max_chars(name, "category", MAX_NAME_LEN)?;

        self.repo.add_category(name).await?;

        let added = {
            let mut state = self.state.write();
            if state.categories.contains(name) {
                false
            } else {
                let mut next = (**state).clone();
                next.categories.push(name);
                next.pending_categories.push(name.to_string());
                *state = Arc::new(next);
                true
            }
        };

        if added {
            self.bump_revision();
            tracing::info!(category = %name, "Category added");
            Ok(CategoryAdd::Added(name.to_string()))
        } else {
            Ok(CategoryAdd::AlreadyPresent(name.to_string()))
        }
    }
}
