#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Notify, Semaphore};
use vitrina_core::store::Fields;
use vitrina_core::{
    AssetUploader, CatalogEngine, CatalogRepository, ImageFile, MemoryStore, ProductForm, Record,
    RemoteStore, StoreResult, TenantConfig, UploadError, UploadProfile,
};

pub const PRODUCTS: &str = "productos_bebidas";
pub const CONFIG: &str = "config_bebidas";
pub const CONFIG_DOC: &str = "global";

pub const UPLOADED_URL: &str = "https://res.cloudinary.com/demo/image/upload/v1/tienda_bebidas/nueva.jpg";

/// Uploader returning a scripted result and counting calls
pub struct FakeUploader {
    result: Mutex<Result<String, UploadError>>,
    calls: AtomicUsize,
}

impl FakeUploader {
    pub fn ok(url: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(Ok(url.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(Err(UploadError::Rejected("preset not found".into()))),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetUploader for FakeUploader {
    async fn upload(&self, _file: &ImageFile, profile: &UploadProfile) -> Result<String, UploadError> {
        assert_eq!(profile.folder, "tienda_bebidas");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.lock().clone()
    }
}

/// MemoryStore whose `list` can be held open to interleave calls with a refresh
pub struct GatedStore {
    inner: Arc<MemoryStore>,
    armed: AtomicBool,
    entered: Notify,
    gate: Semaphore,
}

impl GatedStore {
    pub fn new(inner: Arc<MemoryStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            armed: AtomicBool::new(false),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        })
    }

    /// Hold the next `list` until [`release`](Self::release)
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once a held `list` is waiting
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl RemoteStore for GatedStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Record>> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            let _permit = self.gate.acquire().await;
        }
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str) -> StoreResult<Option<Record>> {
        self.inner.get(collection).await
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        self.inner.create(collection, fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.inner.delete(collection, id).await
    }

    async fn append_to_set(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()> {
        self.inner.append_to_set(collection, id, field, value).await
    }
}

pub fn fields(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap()
}

pub fn seed_product(store: &MemoryStore, id: &str, name: &str, price: i64, category: &str) {
    store.seed(
        PRODUCTS,
        id,
        fields(json!({
            "name": name,
            "description": format!("{name} description"),
            "price": price,
            "image": format!("https://res.cloudinary.com/demo/image/upload/v1/{id}.jpg"),
            "category": category,
        })),
    );
}

pub fn seed_categories(store: &MemoryStore, names: &[&str]) {
    store.seed(CONFIG, CONFIG_DOC, fields(json!({ "categories": names })));
}

/// Cola (Gaseosas, 10) and Agua (Aguas, 5)
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    seed_product(&store, "cola", "Cola", 10, "Gaseosas");
    seed_product(&store, "agua", "Agua", 5, "Aguas");
    seed_categories(&store, &["Gaseosas", "Aguas"]);
    store
}

pub fn engine_with(store: Arc<dyn RemoteStore>, uploader: Arc<FakeUploader>) -> Arc<CatalogEngine> {
    let tenant = TenantConfig::default();
    let repo = CatalogRepository::for_tenant(store, &tenant);
    Arc::new(CatalogEngine::new(repo).with_uploader(
        uploader,
        UploadProfile::new(tenant.upload_preset, tenant.upload_folder),
    ))
}

pub fn engine(store: Arc<dyn RemoteStore>) -> Arc<CatalogEngine> {
    engine_with(store, FakeUploader::ok(UPLOADED_URL))
}

pub fn valid_form() -> ProductForm {
    ProductForm {
        name: "Fanta".into(),
        description: "Lata 354ml".into(),
        price: Some(Decimal::new(8, 0)),
        image: "https://res.cloudinary.com/demo/image/upload/v1/fanta.jpg".into(),
        category: "Gaseosas".into(),
    }
}

pub fn image_file() -> ImageFile {
    ImageFile::new("nueva.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}
