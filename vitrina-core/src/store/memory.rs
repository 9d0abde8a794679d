//! In-memory RemoteStore
//!
//! Used for tests, demos and offline seeding. Supports failure injection
//! and per-operation call counters.

use super::{Fields, Record, RemoteStore, StoreError, StoreResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

/// Number of calls per store operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub append_to_set: usize,
}

impl StoreCalls {
    /// create + update + delete + append_to_set
    pub fn writes(&self) -> usize {
        self.create + self.update + self.delete + self.append_to_set
    }
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<Record>>,
    next_id: u64,
    offline: bool,
    fail_next_write: bool,
    offline_after_write: bool,
    calls: StoreCalls,
}

impl Inner {
    fn check_read(&self) -> StoreResult<()> {
        if self.offline {
            return Err(StoreError::Unavailable("store is offline".into()));
        }
        Ok(())
    }

    fn check_write(&mut self) -> StoreResult<()> {
        self.check_read()?;
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        if self.offline_after_write {
            self.offline_after_write = false;
            self.offline = true;
        }
        Ok(())
    }
}

/// Thread-safe in-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document with a fixed key (bypasses counters and failure injection)
    pub fn seed(&self, collection: &str, id: &str, fields: Fields) {
        let mut inner = self.inner.lock();
        let docs = inner.collections.entry(collection.to_string()).or_default();
        docs.retain(|r| r.id != id);
        docs.push(Record::new(id, fields));
    }

    /// Make every subsequent call fail with `Unavailable`
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }

    /// Fail only the next write call
    pub fn fail_next_write(&self) {
        self.inner.lock().fail_next_write = true;
    }

    /// Let the next write land, then fail every call after it
    pub fn go_offline_after_next_write(&self) {
        self.inner.lock().offline_after_write = true;
    }

    pub fn calls(&self) -> StoreCalls {
        self.inner.lock().calls
    }

    /// Current documents of a collection (for assertions)
    pub fn documents(&self, collection: &str) -> Vec<Record> {
        self.inner
            .lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Record>> {
        let mut inner = self.inner.lock();
        inner.calls.list += 1;
        inner.check_read()?;
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str) -> StoreResult<Option<Record>> {
        let mut inner = self.inner.lock();
        inner.calls.get += 1;
        inner.check_read()?;
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.first().cloned()))
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let mut inner = self.inner.lock();
        inner.calls.create += 1;
        inner.check_write()?;
        inner.next_id += 1;
        let id = format!("mem-{}", inner.next_id);
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Record::new(id.clone(), fields));
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.update += 1;
        inner.check_write()?;
        let record = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        for (key, value) in fields {
            record.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.delete += 1;
        inner.check_write()?;
        let docs = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let before = docs.len();
        docs.retain(|r| r.id != id);
        if docs.len() == before {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }

    async fn append_to_set(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.append_to_set += 1;
        inner.check_write()?;
        let docs = inner.collections.entry(collection.to_string()).or_default();
        if !docs.iter().any(|r| r.id == id) {
            docs.push(Record::new(id, Fields::new()));
        }
        let Some(record) = docs.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::not_found(collection, id));
        };

        let entry = record
            .fields
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => {
                if !items.contains(&value) {
                    items.push(value);
                }
                Ok(())
            }
            _ => Err(StoreError::Malformed(format!(
                "{collection}/{id}.{field} is not an array"
            ))),
        }
    }
}
