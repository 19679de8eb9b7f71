//! In-memory persistence backend.
//!
//! [`MemoryStore`] implements both engine service traits over a plain
//! vector, assigns sequential identifiers on create, and exposes named
//! search capabilities registered as predicates. It records every service
//! call and supports one-shot failure injection, which the integration
//! tests lean on to exercise the engines' failure paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use backoffice_engine::{
    CrudFormService, CrudListService, RelatedLoader, SearchOutcome, ServiceError, ServiceResult,
};
use backoffice_fields::{Entity, EntityId, FieldValue};

/// Predicate backing one named search capability.
pub type SearchPredicate<T> = fn(&T, &FieldValue) -> bool;

pub struct MemoryStore<T: Entity> {
    items: Mutex<Vec<T>>,
    next_id: AtomicI64,
    searches: Vec<(&'static str, SearchPredicate<T>)>,
    capabilities: Vec<&'static str>,
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<Option<String>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            searches: Vec::new(),
            capabilities: Vec::new(),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Register a named search capability.
    pub fn with_search(mut self, capability: &'static str, predicate: SearchPredicate<T>) -> Self {
        self.searches.push((capability, predicate));
        self.capabilities.push(capability);
        self
    }

    /// Seed the store; items without an id get one assigned.
    pub async fn seed(&self, items: Vec<T>) -> ServiceResult<()> {
        let mut stored = self.items.lock().await;
        for item in items {
            let item = match item.id() {
                Some(id) => {
                    // Keep the counter ahead of explicit ids.
                    self.next_id.fetch_max(id + 1, Ordering::SeqCst);
                    item
                }
                None => self.assign_id(&item)?,
            };
            stored.push(item);
        }
        Ok(())
    }

    /// Make the next service call fail with the given message.
    pub async fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().await = Some(message.into());
    }

    /// Every service call so far, e.g. `["list_all", "delete:7"]`.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: impl Into<String>) {
        self.calls.lock().await.push(call.into());
    }

    async fn take_failure(&self) -> Option<ServiceError> {
        self.fail_next.lock().await.take().map(ServiceError::new)
    }

    fn assign_id(&self, entity: &T) -> ServiceResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut value =
            serde_json::to_value(entity).map_err(|err| ServiceError::new(err.to_string()))?;
        if let Some(object) = value.as_object_mut() {
            object.insert("id".into(), json!(id));
        }
        serde_json::from_value(value).map_err(|err| ServiceError::new(err.to_string()))
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> CrudFormService<T> for MemoryStore<T> {
    async fn fetch_by_id(&self, id: EntityId) -> ServiceResult<T> {
        self.record(format!("fetch_by_id:{id}")).await;
        if let Some(err) = self.take_failure().await {
            return Err(err);
        }
        self.items
            .lock()
            .await
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
            .ok_or_else(|| ServiceError::new(format!("record {id} not found")))
    }

    async fn create(&self, entity: T) -> ServiceResult<T> {
        self.record("create").await;
        if let Some(err) = self.take_failure().await {
            return Err(err);
        }
        let entity = self.assign_id(&entity)?;
        debug!(id = ?entity.id(), "record created");
        self.items.lock().await.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: EntityId, entity: T) -> ServiceResult<T> {
        self.record(format!("update:{id}")).await;
        if let Some(err) = self.take_failure().await {
            return Err(err);
        }
        let mut items = self.items.lock().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == Some(id))
            .ok_or_else(|| ServiceError::new(format!("record {id} not found")))?;
        let mut value =
            serde_json::to_value(&entity).map_err(|err| ServiceError::new(err.to_string()))?;
        if let Some(object) = value.as_object_mut() {
            object.insert("id".into(), json!(id));
        }
        let entity: T =
            serde_json::from_value(value).map_err(|err| ServiceError::new(err.to_string()))?;
        *slot = entity.clone();
        Ok(entity)
    }
}

#[async_trait]
impl<T: Entity> CrudListService<T> for MemoryStore<T> {
    async fn list_all(&self) -> ServiceResult<Vec<T>> {
        self.record("list_all").await;
        if let Some(err) = self.take_failure().await {
            return Err(err);
        }
        Ok(self.items.lock().await.clone())
    }

    async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        self.record(format!("delete:{id}")).await;
        if let Some(err) = self.take_failure().await {
            return Err(err);
        }
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|item| item.id() != Some(id));
        if items.len() == before {
            return Err(ServiceError::new(format!("record {id} not found")));
        }
        Ok(())
    }

    fn search_capabilities(&self) -> &[&str] {
        &self.capabilities
    }

    async fn search(&self, capability: &str, value: &FieldValue) -> ServiceResult<SearchOutcome<T>> {
        self.record(format!("search:{capability}")).await;
        if let Some(err) = self.take_failure().await {
            return Err(err);
        }
        let predicate = self
            .searches
            .iter()
            .find(|(name, _)| *name == capability)
            .map(|(_, predicate)| *predicate)
            .ok_or_else(|| {
                ServiceError::new(format!("search capability '{capability}' is not implemented"))
            })?;
        let hits = self
            .items
            .lock()
            .await
            .iter()
            .filter(|item| predicate(item, value))
            .cloned()
            .collect();
        Ok(SearchOutcome::Many(hits))
    }
}

/// Serves a store's whole collection as related reference data.
pub struct StoreLoader<T: Entity> {
    store: Arc<MemoryStore<T>>,
}

impl<T: Entity> StoreLoader<T> {
    pub fn new(store: Arc<MemoryStore<T>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<T: Entity> RelatedLoader for StoreLoader<T> {
    async fn load(&self) -> ServiceResult<Vec<FieldValue>> {
        let items = self.store.list_all().await?;
        items
            .iter()
            .map(|item| {
                serde_json::to_value(item).map_err(|err| ServiceError::new(err.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn category(name: &str) -> Category {
        Category {
            id: None,
            name: name.into(),
            description: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryStore::<Category>::new();
        let first = store.create(category("Basic")).await.unwrap();
        let second = store.create(category("Premium")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn seed_keeps_counter_ahead_of_explicit_ids() {
        let store = MemoryStore::<Category>::new();
        let mut seeded = category("Basic");
        seeded.id = Some(10);
        store.seed(vec![seeded]).await.unwrap();
        let created = store.create(category("Premium")).await.unwrap();
        assert_eq!(created.id, Some(11));
    }

    #[tokio::test]
    async fn update_preserves_the_path_id() {
        let store = MemoryStore::<Category>::new();
        let created = store.create(category("Basic")).await.unwrap();
        let mut changed = created.clone();
        changed.id = None;
        changed.name = "Basic v2".into();
        let updated = store.update(created.id.unwrap(), changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Basic v2");
    }

    #[tokio::test]
    async fn delete_missing_record_is_an_error() {
        let store = MemoryStore::<Category>::new();
        let err = CrudListService::delete(&store, 99).await.unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[tokio::test]
    async fn fail_next_poisons_exactly_one_call() {
        let store = MemoryStore::<Category>::new();
        store.create(category("Basic")).await.unwrap();
        store.fail_next("backend offline").await;
        assert!(store.list_all().await.is_err());
        assert!(store.list_all().await.is_ok());
    }

    #[tokio::test]
    async fn search_runs_registered_predicate() {
        let store = MemoryStore::<Category>::new().with_search("search-by-name", |c, v| {
            v.as_str()
                .is_some_and(|needle| c.name.to_lowercase().contains(&needle.to_lowercase()))
        });
        store.create(category("Basic")).await.unwrap();
        store.create(category("Premium")).await.unwrap();

        let outcome = store
            .search("search-by-name", &json!("prem"))
            .await
            .unwrap();
        assert_eq!(outcome.into_vec().len(), 1);
        assert_eq!(store.search_capabilities(), ["search-by-name"]);
    }

    #[tokio::test]
    async fn loader_serializes_the_collection() {
        let store = Arc::new(MemoryStore::<Category>::new());
        store.create(category("Basic")).await.unwrap();
        let loader = StoreLoader::new(store);
        let items = loader.load().await.unwrap();
        assert_eq!(items[0]["name"], json!("Basic"));
    }
}
