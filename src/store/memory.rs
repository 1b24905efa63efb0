//! In-process [`DocumentStore`] backed by `watch` channels.

use super::{Direction, Document, DocumentPath, DocumentStore, DocumentWatch, Query, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;

type Collections = HashMap<String, BTreeMap<String, watch::Sender<Option<Document>>>>;

/// Document store living in memory.
///
/// Every document slot is a `watch` channel, so all subscribers of a document (several
/// sessions of the same user, say) see every overwrite. Slots are created on first
/// write or first watch and never removed.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<Collections>,
    writes: AtomicU64,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_document` calls so far.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// While offline every operation fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }

    fn collections(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn set_document(&self, path: &DocumentPath, data: Value) -> Result<(), StoreError> {
        path.validate()?;
        self.check_online()?;

        let document = Document {
            id: path.id.clone(),
            data,
        };
        let mut collections = self.collections();
        let slot = collections
            .entry(path.collection.clone())
            .or_default()
            .entry(path.id.clone())
            .or_insert_with(|| watch::channel(None).0);
        slot.send_replace(Some(document));
        self.writes.fetch_add(1, Ordering::SeqCst);
        debug!(%path, subscribers = slot.receiver_count(), "Document written");
        Ok(())
    }

    async fn get_document(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        path.validate()?;
        self.check_online()?;

        let collections = self.collections();
        Ok(collections
            .get(&path.collection)
            .and_then(|documents| documents.get(&path.id))
            .and_then(|slot| slot.borrow().clone()))
    }

    async fn watch_document(&self, path: &DocumentPath) -> Result<DocumentWatch, StoreError> {
        path.validate()?;
        self.check_online()?;

        let mut collections = self.collections();
        let slot = collections
            .entry(path.collection.clone())
            .or_default()
            .entry(path.id.clone())
            .or_insert_with(|| watch::channel(None).0);
        debug!(%path, "Document watched");
        Ok(slot.subscribe())
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.check_online()?;

        let collections = self.collections();
        let mut documents: Vec<Document> = collections
            .get(&query.collection)
            .map(|documents| {
                documents
                    .values()
                    .filter_map(|slot| slot.borrow().clone())
                    .filter(|document| {
                        query
                            .filters
                            .iter()
                            .all(|(field, value)| document.data.get(field) == Some(value))
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            documents.sort_by(|a, b| {
                let ordering = compare_fields(a.data.get(field), b.data.get(field));
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        Ok(documents)
    }
}

// Documents missing the field sort before every present value.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> CmpOrdering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(CmpOrdering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None, Some(_)) => CmpOrdering::Less,
        (Some(_), None) => CmpOrdering::Greater,
        _ => CmpOrdering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryDocumentStore::new();
        let path = DocumentPath::new("carts", "uid_1");

        assert!(store.get_document(&path).await.unwrap().is_none());
        store.set_document(&path, json!({ "items": [] })).await.unwrap();

        let document = store.get_document(&path).await.unwrap().unwrap();
        assert_eq!(document.id, "uid_1");
        assert_eq!(document.data, json!({ "items": [] }));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_watch_sees_overwrites() {
        let store = MemoryDocumentStore::new();
        let path = DocumentPath::new("wishlists", "uid_1");

        let mut watch = store.watch_document(&path).await.unwrap();
        assert!(watch.borrow().is_none());

        store.set_document(&path, json!({ "items": [1] })).await.unwrap();
        watch.changed().await.unwrap();
        assert_eq!(watch.borrow_and_update().as_ref().unwrap().data, json!({ "items": [1] }));

        store.set_document(&path, json!({ "items": [2] })).await.unwrap();
        watch.changed().await.unwrap();
        assert_eq!(watch.borrow_and_update().as_ref().unwrap().data, json!({ "items": [2] }));
    }

    #[tokio::test]
    async fn test_query_filters_and_orders() {
        let store = MemoryDocumentStore::new();
        for (id, user, created) in [
            ("o1", "alice", "2024-01-01T00:00:00Z"),
            ("o2", "bob", "2024-02-01T00:00:00Z"),
            ("o3", "alice", "2024-03-01T00:00:00Z"),
        ] {
            store
                .set_document(
                    &DocumentPath::new("orders", id),
                    json!({ "userId": user, "createdAt": created }),
                )
                .await
                .unwrap();
        }

        let query = Query::collection("orders")
            .where_eq("userId", "alice")
            .order_by("createdAt", Direction::Descending);
        let ids: Vec<String> = store
            .query(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["o3", "o1"]);
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);

        let result = store
            .set_document(&DocumentPath::new("carts", "uid_1"), json!({}))
            .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_path_is_rejected() {
        let store = MemoryDocumentStore::new();
        let result = store.get_document(&DocumentPath::new("carts", "")).await;
        assert!(matches!(result, Err(StoreError::InvalidPath(_))));
    }
}
