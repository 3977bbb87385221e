use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Request, Response, StoredResponse};

use super::{CacheStore, StoreError};

/// In-process cache store backed by a map of maps.
#[derive(Default)]
pub struct MemoryStore {
    buckets: RwLock<HashMap<String, HashMap<String, StoredResponse>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn open(&self, bucket: &str) -> Result<(), StoreError> {
        self.buckets
            .write()
            .await
            .entry(bucket.to_string())
            .or_default();
        Ok(())
    }

    async fn get(
        &self,
        bucket: &str,
        request: &Request,
    ) -> Result<Option<StoredResponse>, StoreError> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(bucket)
            .and_then(|entries| entries.get(&request.cache_key()))
            .cloned())
    }

    async fn put(
        &self,
        bucket: &str,
        request: &Request,
        response: Response,
    ) -> Result<(), StoreError> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(request.cache_key(), StoredResponse::new(response));
        Ok(())
    }

    async fn put_batch(
        &self,
        bucket: &str,
        entries: Vec<(Request, Response)>,
    ) -> Result<(), StoreError> {
        // One write lock for the whole batch makes it all-or-nothing.
        let mut buckets = self.buckets.write().await;
        let slot = buckets.entry(bucket.to_string()).or_default();
        for (request, response) in entries {
            slot.insert(request.cache_key(), StoredResponse::new(response));
        }
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool, StoreError> {
        Ok(self.buckets.write().await.remove(bucket).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::new();
        let req = Request::sub_resource("./app.js");
        store.put("v1", &req, Response::ok(b"js".to_vec())).await.unwrap();

        let entry = store.get("v1", &req).await.unwrap().unwrap();
        assert_eq!(entry.body, b"js");
    }

    #[tokio::test]
    async fn test_get_missing_bucket_is_a_miss() {
        let store = MemoryStore::new();
        let req = Request::sub_resource("./app.js");
        assert!(store.get("nope", &req).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let store = MemoryStore::new();
        let req = Request::navigation("./");
        store.put("v1", &req, Response::ok(b"old".to_vec())).await.unwrap();
        store.put("v1", &req, Response::ok(b"new".to_vec())).await.unwrap();

        let entry = store.get("v1", &req).await.unwrap().unwrap();
        assert_eq!(entry.body, b"new");
    }

    #[tokio::test]
    async fn test_delete_bucket_reports_existence() {
        let store = MemoryStore::new();
        store.open("v1").await.unwrap();
        assert!(store.delete_bucket("v1").await.unwrap());
        assert!(!store.delete_bucket("v1").await.unwrap());
        assert!(store.list_buckets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_batch_lands_every_entry() {
        let store = MemoryStore::new();
        let entries = vec![
            (Request::sub_resource("./a"), Response::ok(b"a".to_vec())),
            (Request::sub_resource("./b"), Response::ok(b"b".to_vec())),
        ];
        store.put_batch("v1", entries).await.unwrap();

        for url in ["./a", "./b"] {
            let req = Request::sub_resource(url);
            assert!(store.get("v1", &req).await.unwrap().is_some(), "{url}");
        }
    }
}
