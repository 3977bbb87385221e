use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Request, Response, StoredResponse};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cache i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache entry encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A named, versioned key-value cache.
///
/// Per-key `get`/`put` are individually atomic; nothing is locked
/// across operations. Concurrent writes to the same key race benignly
/// (last write wins), which is what the agent relies on instead of
/// transactions.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Create the bucket if it does not exist yet.
    async fn open(&self, bucket: &str) -> Result<(), StoreError>;

    /// Look up a request in one bucket. A missing bucket is a miss,
    /// not an error.
    async fn get(
        &self,
        bucket: &str,
        request: &Request,
    ) -> Result<Option<StoredResponse>, StoreError>;

    /// Store one response, creating the bucket if needed and
    /// overwriting any previous entry for the same key.
    async fn put(&self, bucket: &str, request: &Request, response: Response)
        -> Result<(), StoreError>;

    /// Store a batch of entries all-or-nothing: either every entry
    /// becomes visible or the bucket is left exactly as it was.
    async fn put_batch(
        &self,
        bucket: &str,
        entries: Vec<(Request, Response)>,
    ) -> Result<(), StoreError>;

    /// Names of every existing bucket, in no particular order.
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError>;

    /// Delete a bucket and everything in it. Returns whether the
    /// bucket existed.
    async fn delete_bucket(&self, bucket: &str) -> Result<bool, StoreError>;
}
