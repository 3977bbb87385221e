use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::models::{Request, Response, StoredResponse};

use super::{CacheStore, StoreError};

/// Suffix of the hidden staging directory used by batch commits
const STAGING_SUFFIX: &str = ".staging";

/// Cache store rooted at a directory: one sub-directory per bucket,
/// one pretty-printed JSON file per entry.
///
/// Bucket names are version tags ("kiosk-shell-v3") and are used as
/// directory names verbatim. Hidden directories (leading dot) are
/// reserved for staging and never listed as buckets.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }

    fn staging_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(format!(".{}{}", bucket, STAGING_SUFFIX))
    }

    fn entry_path(dir: &Path, request: &Request) -> PathBuf {
        dir.join(format!("{}.json", entry_file_name(request)))
    }

    fn write_entry(dir: &Path, request: &Request, response: Response) -> Result<(), StoreError> {
        let stored = StoredResponse::new(response);
        let contents = serde_json::to_string_pretty(&stored)?;
        fs::write(Self::entry_path(dir, request), contents)?;
        Ok(())
    }
}

/// File name for an entry: a readable slug plus a digest of the full
/// cache key, so distinct keys never collide after sanitization.
fn entry_file_name(request: &Request) -> String {
    let key = request.cache_key();
    let digest = Sha256::digest(key.as_bytes());
    let slug: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(40)
        .collect();
    let tag: String = digest.iter().take(8).map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}", slug, tag)
}

#[async_trait]
impl CacheStore for DiskStore {
    async fn open(&self, bucket: &str) -> Result<(), StoreError> {
        fs::create_dir_all(self.bucket_dir(bucket))?;
        Ok(())
    }

    async fn get(
        &self,
        bucket: &str,
        request: &Request,
    ) -> Result<Option<StoredResponse>, StoreError> {
        let path = Self::entry_path(&self.bucket_dir(bucket), request);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    async fn put(
        &self,
        bucket: &str,
        request: &Request,
        response: Response,
    ) -> Result<(), StoreError> {
        let dir = self.bucket_dir(bucket);
        fs::create_dir_all(&dir)?;
        Self::write_entry(&dir, request, response)
    }

    async fn put_batch(
        &self,
        bucket: &str,
        entries: Vec<(Request, Response)>,
    ) -> Result<(), StoreError> {
        // Entries are written into a hidden staging directory first and
        // only promoted once every write has succeeded, so a failed
        // batch leaves no partially-populated bucket behind.
        let staging = self.staging_dir(bucket);
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        for (request, response) in entries {
            if let Err(e) = Self::write_entry(&staging, &request, response) {
                let _ = fs::remove_dir_all(&staging);
                return Err(e);
            }
        }

        let dir = self.bucket_dir(bucket);
        fs::create_dir_all(&dir)?;
        for entry in fs::read_dir(&staging)? {
            let entry = entry?;
            fs::rename(entry.path(), dir.join(entry.file_name()))?;
        }
        fs::remove_dir_all(&staging)?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool, StoreError> {
        let dir = self.bucket_dir(bucket);
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(dir)?;
        Ok(true)
    }
}
