use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::cache::{CacheStore, StoreError};
use crate::config::AgentConfig;
use crate::host::HostControl;
use crate::models::{FetchClass, Request, Response};
use crate::net::NetworkClient;

use super::{FetchError, InstallError};

/// Maximum concurrent asset fetches during install.
/// Shell manifests are small; 8 keeps install quick without hammering
/// the origin server.
const MAX_CONCURRENT_INSTALL_FETCHES: usize = 8;

/// The cache policy agent.
///
/// Constructed once per process with injected collaborators. The agent
/// holds no mutable state of its own; the bucket is the only shared
/// resource, and same-key writes are idempotent (last write wins).
pub struct CacheAgent {
    config: AgentConfig,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn NetworkClient>,
    host: Arc<dyn HostControl>,
}

impl CacheAgent {
    pub fn new(
        config: AgentConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn NetworkClient>,
        host: Arc<dyn HostControl>,
    ) -> Self {
        Self {
            config,
            store,
            network,
            host,
        }
    }

    pub fn cache_name(&self) -> &str {
        &self.config.cache_name
    }

    /// Install the current version: fetch every manifest asset and
    /// commit the batch to the version-tagged bucket.
    ///
    /// All-or-nothing: if any single asset fails to fetch (or comes
    /// back non-2xx) nothing is committed and any previous version's
    /// bucket remains authoritative. Re-running install against an
    /// already-current bucket changes nothing observable.
    pub async fn install(&self) -> Result<(), InstallError> {
        debug!(
            bucket = %self.config.cache_name,
            assets = self.config.assets.len(),
            "installing"
        );

        let entries: Vec<(Request, Response)> = stream::iter(self.config.assets.iter().cloned())
            .map(|path| async move {
                let request = Request::sub_resource(path.clone());
                let response = self.network.fetch(&request).await.map_err(|source| {
                    InstallError::AssetFetch {
                        path: path.clone(),
                        source,
                    }
                })?;
                if !response.is_success() {
                    return Err(InstallError::AssetRejected {
                        path,
                        status: response.status(),
                    });
                }
                Ok((request, response))
            })
            .buffered(MAX_CONCURRENT_INSTALL_FETCHES)
            .try_collect()
            .await?;

        self.store.open(&self.config.cache_name).await?;
        self.store
            .put_batch(&self.config.cache_name, entries)
            .await?;

        info!(
            bucket = %self.config.cache_name,
            assets = self.config.assets.len(),
            "install complete"
        );
        self.host.skip_waiting();
        Ok(())
    }

    /// Activate the current version: delete every bucket whose name
    /// differs from the current version tag.
    ///
    /// Deletion is best-effort per bucket; one failed delete must not
    /// keep other stale buckets alive, so all deletes are issued
    /// together and individual errors are treated as no-ops.
    pub async fn activate(&self) -> Result<(), StoreError> {
        let names = self.store.list_buckets().await?;
        let stale: Vec<String> = names
            .into_iter()
            .filter(|name| name != &self.config.cache_name)
            .collect();

        let deletions = stale.iter().map(|name| async move {
            if let Err(error) = self.store.delete_bucket(name).await {
                debug!(bucket = %name, %error, "stale bucket delete failed");
            }
        });
        future::join_all(deletions).await;

        info!(
            bucket = %self.config.cache_name,
            pruned = stale.len(),
            "activation complete"
        );
        self.host.claim_clients();
        Ok(())
    }

    /// Handle one intercepted fetch. Independent calls may run
    /// concurrently; they share nothing but the bucket.
    pub async fn handle_fetch(&self, request: Request) -> Result<Response, FetchError> {
        match request.class {
            FetchClass::Navigation => self.fetch_navigation(request).await,
            FetchClass::SubResource => self.fetch_sub_resource(request).await,
        }
    }

    /// Network-first: navigations prefer freshness, falling back to the
    /// cache and then to the root document when offline.
    async fn fetch_navigation(&self, request: Request) -> Result<Response, FetchError> {
        match self.network.fetch(&request).await {
            Ok(fresh) => {
                // The response is single-use: duplicate before the copy
                // goes to the bucket so the original can be returned.
                let copy = fresh.duplicate();
                if let Err(error) = self.store.put(&self.config.cache_name, &request, copy).await {
                    debug!(url = %request.url, %error, "navigation entry refresh failed");
                }
                Ok(fresh)
            }
            Err(source) => {
                debug!(url = %request.url, error = %source, "navigation fetch failed, trying cache");
                if let Some(entry) = self.store.get(&self.config.cache_name, &request).await? {
                    debug!(url = %request.url, age = %entry.age_display(), "serving cached navigation");
                    return Ok(entry.into_response());
                }

                let fallback = Request::navigation(self.config.fallback.clone());
                if let Some(entry) = self.store.get(&self.config.cache_name, &fallback).await? {
                    debug!(url = %request.url, "serving fallback document");
                    return Ok(entry.into_response());
                }

                Err(FetchError::Offline {
                    url: request.url,
                    source,
                })
            }
        }
    }

    /// Cache-first: sub-resources are immutable per version, so a hit
    /// never touches the network. Misses go to the network and are not
    /// written back.
    async fn fetch_sub_resource(&self, request: Request) -> Result<Response, FetchError> {
        if let Some(entry) = self.store.get(&self.config.cache_name, &request).await? {
            debug!(url = %request.url, age = %entry.age_display(), "cache hit");
            return Ok(entry.into_response());
        }

        debug!(url = %request.url, "cache miss, fetching live");
        self.network
            .fetch(&request)
            .await
            .map_err(|source| FetchError::Offline {
                url: request.url,
                source,
            })
    }
}
