use thiserror::Error;

use crate::cache::StoreError;
use crate::net::NetError;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("failed to fetch asset {path}")]
    AssetFetch {
        path: String,
        #[source]
        source: NetError,
    },

    #[error("asset {path} returned status {status}")]
    AssetRejected { path: String, status: u16 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("offline with no cached entry for {url}")]
    Offline {
        url: String,
        #[source]
        source: NetError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
