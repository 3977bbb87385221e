//! The cache policy agent.
//!
//! [`CacheAgent`] owns the three lifecycle operations:
//!
//! - `install`: fetch the asset manifest and commit it to the
//!   version-tagged bucket, all-or-nothing
//! - `activate`: prune every bucket carrying a different version tag
//! - `handle_fetch`: network-first for navigations, cache-first for
//!   sub-resources
//!
//! Collaborators (cache store, network client, host control) are
//! injected at construction; the agent itself holds no other state.

pub mod error;
pub mod policy;

pub use error::{FetchError, InstallError};
pub use policy::CacheAgent;
