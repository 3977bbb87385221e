//! Offline caching for a static kiosk web application.
//!
//! The agent intercepts fetch requests, serves assets from a local
//! versioned cache bucket, and manages the bucket's lifecycle across
//! deployed versions:
//!
//! - install: fetch the compiled-in asset manifest and commit it
//!   all-or-nothing to the version-tagged bucket
//! - activate: prune every bucket carrying an older version tag
//! - fetch: network-first for page navigations (with offline
//!   fallback), cache-first for static sub-resources
//!
//! [`agent::CacheAgent`] is the policy object; collaborators (a
//! [`cache::CacheStore`], a [`net::NetworkClient`], a
//! [`host::HostControl`]) are injected at construction. The
//! [`host::AgentRuntime`] adapter binds it to an event-dispatching
//! host.

pub mod agent;
pub mod cache;
pub mod config;
pub mod host;
pub mod models;
pub mod net;

pub use agent::CacheAgent;
pub use config::AgentConfig;
