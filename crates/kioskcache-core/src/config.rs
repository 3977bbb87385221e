//! Static configuration for the agent.
//!
//! Everything here is compiled in: there are no runtime flags,
//! environment variables, or config files. Bumping [`CACHE_NAME`] is
//! the cache-invalidation mechanism - the next activation deletes every
//! bucket carrying an older tag on every client.

/// Versioned bucket name. Bump the suffix to force a full refresh.
pub const CACHE_NAME: &str = "kiosk-shell-v3";

/// Application root document, the last-resort offline response for
/// failed navigations.
pub const FALLBACK_DOCUMENT: &str = "./index.html";

/// Origin the kiosk build is served from.
pub const ORIGIN: &str = "http://127.0.0.1:8080";

/// Assets guaranteed present in the bucket after a successful install.
pub const SHELL_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./styles.css",
    "./app.js",
    "./manifest.json",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
];

/// The agent's compiled-in configuration.
///
/// `fallback` must be one of `assets`, otherwise the offline fallback
/// for navigations has nothing to serve.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub cache_name: String,
    pub assets: Vec<String>,
    pub fallback: String,
    pub origin: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            assets: SHELL_ASSETS.iter().map(|s| s.to_string()).collect(),
            fallback: FALLBACK_DOCUMENT.to_string(),
            origin: ORIGIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_part_of_the_manifest() {
        let config = AgentConfig::default();
        assert!(config.assets.contains(&config.fallback));
    }

    #[test]
    fn test_cache_name_carries_a_version_suffix() {
        let config = AgentConfig::default();
        let suffix = config.cache_name.rsplit("-v").next().unwrap();
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
