use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method of an intercepted request.
///
/// The cache is keyed by method and URL, but in practice only GET
/// requests ever land in a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Head,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an intercepted request is dispatched.
///
/// Classification happens once, when the request enters the agent, and
/// every later decision matches on it exhaustively. Navigations are
/// full page loads; everything else is a sub-resource (script, image,
/// stylesheet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchClass {
    Navigation,
    SubResource,
}

/// An intercepted fetch descriptor.
///
/// URLs are origin-relative paths ("./app.js"); the network client
/// resolves them against the configured origin, and the cache keys
/// entries by `method` + `url` as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub class: FetchClass,
}

impl Request {
    /// A GET request for a full page load.
    pub fn navigation(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            class: FetchClass::Navigation,
        }
    }

    /// A GET request for a static sub-resource.
    pub fn sub_resource(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            class: FetchClass::SubResource,
        }
    }

    /// Cache identity of this request. Two requests with the same key
    /// read and overwrite the same bucket entry, regardless of class.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_ignores_class() {
        let nav = Request::navigation("./index.html");
        let sub = Request::sub_resource("./index.html");
        assert_eq!(nav.cache_key(), sub.cache_key());
    }

    #[test]
    fn test_cache_key_includes_method() {
        let get = Request::sub_resource("./app.js");
        let mut head = get.clone();
        head.method = Method::Head;
        assert_ne!(get.cache_key(), head.cache_key());
    }

    #[test]
    fn test_constructors_classify_once() {
        assert_eq!(Request::navigation("./").class, FetchClass::Navigation);
        assert_eq!(
            Request::sub_resource("./app.js").class,
            FetchClass::SubResource
        );
    }
}
