use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fetched or cached response: status, headers, body.
///
/// A `Response` is single-use. Once it has been returned to a caller or
/// handed to the cache it is gone, so any code path that needs both
/// outcomes must call [`Response::duplicate`] before disposing of it.
/// There is deliberately no `Clone` impl; duplication is an explicit
/// decision at the branch point.
#[derive(Debug, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A plain 200 response with no headers.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Vec::new(), body.into())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// 2xx statuses count as success; everything else is a rejection
    /// for install purposes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Deep copy for code paths that both return and store a response.
    pub fn duplicate(&self) -> Response {
        Response {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

/// Threshold between "Xm ago" and "Xh ago" display
const MINUTES_PER_HOUR: i64 = 60;

/// Threshold between "Xh ago" and "Xd ago" display
const MINUTES_PER_DAY: i64 = 1440;

/// The persisted form of a response, stamped when it enters a bucket.
///
/// Unlike a live [`Response`], a stored entry can be read any number of
/// times; every read materializes a fresh `Response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Consume a live response and stamp it for storage.
    pub fn new(response: Response) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
            stored_at: Utc::now(),
        }
    }

    pub fn into_response(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.stored_at).num_minutes()
    }

    /// Human-readable entry age for diagnostics.
    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew as well
            "just now".to_string()
        } else if minutes < MINUTES_PER_HOUR {
            format!("{}m ago", minutes)
        } else if minutes < MINUTES_PER_DAY {
            format!("{}h ago", minutes / MINUTES_PER_HOUR)
        } else {
            format!("{}d ago", minutes / MINUTES_PER_DAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_duplicate_is_deep_copy() {
        let original = Response::new(200, vec![("etag".into(), "abc".into())], b"body".to_vec());
        let copy = original.duplicate();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_is_success_bounds() {
        assert!(Response::new(200, vec![], vec![]).is_success());
        assert!(Response::new(299, vec![], vec![]).is_success());
        assert!(!Response::new(304, vec![], vec![]).is_success());
        assert!(!Response::new(404, vec![], vec![]).is_success());
    }

    #[test]
    fn test_stored_roundtrip_preserves_content() {
        let stored = StoredResponse::new(Response::ok(b"hello".to_vec()));
        let back = stored.into_response();
        assert_eq!(back.status(), 200);
        assert_eq!(back.body(), b"hello");
    }

    #[test]
    fn test_age_display_just_now() {
        let stored = StoredResponse::new(Response::ok(Vec::new()));
        assert_eq!(stored.age_display(), "just now");
    }

    #[test]
    fn test_age_display_buckets() {
        let mut stored = StoredResponse::new(Response::ok(Vec::new()));
        stored.stored_at = Utc::now() - Duration::minutes(5);
        assert_eq!(stored.age_display(), "5m ago");
        stored.stored_at = Utc::now() - Duration::hours(3);
        assert_eq!(stored.age_display(), "3h ago");
        stored.stored_at = Utc::now() - Duration::days(2);
        assert_eq!(stored.age_display(), "2d ago");
    }
}
