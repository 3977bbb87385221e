use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetError {
    #[error("host unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NetError {
    /// Fold a transport error into the unreachable/timeout taxonomy
    /// where reqwest can tell us which one it was.
    pub fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetError::Timeout(url.to_string())
        } else if err.is_connect() {
            NetError::Unreachable(url.to_string())
        } else {
            NetError::Transport(err)
        }
    }
}
