//! Data models for intercepted traffic.
//!
//! This module contains the request and response types the agent
//! operates on:
//!
//! - `Request`, `Method`, `FetchClass`: an intercepted fetch descriptor,
//!   classified once at handler entry
//! - `Response`: a single-use response body with explicit duplication
//! - `StoredResponse`: the persisted form of a response, with a
//!   stored-at timestamp

pub mod request;
pub mod response;

pub use request::{FetchClass, Method, Request};
pub use response::{Response, StoredResponse};
