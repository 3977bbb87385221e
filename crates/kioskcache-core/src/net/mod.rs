//! Network access for the agent.
//!
//! The [`NetworkClient`] trait is the seam between the cache policy and
//! the wire; [`HttpClient`] is the production implementation on top of
//! `reqwest`. A fetch resolves with whatever response the server sent
//! (including error statuses) and fails only on connectivity or timeout
//! problems, matching how the policy distinguishes "network success"
//! from "network failure".

pub mod client;
pub mod error;

pub use client::{HttpClient, NetworkClient};
pub use error::NetError;
