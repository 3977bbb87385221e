//! Host-runtime binding.
//!
//! The agent registers for three lifecycle events (install, activate,
//! fetch) with whatever hosts it. This module is the thin adapter that
//! expresses that contract: [`AgentRuntime`] dispatches events to the
//! agent in lifecycle order, and [`HostControl`] carries the two
//! signals the agent sends back (skip the waiting grace period, claim
//! open clients).

pub mod control;
pub mod runtime;

pub use control::{HostControl, RecordedControl};
pub use runtime::{AgentRuntime, HostError, LifecycleEvent, RuntimeHandle};
