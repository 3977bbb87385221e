use std::sync::atomic::{AtomicBool, Ordering};

/// Signals the agent sends to whatever hosts it.
///
/// `skip_waiting` asks the host to make a freshly installed version
/// eligible for activation immediately instead of waiting out a grace
/// period; `claim_clients` asks it to route all open clients through
/// this agent right away rather than on their next load.
pub trait HostControl: Send + Sync {
    fn skip_waiting(&self);
    fn claim_clients(&self);
}

/// Host control that records the signals for later inspection.
#[derive(Debug, Default)]
pub struct RecordedControl {
    waiting_skipped: AtomicBool,
    clients_claimed: AtomicBool,
}

impl RecordedControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waiting_skipped(&self) -> bool {
        self.waiting_skipped.load(Ordering::SeqCst)
    }

    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed.load(Ordering::SeqCst)
    }
}

impl HostControl for RecordedControl {
    fn skip_waiting(&self) {
        self.waiting_skipped.store(true, Ordering::SeqCst);
    }

    fn claim_clients(&self) {
        self.clients_claimed.store(true, Ordering::SeqCst);
    }
}
