use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::agent::{CacheAgent, FetchError, InstallError};
use crate::cache::StoreError;
use crate::models::{Request, Response};

/// Buffer size for the lifecycle event channel.
/// A handful of in-flight fetches plus the two lifecycle events is the
/// realistic high-water mark; 32 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// One event delivered by the host.
pub enum LifecycleEvent {
    Install(oneshot::Sender<Result<(), InstallError>>),
    Activate(oneshot::Sender<Result<(), StoreError>>),
    Fetch {
        request: Request,
        reply: oneshot::Sender<Result<Response, FetchError>>,
    },
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("agent runtime has shut down")]
    Closed,

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Activate(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Event loop binding the agent to its host.
///
/// Lifecycle events are taken strictly in order: an install always
/// settles (commits or fails) before the activate behind it is even
/// picked up, and a phase holds the loop until its asynchronous work
/// finishes. Fetch events are spawned onto their own tasks instead, so
/// independent interceptions run concurrently with no mutual ordering.
pub struct AgentRuntime {
    agent: Arc<CacheAgent>,
    events: mpsc::Receiver<LifecycleEvent>,
}

/// Sender half handed to the host; cheap to clone. Dropping every
/// handle shuts the runtime down.
#[derive(Clone)]
pub struct RuntimeHandle {
    events: mpsc::Sender<LifecycleEvent>,
}

impl AgentRuntime {
    pub fn new(agent: Arc<CacheAgent>) -> (Self, RuntimeHandle) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        (
            Self {
                agent,
                events: rx,
            },
            RuntimeHandle { events: tx },
        )
    }

    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            match event {
                LifecycleEvent::Install(reply) => {
                    let _ = reply.send(self.agent.install().await);
                }
                LifecycleEvent::Activate(reply) => {
                    let _ = reply.send(self.agent.activate().await);
                }
                LifecycleEvent::Fetch { request, reply } => {
                    let agent = Arc::clone(&self.agent);
                    tokio::spawn(async move {
                        let _ = reply.send(agent.handle_fetch(request).await);
                    });
                }
            }
        }
        debug!("agent runtime stopped");
    }
}

impl RuntimeHandle {
    pub async fn install(&self) -> Result<(), HostError> {
        let (tx, rx) = oneshot::channel();
        self.events
            .send(LifecycleEvent::Install(tx))
            .await
            .map_err(|_| HostError::Closed)?;
        rx.await.map_err(|_| HostError::Closed)??;
        Ok(())
    }

    pub async fn activate(&self) -> Result<(), HostError> {
        let (tx, rx) = oneshot::channel();
        self.events
            .send(LifecycleEvent::Activate(tx))
            .await
            .map_err(|_| HostError::Closed)?;
        rx.await.map_err(|_| HostError::Closed)??;
        Ok(())
    }

    pub async fn fetch(&self, request: Request) -> Result<Response, HostError> {
        let (tx, rx) = oneshot::channel();
        self.events
            .send(LifecycleEvent::Fetch { request, reply: tx })
            .await
            .map_err(|_| HostError::Closed)?;
        Ok(rx.await.map_err(|_| HostError::Closed)??)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::cache::MemoryStore;
    use crate::config::AgentConfig;
    use crate::host::RecordedControl;
    use crate::net::{NetError, NetworkClient};

    use super::*;

    #[derive(Default)]
    struct FakeNetwork {
        routes: Mutex<HashMap<String, Vec<u8>>>,
        offline: AtomicBool,
    }

    impl FakeNetwork {
        fn serve(&self, url: &str, body: &[u8]) {
            self.routes
                .lock()
                .unwrap()
                .insert(url.to_string(), body.to_vec());
        }
    }

    #[async_trait]
    impl NetworkClient for FakeNetwork {
        async fn fetch(&self, request: &Request) -> Result<Response, NetError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(NetError::Unreachable(request.url.clone()));
            }
            let routes = self.routes.lock().unwrap();
            match routes.get(&request.url) {
                Some(body) => Ok(Response::ok(body.clone())),
                None => Ok(Response::new(404, Vec::new(), Vec::new())),
            }
        }
    }

    fn spawn_runtime() -> (RuntimeHandle, Arc<RecordedControl>, Arc<FakeNetwork>) {
        let config = AgentConfig {
            cache_name: "kiosk-shell-v3".to_string(),
            assets: vec!["./".to_string(), "./index.html".to_string()],
            fallback: "./index.html".to_string(),
            origin: "http://127.0.0.1:8080".to_string(),
        };
        let network = Arc::new(FakeNetwork::default());
        network.serve("./", b"<!doctype html>");
        network.serve("./index.html", b"<!doctype html>");
        let control = Arc::new(RecordedControl::new());
        let agent = Arc::new(CacheAgent::new(
            config,
            Arc::new(MemoryStore::new()),
            network.clone(),
            control.clone(),
        ));
        let (runtime, handle) = AgentRuntime::new(agent);
        tokio::spawn(runtime.run());
        (handle, control, network)
    }

    #[tokio::test]
    async fn test_lifecycle_runs_in_order_through_the_runtime() {
        let (handle, control, _network) = spawn_runtime();

        handle.install().await.unwrap();
        assert!(control.waiting_skipped());

        handle.activate().await.unwrap();
        assert!(control.clients_claimed());
    }

    #[tokio::test]
    async fn test_fetch_is_served_after_activation() {
        let (handle, _control, network) = spawn_runtime();
        handle.install().await.unwrap();
        handle.activate().await.unwrap();

        network.offline.store(true, Ordering::SeqCst);
        let served = handle.fetch(Request::navigation("./")).await.unwrap();
        assert_eq!(served.body(), b"<!doctype html>");
    }

    #[tokio::test]
    async fn test_install_failure_surfaces_through_the_handle() {
        let (handle, control, network) = spawn_runtime();
        network.offline.store(true, Ordering::SeqCst);

        let err = handle.install().await.unwrap_err();
        assert!(matches!(err, HostError::Install(_)));
        assert!(!control.waiting_skipped());
    }

    #[tokio::test]
    async fn test_dropped_runtime_reports_closed() {
        let agent = Arc::new(CacheAgent::new(
            AgentConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(FakeNetwork::default()),
            Arc::new(RecordedControl::new()),
        ));
        let (runtime, handle) = AgentRuntime::new(agent);
        drop(runtime);

        let err = handle.install().await.unwrap_err();
        assert!(matches!(err, HostError::Closed));
    }
}
