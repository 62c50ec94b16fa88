// Copyright (c) 2025 - Cowboy AI, Inc.
//! Discovery fetcher service
//!
//! One background task per fetcher. Each round fetches every peer
//! concurrently, waits for all of them to settle, then sleeps for the next
//! backoff interval. Peer failures are logged and recorded in the peer's
//! status; they never end the loop.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::document::{NsaDescription, PeerAdvertisement};
use super::schedule::FetchSchedule;
use super::{DiscoveryConfig, PeerDescriptor};
use crate::domain::{NetworkId, NetworkServiceAgent};
use crate::errors::{FetchError, FetchResult};
use crate::topology::TopologyGraph;

/// Where discovery documents come from
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Raw document body at `url`; an empty body is not an error
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// Plain HTTP GET
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: Client,
    timeout: Duration,
}

impl HttpDocumentSource {
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nsi-topology/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, timeout })
    }

    fn error(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                after_secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.error(url, e))?;
        Ok(body.to_vec())
    }
}

/// Receives provider agents announced by peers
pub trait ProviderRegistry: Send + Sync {
    /// Called once per distinct `(agent, network)` pair
    fn spawn_provider(&self, agent: &NetworkServiceAgent, network: &NetworkId);
}

/// Registry that only logs what it is given
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingProviderRegistry;

impl ProviderRegistry for LoggingProviderRegistry {
    fn spawn_provider(&self, agent: &NetworkServiceAgent, network: &NetworkId) {
        info!(agent = %agent, network = %network, "Provider registered");
    }
}

/// Result of fetching one peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied {
        nsa_id: String,
        new_providers: usize,
        updated_ports: usize,
    },
    Empty,
    Failed(FetchError),
}

/// Per-peer fetch history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeerStatus {
    pub nsa_id: Option<String>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

/// Periodic discovery poller
pub struct FetcherService {
    inner: Arc<Fetcher>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

struct Fetcher {
    graph: Arc<TopologyGraph>,
    source: Arc<dyn DocumentSource>,
    registry: Arc<dyn ProviderRegistry>,
    peers: Vec<PeerDescriptor>,
    timeout: Duration,
    schedule: Mutex<FetchSchedule>,
    providers: Mutex<HashSet<(NetworkServiceAgent, NetworkId)>>,
    status: RwLock<HashMap<String, PeerStatus>>,
}

impl FetcherService {
    pub fn new(
        config: &DiscoveryConfig,
        graph: Arc<TopologyGraph>,
        source: Arc<dyn DocumentSource>,
        registry: Arc<dyn ProviderRegistry>,
    ) -> Self {
        let inner = Fetcher {
            graph,
            source,
            registry,
            peers: config.peers.clone(),
            timeout: config.timeout(),
            schedule: Mutex::new(config.schedule()),
            providers: Mutex::new(HashSet::new()),
            status: RwLock::new(HashMap::new()),
        };

        Self {
            inner: Arc::new(inner),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    /// Spawn the polling task; the first round runs one interval from now
    pub fn start(&self) {
        let mut task = lock(&self.task);
        if task.is_some() || self.cancel.is_cancelled() {
            warn!("Discovery fetcher already started");
            return;
        }

        *task = Some(tokio::spawn(run_loop(
            Arc::clone(&self.inner),
            self.cancel.clone(),
        )));
    }

    /// Stop scheduling rounds and wait for a round in progress to settle
    pub async fn stop(&self) {
        self.cancel.cancel();
        let task = lock(&self.task).take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "Discovery task ended abnormally");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.task).as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Fetch every peer once, outside the schedule
    pub async fn run_round(&self) -> Vec<(PeerDescriptor, FetchOutcome)> {
        self.inner.run_round().await
    }

    pub fn peers(&self) -> &[PeerDescriptor] {
        &self.inner.peers
    }

    /// Interval before the next scheduled round
    pub fn current_interval(&self) -> Duration {
        lock(&self.inner.schedule).interval()
    }

    /// Scheduled rounds completed
    pub fn rounds(&self) -> u64 {
        lock(&self.inner.schedule).rounds()
    }

    pub fn peer_status(&self) -> HashMap<String, PeerStatus> {
        self.inner
            .status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for FetcherService {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_loop(fetcher: Arc<Fetcher>, cancel: CancellationToken) {
    info!(peers = fetcher.peers.len(), "Discovery fetcher started");

    loop {
        let wait = lock(&fetcher.schedule).interval();
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(wait) => {}
        }

        fetcher.run_round().await;

        let next = lock(&fetcher.schedule).advance();
        debug!(next_secs = next.as_secs(), "Next discovery round scheduled");
    }

    info!("Discovery fetcher stopped");
}

impl Fetcher {
    async fn run_round(&self) -> Vec<(PeerDescriptor, FetchOutcome)> {
        let fetches = self
            .peers
            .iter()
            .map(|peer| async move { (peer.clone(), self.fetch_peer(peer).await) });
        let results = join_all(fetches).await;

        let failed = results
            .iter()
            .filter(|(_, outcome)| matches!(outcome, FetchOutcome::Failed(_)))
            .count();
        info!(peers = results.len(), failed, "Discovery round complete");

        results
    }

    async fn fetch_peer(&self, peer: &PeerDescriptor) -> FetchOutcome {
        let url = peer.url();
        self.record(url, |status| status.last_attempt = Some(Utc::now()));

        let outcome = match tokio::time::timeout(self.timeout, self.source.fetch(url)).await {
            Err(_) => FetchOutcome::Failed(FetchError::Timeout {
                url: url.to_string(),
                after_secs: self.timeout.as_secs(),
            }),
            Ok(Err(err)) => FetchOutcome::Failed(err),
            Ok(Ok(body)) if body.iter().all(u8::is_ascii_whitespace) => {
                info!(peer = url, "Got empty discovery document");
                FetchOutcome::Empty
            }
            Ok(Ok(body)) => self.apply(&body).unwrap_or_else(FetchOutcome::Failed),
        };

        match &outcome {
            FetchOutcome::Failed(err) => {
                warn!(peer = url, error = %err, "Discovery fetch failed");
                self.record(url, |status| {
                    status.consecutive_failures += 1;
                    status.last_error = Some(err.to_string());
                });
            }
            FetchOutcome::Applied { nsa_id, .. } => self.record(url, |status| {
                status.nsa_id = Some(nsa_id.clone());
                status.last_success = Some(Utc::now());
                status.consecutive_failures = 0;
                status.last_error = None;
            }),
            FetchOutcome::Empty => {}
        }

        outcome
    }

    fn apply(&self, body: &[u8]) -> FetchResult<FetchOutcome> {
        let description = NsaDescription::parse(body)?;
        let PeerAdvertisement {
            agent,
            networks,
            vector,
        } = description.advertisement()?;

        if networks.is_empty() {
            debug!(nsa = %description.id, "Discovery document lists no usable network ids");
        }

        let new_networks: Vec<NetworkId> = {
            let mut seen = lock(&self.providers);
            networks
                .iter()
                .filter(|network| seen.insert((agent.clone(), (*network).clone())))
                .cloned()
                .collect()
        };
        for network in &new_networks {
            self.registry.spawn_provider(&agent, network);
        }

        let mut updated_ports = 0;
        if !vector.is_empty() {
            let vectors = self.graph.link_vectors();
            for (local, port) in self.graph.peered_ports() {
                if port.remote_network().is_some_and(|remote| networks.contains(remote)) {
                    vectors.update_vector(&local, port.name(), vector.clone());
                    updated_ports += 1;
                }
            }
        }

        info!(
            nsa = %description.id,
            networks = networks.len(),
            new_providers = new_networks.len(),
            updated_ports,
            "Applied discovery document"
        );

        Ok(FetchOutcome::Applied {
            nsa_id: description.id,
            new_providers: new_networks.len(),
            updated_ports,
        })
    }

    fn record(&self, url: &str, update: impl FnOnce(&mut PeerStatus)) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        update(status.entry(url.to_string()).or_default());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
