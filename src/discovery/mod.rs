// Copyright (c) 2025 - Cowboy AI, Inc.
//! Peer Discovery
//!
//! Polls the discovery documents of peer NSAs, registers the provider agents
//! they announce, and feeds their reachability into [`LinkVectors`].
//!
//! ```text
//! FetcherService ──GET──► peer discovery document
//!       │
//!       ├──► ProviderRegistry::spawn_provider(agent, network)
//!       └──► LinkVectors::update_vector(local network, peering port, vector)
//! ```
//!
//! [`LinkVectors`]: crate::reachability::LinkVectors

mod document;
mod fetcher;
mod schedule;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::ConfigError;

pub use document::{
    Interface, NsaDescription, OtherElement, PeerAdvertisement, TopologyReachability,
    CS2_PROVIDER, CS2_SERVICE_TYPE,
};
pub use fetcher::{
    DocumentSource, FetchOutcome, FetcherService, HttpDocumentSource, LoggingProviderRegistry,
    PeerStatus, ProviderRegistry,
};
pub use schedule::{FetchSchedule, FETCH_INTERVAL_MAX, FETCH_INTERVAL_MIN, FETCH_TIMEOUT};

/// Discovery document URL of a peer NSA
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerDescriptor {
    url: String,
}

impl PeerDescriptor {
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        if !url.starts_with("http") {
            return Err(ConfigError::Invalid(format!(
                "peer discovery URL must be http(s): {}",
                url
            )));
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TryFrom<String> for PeerDescriptor {
    type Error = ConfigError;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        Self::new(url)
    }
}

impl From<PeerDescriptor> for String {
    fn from(peer: PeerDescriptor) -> Self {
        peer.url
    }
}

impl fmt::Display for PeerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub peers: Vec<PeerDescriptor>,

    #[serde(default = "default_interval_min")]
    pub fetch_interval_min_secs: u64,

    #[serde(default = "default_interval_max")]
    pub fetch_interval_max_secs: u64,

    #[serde(default = "default_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_interval_min() -> u64 {
    FETCH_INTERVAL_MIN.as_secs()
}

fn default_interval_max() -> u64 {
    FETCH_INTERVAL_MAX.as_secs()
}

fn default_timeout() -> u64 {
    FETCH_TIMEOUT.as_secs()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            peers: Vec::new(),
            fetch_interval_min_secs: default_interval_min(),
            fetch_interval_max_secs: default_interval_max(),
            fetch_timeout_secs: default_timeout(),
        }
    }
}

impl DiscoveryConfig {
    pub fn with_peers(peers: impl IntoIterator<Item = PeerDescriptor>) -> Self {
        Self {
            peers: peers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn schedule(&self) -> FetchSchedule {
        FetchSchedule::new(
            Duration::from_secs(self.fetch_interval_min_secs),
            Duration::from_secs(self.fetch_interval_max_secs),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_interval_min_secs < 2 {
            return Err(ConfigError::Invalid(
                "fetch_interval_min_secs must be at least 2".to_string(),
            ));
        }
        if self.fetch_interval_max_secs < self.fetch_interval_min_secs {
            return Err(ConfigError::Invalid(
                "fetch_interval_max_secs is below fetch_interval_min_secs".to_string(),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
