// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Configuration
//!
//! Loaded from a JSON file. Every section except `networks` has defaults.
//!
//! ```json
//! {
//!   "networks": [
//!     {
//!       "id": "urn:ogf:network:aruba:topology",
//!       "label_swapping": false,
//!       "ports": [
//!         { "name": "ps",  "label": "1780-1789", "capacity": 1000 },
//!         { "name": "bon", "label": "1780-1789", "capacity": 1000,
//!           "remote": { "network": "bonaire:topology", "port": "aru" } }
//!       ]
//!     }
//!   ],
//!   "discovery": { "peers": ["http://bonaire.example.net/nsa-discovery"] },
//!   "pathfinding": { "max_hops": 8 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::discovery::DiscoveryConfig;
use crate::domain::{Label, Network, NetworkId, Port, RemotePort};
use crate::errors::{ConfigError, ConfigResult};
use crate::pathfinding::PathFinderConfig;
use crate::reachability::LinkVectors;
use crate::topology::TopologyGraph;

/// Environment variable holding the configuration file path
pub const CONFIG_ENV: &str = "NSI_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub networks: Vec<NetworkConfig>,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub pathfinding: PathFinderConfig,

    /// How often the binary logs the merged reachability table
    #[serde(default = "default_report_interval")]
    pub report_interval_secs: u64,
}

fn default_report_interval() -> u64 {
    60
}

/// A local network and its ports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub id: NetworkId,

    #[serde(default)]
    pub label_swapping: bool,

    #[serde(default)]
    pub ports: Vec<PortConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    pub name: String,

    #[serde(default = "Label::any_vlan")]
    pub label: Label,

    /// Mbps
    #[serde(default = "default_capacity")]
    pub capacity: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemotePort>,
}

fn default_capacity() -> u64 {
    1000
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the file named by `NSI_CONFIG`
    pub fn from_env() -> ConfigResult<Self> {
        let path = std::env::var(CONFIG_ENV)
            .map_err(|_| ConfigError::Invalid(format!("{} not set", CONFIG_ENV)))?;
        Self::from_file(path)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for network in &self.networks {
            if !seen.insert(&network.id) {
                return Err(ConfigError::Invalid(format!(
                    "network {} configured twice",
                    network.id
                )));
            }
            network.build()?;
        }

        if self.pathfinding.max_hops == 0 {
            return Err(ConfigError::Invalid("max_hops must be positive".to_string()));
        }
        if self.report_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "report_interval_secs must be positive".to_string(),
            ));
        }
        self.discovery.validate()
    }

    pub fn build_networks(&self) -> ConfigResult<Vec<Network>> {
        self.networks.iter().map(NetworkConfig::build).collect()
    }

    /// Topology graph over the configured networks with fresh, empty vectors
    pub fn build_topology(&self) -> ConfigResult<TopologyGraph> {
        let networks = self.build_networks()?;
        Ok(TopologyGraph::with_networks(networks, Arc::new(LinkVectors::new())))
    }
}

impl NetworkConfig {
    pub fn build(&self) -> ConfigResult<Network> {
        let mut network = Network::new(self.id.clone(), self.label_swapping);
        for port in &self.ports {
            network.add_port(port.build()?)?;
        }
        Ok(network)
    }
}

impl PortConfig {
    pub fn build(&self) -> ConfigResult<Port> {
        let port = Port::new(self.name.as_str(), self.label, self.capacity)?;
        Ok(match &self.remote {
            Some(remote) => port.with_remote(remote.network.clone(), remote.port.as_str()),
            None => port,
        })
    }
}
