// Copyright (c) 2025 - Cowboy AI, Inc.
//! Networks, Ports and Service Termination Points
//!
//! A [`Network`] is one administrative domain. It owns an ordered set of
//! [`Port`]s; a port may be statically peered with a port of another network.
//! Port order is significant: adjacency is enumerated in port order, which
//! makes path enumeration deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::label::{Label, LabelType};

/// OGF network URN prefix
pub const URN_OGF_PREFIX: &str = "urn:ogf:network:";

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid network id: {0:?}")]
    InvalidNetworkId(String),

    #[error("Invalid port name: {0:?}")]
    InvalidPortName(String),

    #[error("Port {port} already defined in network {network}")]
    DuplicatePort { network: NetworkId, port: String },

    #[error("Port {port} of network {network} is peered with its own network")]
    SelfPeering { network: NetworkId, port: String },
}

/// Network identifier
///
/// Stored by base name (`aruba:topology`); the full URN form is
/// `urn:ogf:network:aruba:topology`. Either form is accepted on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NetworkId(String);

impl NetworkId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, NetworkError> {
        let id = id.as_ref().trim();
        let base = id.strip_prefix(URN_OGF_PREFIX).unwrap_or(id);
        if base.is_empty() || base.chars().any(char::is_whitespace) {
            return Err(NetworkError::InvalidNetworkId(id.to_string()));
        }
        Ok(Self(base.to_string()))
    }

    /// Parse a full URN; anything without the OGF prefix is rejected
    pub fn from_urn(urn: &str) -> Option<Self> {
        urn.strip_prefix(URN_OGF_PREFIX)
            .and_then(|base| Self::new(base).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_urn(&self) -> String {
        format!("{}{}", URN_OGF_PREFIX, self.0)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetworkId {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NetworkId {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NetworkId> for String {
    fn from(id: NetworkId) -> Self {
        id.0
    }
}

/// Statically configured far end of a peered port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemotePort {
    pub network: NetworkId,
    pub port: String,
}

/// Port of a network, usable as a service termination point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    name: String,
    label: Label,
    /// Bandwidth capacity in Mbps
    capacity: u64,
    remote: Option<RemotePort>,
}

impl Port {
    pub fn new(name: impl Into<String>, label: Label, capacity: u64) -> Result<Self, NetworkError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NetworkError::InvalidPortName(name));
        }
        Ok(Self {
            name,
            label,
            capacity,
            remote: None,
        })
    }

    /// Peer this port with a port of another network
    pub fn with_remote(mut self, network: NetworkId, port: impl Into<String>) -> Self {
        self.remote = Some(RemotePort {
            network,
            port: port.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usable label range of the port
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn remote(&self) -> Option<&RemotePort> {
        self.remote.as_ref()
    }

    pub fn remote_network(&self) -> Option<&NetworkId> {
        self.remote.as_ref().map(|r| &r.network)
    }
}

/// Network domain with its ports and label swapping capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    id: NetworkId,
    ports: Vec<Port>,
    label_swapping: bool,
}

impl Network {
    pub fn new(id: NetworkId, label_swapping: bool) -> Self {
        Self {
            id,
            ports: Vec::new(),
            label_swapping,
        }
    }

    /// Append a port, keeping definition order
    ///
    /// # Invariants
    /// - Port names are unique within the network
    /// - A port never peers with its own network
    pub fn add_port(&mut self, port: Port) -> Result<(), NetworkError> {
        if self.port(port.name()).is_some() {
            return Err(NetworkError::DuplicatePort {
                network: self.id.clone(),
                port: port.name,
            });
        }
        if port.remote_network() == Some(&self.id) {
            return Err(NetworkError::SelfPeering {
                network: self.id.clone(),
                port: port.name,
            });
        }
        self.ports.push(port);
        Ok(())
    }

    pub fn with_port(mut self, port: Port) -> Result<Self, NetworkError> {
        self.add_port(port)?;
        Ok(self)
    }

    pub fn id(&self) -> &NetworkId {
        &self.id
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Whether the network can remap a label of the given dimension between
    /// its ingress and egress ports
    pub fn can_swap_label(&self, _label_type: LabelType) -> bool {
        self.label_swapping
    }

    /// Ports that peer with the given remote network
    pub fn ports_towards<'a>(&'a self, remote: &'a NetworkId) -> impl Iterator<Item = &'a Port> + 'a {
        self.ports
            .iter()
            .filter(move |p| p.remote_network() == Some(remote))
    }
}

/// Service termination point reference: a port of a network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stp {
    pub network: NetworkId,
    pub port: String,
}

impl Stp {
    pub fn new(network: NetworkId, port: impl Into<String>) -> Self {
        Self {
            network,
            port: port.into(),
        }
    }
}

impl fmt::Display for Stp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.network.to_urn(), self.port)
    }
}

/// Provider agent announced by a peer's discovery document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkServiceAgent {
    pub identity: String,
    pub endpoint: String,
    pub service_type: String,
}

impl NetworkServiceAgent {
    pub fn new(
        identity: impl Into<String>,
        endpoint: impl Into<String>,
        service_type: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            endpoint: endpoint.into(),
            service_type: service_type.into(),
        }
    }
}

impl fmt::Display for NetworkServiceAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<NetworkServiceAgent {} {}>", self.identity, self.endpoint)
    }
}
