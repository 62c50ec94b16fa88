// Copyright (c) 2025 - Cowboy AI, Inc.
//! NSA Discovery Documents
//!
//! A peer publishes a description of itself: its NSA id, the service
//! interfaces it exposes, the networks it hosts, and optionally the remote
//! networks it can reach and at what cost.
//!
//! ```json
//! {
//!   "id": "urn:ogf:network:bonaire:nsa",
//!   "interface": [
//!     { "type": "application/vnd.ogf.nsi.cs.v2.provider+soap",
//!       "href": "https://bonaire.example.net/NSI/services/CS2" }
//!   ],
//!   "networkId": ["urn:ogf:network:bonaire:topology"],
//!   "other": [
//!     { "topologyReachability": [ { "uri": "urn:ogf:network:curacao:topology", "cost": 1 } ] }
//!   ]
//! }
//! ```
//!
//! Only the fields the fetcher acts on are modeled; anything else in the
//! document is ignored.

use serde::{Deserialize, Serialize};

use crate::domain::{NetworkId, NetworkServiceAgent, URN_OGF_PREFIX};
use crate::errors::{FetchError, FetchResult};
use crate::reachability::ReachabilityVector;

/// Interface type of an NSI CS 2.0 provider endpoint
pub const CS2_PROVIDER: &str = "application/vnd.ogf.nsi.cs.v2.provider+soap";

/// Generic NSI CS 2.0 service type, accepted when no provider-typed interface exists
pub const CS2_SERVICE_TYPE: &str = "application/vnd.org.ogf.nsi.cs.v2+soap";

/// Parsed discovery document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsaDescription {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "interface")]
    pub interfaces: Vec<Interface>,

    #[serde(default, rename = "networkId")]
    pub network_ids: Vec<String>,

    #[serde(default)]
    pub other: Vec<OtherElement>,
}

/// Service interface advertised by an NSA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    #[serde(rename = "type")]
    pub interface_type: String,
    pub href: String,
}

/// Extension block of a discovery document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherElement {
    #[serde(default, rename = "topologyReachability")]
    pub topology_reachability: Vec<TopologyReachability>,
}

/// Peer's own distance to a remote network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyReachability {
    pub uri: String,
    pub cost: u32,
}

/// What the fetcher takes from a usable document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAdvertisement {
    pub agent: NetworkServiceAgent,
    pub networks: Vec<NetworkId>,
    pub vector: ReachabilityVector,
}

impl NsaDescription {
    pub fn parse(body: &[u8]) -> FetchResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// NSA id with the OGF prefix removed
    pub fn identity(&self) -> &str {
        self.id.strip_prefix(URN_OGF_PREFIX).unwrap_or(&self.id)
    }

    /// CS2 endpoint: a provider-typed interface if any, else a generic CS2 one
    pub fn provider_url(&self) -> Option<&str> {
        let by_type = |wanted: &str| {
            self.interfaces
                .iter()
                .find(|i| i.interface_type == wanted)
                .map(|i| i.href.as_str())
        };
        by_type(CS2_PROVIDER).or_else(|| by_type(CS2_SERVICE_TYPE))
    }

    /// Hosted network ids; ids outside the OGF namespace are dropped
    pub fn hosted_networks(&self) -> Vec<NetworkId> {
        let mut networks: Vec<NetworkId> = Vec::new();
        for id in self.network_ids.iter().filter_map(|urn| NetworkId::from_urn(urn)) {
            if !networks.contains(&id) {
                networks.push(id);
            }
        }
        networks
    }

    /// Vector a local port peering with this NSA should carry
    ///
    /// Advertised networks cost one more than the peer's own cost; networks
    /// hosted by the peer cost 1 regardless of what is advertised for them.
    pub fn reachability_vector(&self) -> ReachabilityVector {
        let mut vector = ReachabilityVector::new();
        for entry in self.other.iter().flat_map(|o| &o.topology_reachability) {
            if let Some(network) = NetworkId::from_urn(&entry.uri) {
                vector.insert(network, entry.cost.saturating_add(1));
            }
        }
        for network in self.hosted_networks() {
            vector.insert(network, 1);
        }
        vector
    }

    /// Everything the fetcher needs, or why the document is unusable
    pub fn advertisement(&self) -> FetchResult<PeerAdvertisement> {
        let endpoint = self
            .provider_url()
            .ok_or_else(|| FetchError::MissingProviderInterface {
                nsa_id: self.id.clone(),
            })?;

        Ok(PeerAdvertisement {
            agent: NetworkServiceAgent::new(self.identity(), endpoint, CS2_SERVICE_TYPE),
            networks: self.hosted_networks(),
            vector: self.reachability_vector(),
        })
    }
}
