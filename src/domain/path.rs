// Copyright (c) 2025 - Cowboy AI, Inc.
//! Path Value Objects
//!
//! A [`Path`] is what path computation hands back to the reservation layer:
//! one [`Link`] per network traversed, source network first.
//!
//! Links are computed fresh for every request and never stored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::label::Label;
use super::network::NetworkId;

/// Transit through one network on a candidate path
///
/// `src_label` is the label committed on the ingress port, `dst_label` on the
/// egress port. For networks that cannot swap labels the two are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub network: NetworkId,
    /// Ingress port; `None` when the network was reached through a
    /// vector-advertised adjacency whose far port is unknown
    pub src_port: Option<String>,
    /// Egress port; for the terminal network this is the destination STP port
    pub dst_port: String,
    pub src_label: Label,
    pub dst_label: Label,
}

impl Link {
    /// Whether the link keeps the same label across the network
    pub fn is_label_preserving(&self) -> bool {
        self.src_label == self.dst_label
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}#{} -> {}#{}]",
            self.network,
            self.src_port.as_deref().unwrap_or("?"),
            self.src_label,
            self.dst_port,
            self.dst_label
        )
    }
}

/// Ordered sequence of links from the source network to the destination network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    links: Vec<Link>,
}

impl Path {
    pub fn new(links: Vec<Link>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn into_links(self) -> Vec<Link> {
        self.links
    }

    /// Number of networks traversed
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of inter-domain adjacencies crossed
    pub fn hop_count(&self) -> usize {
        self.links.len().saturating_sub(1)
    }

    pub fn networks(&self) -> impl Iterator<Item = &NetworkId> {
        self.links.iter().map(|l| &l.network)
    }

    pub fn first(&self) -> Option<&Link> {
        self.links.first()
    }

    pub fn last(&self) -> Option<&Link> {
        self.links.last()
    }

    /// No network appears twice
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::new();
        self.links.iter().all(|l| seen.insert(&l.network))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.links.iter().map(Link::to_string).collect();
        write!(f, "{}", parts.join(" => "))
    }
}

impl IntoIterator for Path {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(network: &str, label: &str) -> Link {
        let label: Label = label.parse().unwrap();
        Link {
            network: NetworkId::new(network).unwrap(),
            src_port: Some("in".to_string()),
            dst_port: "out".to_string(),
            src_label: label,
            dst_label: label,
        }
    }

    #[test]
    fn test_path_lengths() {
        let path = Path::new(vec![link("a", "10-20"), link("b", "10-20"), link("c", "10")]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.hop_count(), 2);
        assert!(path.is_simple());
        assert_eq!(path.first().unwrap().network.as_str(), "a");
    }

    #[test]
    fn test_repeated_network_is_not_simple() {
        let path = Path::new(vec![link("a", "10"), link("b", "10"), link("a", "10")]);
        assert!(!path.is_simple());
    }

    #[test]
    fn test_display() {
        let path = Path::new(vec![link("a", "10-20"), link("b", "15")]);
        assert_eq!(path.to_string(), "a[in#10-20 -> out#10-20] => b[in#15 -> out#15]");
    }
}
