// Copyright (c) 2025 - Cowboy AI, Inc.
//! Link Activation Backends
//!
//! Each [`Link`] of a chosen path is handed to the backend of its network,
//! which configures the ingress and egress port with a concrete VLAN. The
//! backend only ever sees single values: the committed label ranges are
//! narrowed with [`Label::pick`] before the call.
//!
//! ```text
//! Link { network, src_port, dst_port, src_label, dst_label }
//!   │ link_targets
//!   ▼
//! (Target { port, vlan }, Target { port, vlan }) ──► LinkBackend::setup_link
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Label, LabelType, Link, NetworkId};
use crate::errors::{BackendError, BackendResult};

/// One end of a cross-connect inside a network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub port: String,
    pub vlan: u16,
}

impl Target {
    pub fn new(port: impl Into<String>, vlan: u16) -> BackendResult<Self> {
        let port = port.into();
        if !(Label::MIN_VLAN..=Label::MAX_VLAN).contains(&vlan) {
            return Err(BackendError::InvalidTarget(format!(
                "VLAN {} on port {} outside [{}, {}]",
                vlan,
                port,
                Label::MIN_VLAN,
                Label::MAX_VLAN
            )));
        }
        Ok(Self { port, vlan })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.port, self.vlan)
    }
}

/// Ingress and egress targets of a link, each with the lowest usable VLAN
///
/// Fails for a link entered through a vector-advertised adjacency, whose
/// ingress port is unknown here.
pub fn link_targets(link: &Link) -> BackendResult<(Target, Target)> {
    let src_port = link.src_port.as_deref().ok_or_else(|| {
        BackendError::InvalidTarget(format!("link through {} has no known ingress port", link.network))
    })?;

    let source = Target::new(src_port, link.src_label.pick())?;
    let destination = Target::new(link.dst_port.as_str(), link.dst_label.pick())?;
    Ok((source, destination))
}

/// Activation seam of a single network
#[async_trait]
pub trait LinkBackend: Send + Sync {
    /// Configure the cross-connect between two targets
    async fn setup_link(
        &self,
        connection_id: &str,
        source: &Target,
        destination: &Target,
        bandwidth: u64,
    ) -> BackendResult<()>;

    /// Remove a cross-connect created by [`LinkBackend::setup_link`]
    async fn teardown_link(
        &self,
        connection_id: &str,
        source: &Target,
        destination: &Target,
        bandwidth: u64,
    ) -> BackendResult<()>;

    fn can_swap_label(&self, label_type: LabelType) -> bool;

    /// Fresh id for a connection handled by this backend
    fn create_connection_id(&self) -> String;
}

/// Configure one link of a path, returning the connection id used
pub async fn activate_link(
    backend: &dyn LinkBackend,
    link: &Link,
    bandwidth: u64,
) -> BackendResult<String> {
    let (source, destination) = link_targets(link)?;
    if source.vlan != destination.vlan && !backend.can_swap_label(link.src_label.label_type()) {
        return Err(BackendError::Activation(format!(
            "{} cannot swap {} to {}",
            link.network, source.vlan, destination.vlan
        )));
    }

    let connection_id = backend.create_connection_id();
    backend
        .setup_link(&connection_id, &source, &destination, bandwidth)
        .await?;
    Ok(connection_id)
}

/// Dry-run backend: logs every request and always succeeds
#[derive(Debug, Clone)]
pub struct LoggingBackend {
    network: NetworkId,
    label_swapping: bool,
}

impl LoggingBackend {
    pub fn new(network: NetworkId, label_swapping: bool) -> Self {
        Self {
            network,
            label_swapping,
        }
    }
}

#[async_trait]
impl LinkBackend for LoggingBackend {
    async fn setup_link(
        &self,
        connection_id: &str,
        source: &Target,
        destination: &Target,
        bandwidth: u64,
    ) -> BackendResult<()> {
        info!(
            network = %self.network,
            connection_id,
            source = %source,
            destination = %destination,
            bandwidth,
            "Link up"
        );
        Ok(())
    }

    async fn teardown_link(
        &self,
        connection_id: &str,
        source: &Target,
        destination: &Target,
        bandwidth: u64,
    ) -> BackendResult<()> {
        info!(
            network = %self.network,
            connection_id,
            source = %source,
            destination = %destination,
            bandwidth,
            "Link down"
        );
        Ok(())
    }

    fn can_swap_label(&self, _label_type: LabelType) -> bool {
        self.label_swapping
    }

    fn create_connection_id(&self) -> String {
        format!("{}-{}", self.network, Uuid::now_v7())
    }
}
