// Copyright (c) 2025 - Cowboy AI, Inc.
//! NSI Discovery Service
//!
//! Polls peer discovery documents and keeps the local reachability table
//! current, logging it periodically.
//!
//! Run with: NSI_CONFIG=/etc/nsi/topology.json cargo run --bin nsi-discovery
//!
//! Log level follows RUST_LOG (default: info).

use anyhow::{Context, Result};
use nsi_topology::{
    DocumentSource, FetcherService, HttpDocumentSource, LoggingProviderRegistry,
    ProviderRegistry, ServiceConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting NSI discovery service");

    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    info!(
        networks = config.networks.len(),
        peers = config.discovery.peers.len(),
        max_hops = config.pathfinding.max_hops,
        "Configuration loaded"
    );

    let graph = Arc::new(
        config
            .build_topology()
            .context("Failed to build topology")?,
    );
    let source = HttpDocumentSource::new(config.discovery.timeout())
        .context("Failed to create HTTP client")?;

    let fetcher = FetcherService::new(
        &config.discovery,
        Arc::clone(&graph),
        Arc::new(source) as Arc<dyn DocumentSource>,
        Arc::new(LoggingProviderRegistry) as Arc<dyn ProviderRegistry>,
    );
    fetcher.start();

    let mut report = tokio::time::interval(Duration::from_secs(config.report_interval_secs));
    let mut last_generation = None;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Shutdown requested");
                break;
            }
            _ = report.tick() => {
                let vectors = graph.link_vectors();
                let generation = vectors.generation();
                if last_generation == Some(generation) {
                    continue;
                }
                last_generation = Some(generation);

                let table = vectors.reachability();
                info!(generation, destinations = table.len(), "Reachability table");
                for (network, cost) in table.by_cost() {
                    info!(network = %network, cost, "  reachable");
                }
            }
        }
    }

    fetcher.stop().await;

    for (peer, status) in fetcher.peer_status() {
        info!(
            peer = %peer,
            nsa = status.nsa_id.as_deref().unwrap_or("-"),
            failures = status.consecutive_failures,
            "Peer status at shutdown"
        );
    }

    info!("NSI discovery service stopped");
    Ok(())
}
