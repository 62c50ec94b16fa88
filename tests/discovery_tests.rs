// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for peer discovery
//!
//! Drives [`FetcherService`] against in-memory discovery documents and checks
//! the effect on path computation: a peer's advertisement extends what the
//! local domain can reach.

mod fixtures;

use async_trait::async_trait;
use fixtures::*;
use nsi_topology::discovery::{CS2_PROVIDER, CS2_SERVICE_TYPE};
use nsi_topology::domain::{NetworkId, NetworkServiceAgent};
use nsi_topology::{
    DiscoveryConfig, DocumentSource, FetchError, FetchOutcome, FetchResult, FetcherService,
    PeerDescriptor, ProviderRegistry,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BONAIRE_URL: &str = "http://bonaire.test/nsa-discovery";
const DOMINICA_URL: &str = "http://dominica.test/nsa-discovery";

#[derive(Default)]
struct StaticDocuments {
    documents: Mutex<HashMap<String, String>>,
}

impl StaticDocuments {
    fn publish(&self, url: &str, document: serde_json::Value) {
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), document.to_string());
    }
}

#[async_trait]
impl DocumentSource for StaticDocuments {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .map(|d| d.clone().into_bytes())
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[derive(Default)]
struct Providers {
    spawned: Mutex<Vec<(NetworkServiceAgent, NetworkId)>>,
}

impl ProviderRegistry for Providers {
    fn spawn_provider(&self, agent: &NetworkServiceAgent, network: &NetworkId) {
        self.spawned
            .lock()
            .unwrap()
            .push((agent.clone(), network.clone()));
    }
}

struct Setup {
    finder: nsi_topology::PathFinder,
    documents: Arc<StaticDocuments>,
    providers: Arc<Providers>,
    fetcher: FetcherService,
}

fn setup(peers: &[&str]) -> Setup {
    let finder = four_islands(&[]);
    let documents = Arc::new(StaticDocuments::default());
    let providers = Arc::new(Providers::default());
    let config =
        DiscoveryConfig::with_peers(peers.iter().map(|url| PeerDescriptor::new(*url).unwrap()));

    let fetcher = FetcherService::new(
        &config,
        Arc::clone(finder.graph()),
        Arc::clone(&documents) as Arc<dyn DocumentSource>,
        Arc::clone(&providers) as Arc<dyn ProviderRegistry>,
    );

    Setup {
        finder,
        documents,
        providers,
        fetcher,
    }
}

fn bonaire_document(interface_type: Option<&str>) -> serde_json::Value {
    let interfaces: Vec<serde_json::Value> = interface_type
        .map(|t| json!({ "type": t, "href": "https://bonaire.test/NSI/CS2" }))
        .into_iter()
        .collect();
    json!({
        "id": "urn:ogf:network:bonaire:nsa",
        "interface": interfaces,
        "networkId": ["urn:ogf:network:bonaire:topology"],
        "other": [{ "topologyReachability": [
            { "uri": "urn:ogf:network:saba:topology", "cost": 1 },
            { "uri": "urn:ogf:network:statia:topology", "cost": 2 }
        ] }]
    })
}

#[tokio::test]
async fn test_advertisement_feeds_vectors_and_providers() {
    let s = setup(&[BONAIRE_URL]);
    s.documents.publish(BONAIRE_URL, bonaire_document(Some(CS2_PROVIDER)));

    s.fetcher.run_round().await;

    // every local port peering with bonaire carries the vector
    let vectors = s.finder.graph().link_vectors();
    for (network, port) in [(ARUBA, "bon"), (CURACAO, "bon"), (DOMINICA, "bon")] {
        let vector = vectors.vector_for(&id(network), port);
        assert_eq!(vector.cost(&id(BONAIRE)), Some(1), "{} {}", network, port);
        assert_eq!(vector.cost(&id("saba:topology")), Some(2));
        assert_eq!(vector.cost(&id("statia:topology")), Some(3));
    }
    assert!(vectors.vector_for(&id(ARUBA), "dom").is_empty());

    let spawned = s.providers.spawned.lock().unwrap().clone();
    assert_eq!(
        spawned,
        vec![(
            NetworkServiceAgent::new("bonaire:nsa", "https://bonaire.test/NSI/CS2", CS2_SERVICE_TYPE),
            id(BONAIRE)
        )]
    );
}

#[tokio::test]
async fn test_discovered_network_becomes_routable() {
    let s = setup(&[BONAIRE_URL]);
    let saba = stp("saba:topology", "ps");

    let before = s
        .finder
        .find_paths(&stp(ARUBA, "ps"), &saba, 100, &request_label());
    assert!(matches!(before, Err(nsi_topology::TopologyError::NotFound(_))));

    s.documents.publish(BONAIRE_URL, bonaire_document(Some(CS2_PROVIDER)));
    s.fetcher.run_round().await;

    let paths = s
        .finder
        .find_paths(&stp(ARUBA, "ps"), &saba, 100, &request_label())
        .unwrap();
    assert!(!paths.is_empty());
    assert_eq!(
        route_of(&paths[0]),
        vec![ARUBA.to_string(), "saba:topology".to_string()]
    );
    assert!(paths.iter().all(|p| p.is_simple()));
    assert_eq!(
        s.finder.graph().link_vectors().best_port(&id(ARUBA), &id("saba:topology")),
        Some(("bon".to_string(), 2))
    );
}

#[tokio::test]
async fn test_document_without_cs2_interface_changes_nothing() {
    let s = setup(&[BONAIRE_URL]);
    s.documents.publish(BONAIRE_URL, bonaire_document(None));

    let results = s.fetcher.run_round().await;

    assert!(matches!(
        &results[0].1,
        FetchOutcome::Failed(FetchError::MissingProviderInterface { nsa_id }) if nsa_id == "urn:ogf:network:bonaire:nsa"
    ));
    assert!(s.providers.spawned.lock().unwrap().is_empty());
    assert_eq!(s.finder.graph().link_vectors().generation(), 0);
}

#[tokio::test]
async fn test_generic_service_type_accepted() {
    let s = setup(&[BONAIRE_URL]);
    s.documents.publish(BONAIRE_URL, bonaire_document(Some(CS2_SERVICE_TYPE)));

    let results = s.fetcher.run_round().await;
    assert!(matches!(results[0].1, FetchOutcome::Applied { .. }));
    assert_eq!(s.providers.spawned.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_newer_document_replaces_vector() {
    let s = setup(&[BONAIRE_URL]);
    s.documents.publish(BONAIRE_URL, bonaire_document(Some(CS2_PROVIDER)));
    s.fetcher.run_round().await;

    s.documents.publish(
        BONAIRE_URL,
        json!({
            "id": "urn:ogf:network:bonaire:nsa",
            "interface": [{ "type": CS2_PROVIDER, "href": "https://bonaire.test/NSI/CS2" }],
            "networkId": ["urn:ogf:network:bonaire:topology"]
        }),
    );
    s.fetcher.run_round().await;

    let vector = s.finder.graph().link_vectors().vector_for(&id(ARUBA), "bon");
    assert_eq!(vector.len(), 1);
    assert!(!vector.contains(&id("saba:topology")));
}

#[tokio::test]
async fn test_one_failing_peer_does_not_block_others() {
    let s = setup(&[DOMINICA_URL, BONAIRE_URL]);
    s.documents.publish(BONAIRE_URL, bonaire_document(Some(CS2_PROVIDER)));

    let results = s.fetcher.run_round().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0.url(), DOMINICA_URL);
    assert_eq!(
        results[0].1,
        FetchOutcome::Failed(FetchError::Status {
            url: DOMINICA_URL.to_string(),
            status: 404
        })
    );
    assert!(matches!(results[1].1, FetchOutcome::Applied { updated_ports: 3, .. }));

    let status = s.fetcher.peer_status();
    assert_eq!(status[DOMINICA_URL].consecutive_failures, 1);
    assert_eq!(status[BONAIRE_URL].consecutive_failures, 0);
}

#[tokio::test(start_paused = true)]
async fn test_background_rounds_follow_backoff() {
    let s = setup(&[BONAIRE_URL]);
    s.documents.publish(BONAIRE_URL, bonaire_document(Some(CS2_PROVIDER)));

    assert_eq!(s.fetcher.current_interval(), Duration::from_secs(5));
    s.fetcher.start();

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(s.finder.graph().link_vectors().generation(), 0);

    // first round at 5s, second at 15s
    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(s.fetcher.rounds(), 2);
    assert_eq!(s.fetcher.current_interval(), Duration::from_secs(20));
    assert!(s.finder.graph().link_vectors().generation() > 0);

    s.fetcher.stop().await;
    let rounds = s.fetcher.rounds();
    tokio::time::sleep(Duration::from_secs(7200)).await;
    assert_eq!(s.fetcher.rounds(), rounds);
}
