// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - WAF Fingerprint Tests
 * Signature checks against mock servers, run-once behaviour
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use lonkero_mutator::errors::ScannerError;
use lonkero_mutator::http_client::HttpClient;
use lonkero_mutator::request::FuzzableRequest;
use lonkero_mutator::scanners::WafFingerprinter;
use lonkero_mutator::types::FindingsStore;
use lonkero_mutator::worker::ProbePool;
use std::sync::Arc;
use wiremock::{
    matchers::{header_exists, method},
    Mock, MockServer, ResponseTemplate,
};

fn fingerprinter() -> WafFingerprinter {
    let client = HttpClient::new(5, 0).unwrap().with_cache(100, 60);
    WafFingerprinter::new(Arc::new(client), ProbePool::new(4, 16))
}

async fn target(server: &MockServer) -> FuzzableRequest {
    FuzzableRequest::get(&format!("{}/", server.uri())).unwrap()
}

#[tokio::test]
async fn test_plain_server_has_no_findings() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&mock_server)
        .await;

    let findings = fingerprinter()
        .discover(&target(&mock_server).await)
        .await
        .unwrap();
    assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
}

#[tokio::test]
async fn test_teros_cookie() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "st8id=1e1bcc1010b6de32734c584317443b31; path=/"),
        )
        .mount(&mock_server)
        .await;

    let scanner = fingerprinter();
    let findings = scanner.discover(&target(&mock_server).await).await.unwrap();

    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.name, "Found TEROS");
    assert_eq!(
        finding.detail.as_deref(),
        Some("st8id=1e1bcc1010b6de32734c584317443b31; path=/")
    );
    assert!(finding
        .description
        .starts_with("The remote network seems to have a \"TEROS\" WAF deployed"));
    assert!(scanner.findings().has_vendor("TEROS"));
}

#[tokio::test]
async fn test_binarysec_server_banner() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("Server", "BinarySec/3.2.2"))
        .mount(&mock_server)
        .await;

    let findings = fingerprinter()
        .discover(&target(&mock_server).await)
        .await
        .unwrap();

    let vendors: Vec<&str> = findings.iter().map(|f| f.vendor.as_str()).collect();
    assert_eq!(vendors, vec!["BinarySec"]);
    assert_eq!(findings[0].detail.as_deref(), Some("BinarySec/3.2.2"));
}

#[tokio::test]
async fn test_urlscan_rejects_if_header() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("If"))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let findings = fingerprinter()
        .discover(&target(&mock_server).await)
        .await
        .unwrap();

    let urlscan: Vec<_> = findings.iter().filter(|f| f.vendor == "URLScan").collect();
    assert_eq!(urlscan.len(), 1);
    assert_eq!(urlscan[0].detail, None);
}

#[tokio::test]
async fn test_urlscan_skipped_when_page_is_missing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let findings = fingerprinter()
        .discover(&target(&mock_server).await)
        .await
        .unwrap();
    assert!(findings.iter().all(|f| f.vendor != "URLScan"));
}

#[tokio::test]
async fn test_discover_runs_once() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let scanner = fingerprinter();
    let request = target(&mock_server).await;
    assert!(scanner.discover(&request).await.is_ok());

    match scanner.discover(&request).await {
        Err(ScannerError::AlreadyExecuted { plugin }) => assert_eq!(plugin, "fingerprint_waf"),
        other => panic!("expected AlreadyExecuted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_network_failures_are_contained() {
    let client = HttpClient::new(2, 0).unwrap();
    let store = FindingsStore::new();
    let scanner = WafFingerprinter::new(Arc::new(client), ProbePool::new(3, 4))
        .with_findings(store.clone());

    let request = FuzzableRequest::get("http://127.0.0.1:1/").unwrap();
    let findings = scanner.discover(&request).await.unwrap();

    assert!(findings.is_empty());
    assert!(store.is_empty());
}
