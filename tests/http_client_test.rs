// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HTTP Client Tests
 * Tests for caching, mutant sending and response capture
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use lonkero_mutator::fuzzer::{CapabilitySet, MutantFactory};
use lonkero_mutator::http_client::HttpClient;
use lonkero_mutator::request::{Cookie, FieldKind, Form, FuzzableRequest, RequestBody};
use wiremock::{
    matchers::{body_string, body_string_contains, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_http_client_get_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Success"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(30, 0).unwrap();
    let url = format!("{}/test", &mock_server.uri());
    let response = client.get(&url).await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "Success");
}

#[tokio::test]
async fn test_http_client_caching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cacheable"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Cached response"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(30, 0).unwrap().with_cache(100, 60);
    let url = format!("{}/cacheable", &mock_server.uri());

    let response1 = client.get_cached(&url, Vec::new()).await.unwrap();
    let response2 = client.get_cached(&url, Vec::new()).await.unwrap();

    assert_eq!(response2.body, response1.body);
    assert_eq!(response2.id, response1.id);
}

#[tokio::test]
async fn test_http_client_cache_key_includes_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keyed"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(30, 0).unwrap().with_cache(100, 60);
    let url = format!("{}/keyed", &mock_server.uri());

    let plain = client.get_cached(&url, Vec::new()).await.unwrap();
    let with_header = client
        .get_cached(&url, vec![("Translate".to_string(), "f".to_string())])
        .await
        .unwrap();
    let again = client
        .get_cached(&url, vec![("translate".to_string(), "f".to_string())])
        .await
        .unwrap();

    assert_ne!(plain.id, with_header.id);
    assert_eq!(with_header.id, again.id);
}

#[tokio::test]
async fn test_http_client_keeps_every_set_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Set-Cookie", "a=1")
                .append_header("Set-Cookie", "AL_SESS=xyz"),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(30, 0).unwrap();
    let response = client.get(&mock_server.uri()).await.unwrap();

    assert_eq!(response.set_cookies.len(), 2);
    assert!(response.set_cookies.iter().any(|c| c == "AL_SESS=xyz"));
}

#[tokio::test]
async fn test_http_client_sends_post_mutant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(query_param("action", "login"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("Cookie", "sid=1"))
        .and(body_string("user=%27&pass=secret"))
        .respond_with(ResponseTemplate::new(500).set_body_string("SQL syntax error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = FuzzableRequest::post(
        &format!("{}/login?action=login", mock_server.uri()),
        RequestBody::Raw("user=admin&pass=secret".to_string()),
    )
    .unwrap()
    .with_cookie(Cookie::parse("sid=1"));

    let mutants = MutantFactory::new(CapabilitySet::default())
        .create_mutants(&request, &["'".to_string()], false, &[], None)
        .unwrap();

    let client = HttpClient::new(30, 0).unwrap();
    let response = client.send(mutants[0].request()).await.unwrap();

    assert_eq!(response.status_code, 500);
    assert!(response.contains("SQL syntax"));
}

#[tokio::test]
async fn test_http_client_sends_multipart_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("<?php echo 1; ?>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut form = Form::new();
    form.add_input("doc", FieldKind::File, "");
    let request = FuzzableRequest::post(
        &format!("{}/upload", mock_server.uri()),
        RequestBody::Form(form),
    )
    .unwrap();

    let capabilities = CapabilitySet {
        fuzz_file_content: true,
        ..CapabilitySet::default()
    };
    let mutants = MutantFactory::new(capabilities)
        .create_mutants(&request, &["<?php echo 1; ?>".to_string()], false, &[], None)
        .unwrap();
    assert_eq!(mutants.len(), 1);

    let client = HttpClient::new(30, 0).unwrap();
    let response = client.send(mutants[0].request()).await.unwrap();
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_http_client_does_not_follow_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(30, 0).unwrap();
    let response = client
        .get(&format!("{}/old", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status_code, 302);
    assert_eq!(response.header("location").as_deref(), Some("/new"));
}

#[tokio::test]
async fn test_http_client_error_handling() {
    let client = HttpClient::new(2, 1).unwrap();
    let result = client.get("http://127.0.0.1:1/unreachable").await;
    assert!(result.is_err());
}
