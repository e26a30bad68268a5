//! Live executor contract tests
//!
//! Each provider is replaced by a local mock server. These tests verify:
//! - Request shape (path, query parameters, auth) per provider
//! - Response normalization for each provider layout
//! - Error mapping for non-success statuses, malformed bodies and missing credentials

use deep_search::models::options::CodeHostOptions;
use deep_search::{
    LiveConfig, LiveExecutor, ProviderError, QueryDispatcher, SearchError, SearchOptions,
    SearchType, SourceIcon,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn google_config(server: &MockServer) -> LiveConfig {
    LiveConfig {
        google_api_key: Some("test-key".into()),
        google_cx: Some("test-cx".into()),
        google_base_url: server.uri(),
        ..Default::default()
    }
}

fn dispatcher(config: LiveConfig) -> QueryDispatcher<LiveExecutor> {
    QueryDispatcher::with_executor(LiveExecutor::new(config).unwrap())
}

fn defaults(search_type: SearchType) -> SearchOptions {
    SearchOptions::default_for(search_type)
}

fn provider_error(err: SearchError) -> ProviderError {
    match err {
        SearchError::Provider { source, .. } => source,
        other => panic!("expected provider error, got {other}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Web search (document host, FTP and directory indexes)
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_google_request_and_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("q", r#"site:drive.google.com filetype:pdf "budget""#))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "customsearch#search",
            "items": [
                {"title": "Budget 2025.pdf", "link": "https://drive.google.com/file/d/abc/view", "snippet": "Draft budget"},
                {"title": "Old budget", "link": "https://drive.google.com/file/d/def/view", "snippet": "2019"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = dispatcher(google_config(&server))
        .execute(SearchType::GenericDrive, "budget", &defaults(SearchType::GenericDrive))
        .await
        .unwrap();

    assert_eq!(envelope.items.len(), 2);
    assert_eq!(envelope.items[0].title, "Budget 2025.pdf");
    assert_eq!(envelope.items[0].url, "https://drive.google.com/file/d/abc/view");
    assert_eq!(envelope.items[0].description, "Draft budget");
    assert_eq!(envelope.items[0].source_icon, Some(SourceIcon::Drive));
}

#[tokio::test]
async fn test_google_without_items_is_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "customsearch#search",
            "searchInformation": {"totalResults": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = dispatcher(google_config(&server))
        .execute(SearchType::FtpIndex, "nothing here", &defaults(SearchType::FtpIndex))
        .await
        .unwrap();
    assert!(envelope.is_empty());
    assert_eq!(
        envelope.built_query_string,
        r#"intitle:"index of" "nothing here" -html -htm -php"#
    );
}

#[tokio::test]
async fn test_google_error_status_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Quota exceeded for quota metric"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = dispatcher(google_config(&server))
        .execute(SearchType::DirectoryIndex, "backup", &defaults(SearchType::DirectoryIndex))
        .await
        .unwrap_err();

    match provider_error(err) {
        ProviderError::Status { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("Quota exceeded"));
        }
        other => panic!("unexpected provider error: {other}"),
    }
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
        .mount(&server)
        .await;

    let err = dispatcher(google_config(&server))
        .execute(SearchType::GenericDrive, "budget", &defaults(SearchType::GenericDrive))
        .await
        .unwrap_err();
    assert!(matches!(provider_error(err), ProviderError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\": [ truncated"))
        .mount(&server)
        .await;

    let err = dispatcher(google_config(&server))
        .execute(SearchType::GenericDrive, "budget", &defaults(SearchType::GenericDrive))
        .await
        .unwrap_err();
    assert!(matches!(provider_error(err), ProviderError::Parse(_)));
}

#[tokio::test]
async fn test_missing_google_credentials_make_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let config = LiveConfig { google_base_url: server.uri(), ..Default::default() };
    let err = dispatcher(config)
        .execute(SearchType::GenericDrive, "budget", &defaults(SearchType::GenericDrive))
        .await
        .unwrap_err();
    assert!(matches!(provider_error(err), ProviderError::MissingCredentials(_)));
}

#[tokio::test]
async fn test_proxy_receives_query_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({
            "query": r#"intitle:"index of" "parent directory" "backup" -html -htm -php"#
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"title": "Index of /backup", "link": "http://files.example.org/backup/", "snippet": "Parent Directory"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config =
        LiveConfig { proxy_url: Some(format!("{}/api/search", server.uri())), ..Default::default() };
    let envelope = dispatcher(config)
        .execute(SearchType::DirectoryIndex, "backup", &defaults(SearchType::DirectoryIndex))
        .await
        .unwrap();

    assert_eq!(envelope.items.len(), 1);
    assert_eq!(envelope.items[0].url, "http://files.example.org/backup/");
    assert_eq!(envelope.items[0].source_icon, Some(SourceIcon::Folder));
}

#[tokio::test]
async fn test_proxy_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Missing query"})))
        .mount(&server)
        .await;

    let config = LiveConfig { proxy_url: Some(server.uri()), ..Default::default() };
    let err = dispatcher(config)
        .execute(SearchType::FtpIndex, "dump", &defaults(SearchType::FtpIndex))
        .await
        .unwrap_err();

    match provider_error(err) {
        ProviderError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing query");
        }
        other => panic!("unexpected provider error: {other}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Code host
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_github_code_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/code"))
        .and(query_param("q", r#""secret" ext:env OR ext:yml org:acme"#))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "name": ".env",
                "path": "deploy/.env",
                "html_url": "https://github.com/acme/api/blob/main/deploy/.env",
                "repository": {"full_name": "acme/api"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = LiveConfig {
        github_token: Some("ghp_test".into()),
        github_base_url: server.uri(),
        ..Default::default()
    };
    let options = SearchOptions::CodeHost(CodeHostOptions {
        extensions: vec!["env".into(), "yml".into()],
        organization: Some("acme".into()),
    });
    let envelope = dispatcher(config).execute(SearchType::CodeHost, "secret", &options).await.unwrap();

    assert_eq!(envelope.items.len(), 1);
    assert_eq!(envelope.items[0].title, ".env");
    assert_eq!(envelope.items[0].description, "acme/api: deploy/.env");
    assert_eq!(envelope.items[0].source_icon, Some(SourceIcon::Repository));
}

#[tokio::test]
async fn test_github_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/code"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let config = LiveConfig {
        github_token: Some("expired".into()),
        github_base_url: server.uri(),
        ..Default::default()
    };
    let err = dispatcher(config)
        .execute(SearchType::CodeHost, "secret", &defaults(SearchType::CodeHost))
        .await
        .unwrap_err();

    match provider_error(err) {
        ProviderError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("unexpected provider error: {other}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Device index
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_shodan_host_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shodan/host/search"))
        .and(query_param("key", "shodan-key"))
        .and(query_param("query", r#"webcam "lobby""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "matches": [{
                "ip_str": "203.0.113.9",
                "port": 8080,
                "org": "Example Hosting",
                "hostnames": [],
                "data": "HTTP/1.1 200 OK\r\nServer: webcam"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = LiveConfig {
        shodan_api_key: Some("shodan-key".into()),
        shodan_base_url: server.uri(),
        ..Default::default()
    };
    let envelope = dispatcher(config)
        .execute(SearchType::DeviceIndex, "lobby", &defaults(SearchType::DeviceIndex))
        .await
        .unwrap();

    assert_eq!(envelope.items.len(), 1);
    assert_eq!(envelope.items[0].title, "203.0.113.9:8080");
    assert_eq!(envelope.items[0].url, "https://www.shodan.io/host/203.0.113.9");
    assert_eq!(envelope.items[0].description, "Example Hosting | HTTP/1.1 200 OK");
    assert_eq!(envelope.items[0].source_icon, Some(SourceIcon::Device));
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    // Nothing listens on the discard port
    let config = LiveConfig {
        shodan_api_key: Some("k".into()),
        shodan_base_url: "http://127.0.0.1:9".into(),
        timeout_seconds: 2,
        ..Default::default()
    };
    let err = dispatcher(config)
        .execute(SearchType::DeviceIndex, "lobby", &defaults(SearchType::DeviceIndex))
        .await
        .unwrap_err();
    assert!(matches!(provider_error(err), ProviderError::Transport(_)));
}
