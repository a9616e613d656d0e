//! Integration tests for the language catalog.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use pasterun::{LanguageInfo, PasteClient, PasteError, RequestOption};
use support::socket_guard::start_mock_server_or_skip;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PasteClient {
    PasteClient::with_options([RequestOption::base_url(server.uri())]).unwrap()
}

const CATALOG: &str = r#"{"q":"c","results":[
    {"name":"C","class":".c","mode":"clike"},
    {"name":"C++","class":".cpp","mode":"clike"},
    {"name":"C#","class":".cs"}
]}"#;

#[tokio::test]
async fn test_languages_preserve_server_order() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/languages"))
        .and(query_param("q", "c"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG))
        .expect(1)
        .mount(&server)
        .await;

    let languages = client_for(&server)
        .get_languages([RequestOption::query("c")])
        .await
        .unwrap();

    let names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["C", "C++", "C#"]);
    assert_eq!(
        languages[2],
        LanguageInfo {
            name: "C#".into(),
            class: ".cs".into(),
            mode: None,
        }
    );
}

#[tokio::test]
async fn test_languages_query_is_escaped() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/languages"))
        .and(query_param("q", "c++"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let languages = client_for(&server)
        .get_languages([RequestOption::query("c++")])
        .await
        .unwrap();
    assert!(languages.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("q=c%2B%2B"));
}

#[tokio::test]
async fn test_languages_without_query_omits_parameter() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG))
        .mount(&server)
        .await;

    let languages = client_for(&server).get_languages([]).await.unwrap();
    assert_eq!(languages.len(), 3);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_languages_caller_accept_header_wins() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(header("accept", "application/vnd.paste+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG))
        .expect(1)
        .mount(&server)
        .await;

    let languages = client_for(&server)
        .get_languages([RequestOption::headers([
            "Accept",
            "application/vnd.paste+json",
        ])])
        .await
        .unwrap();
    assert_eq!(languages.len(), 3);
}

#[tokio::test]
async fn test_languages_server_error_reports_body_text() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("  maintenance  "))
        .mount(&server)
        .await;

    let err = client_for(&server).get_languages([]).await.unwrap_err();
    assert_eq!(err.to_string(), "maintenance");
    assert!(matches!(err, PasteError::Server { status: 503, .. }));
}

#[tokio::test]
async fn test_languages_malformed_json_is_decode_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_languages([]).await.unwrap_err();
    assert!(matches!(err, PasteError::Decode { .. }));
}
