//! Connection refusals and timeouts map to distinct errors.

use std::net::TcpListener;
use std::time::Duration;

use pasterun::{PasteClient, PasteError, RequestOption};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use crate::support::readers::PatternReader;
use crate::support::socket_guard::{should_skip_socket_bound_test, start_mock_server_or_skip};

/// A localhost URL with nothing listening on it.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

#[tokio::test]
async fn p0_connection_refused_is_network_error() {
    if should_skip_socket_bound_test() {
        return;
    }
    let client = PasteClient::with_options([RequestOption::base_url(closed_port_url())]).unwrap();

    let err = client.get("abc", []).await.unwrap_err();
    match err {
        PasteError::Network { url, .. } => assert!(url.ends_with("/abc?raw")),
        other => panic!("Expected Network error, got: {other:?}"),
    }
}

#[tokio::test]
async fn p0_upload_connection_refused_is_not_payload_error() {
    if should_skip_socket_bound_test() {
        return;
    }
    let client = PasteClient::with_options([RequestOption::base_url(closed_port_url())]).unwrap();

    let err = client
        .upload(PatternReader::new(64 * 1024), [])
        .await
        .unwrap_err();
    assert!(matches!(err, PasteError::Network { .. }), "got: {err:?}");
}

#[tokio::test]
async fn p0_slow_server_with_short_transport_timeout_is_timeout() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = PasteClient::with_options([
        RequestOption::base_url(server.uri()),
        RequestOption::transport(transport),
    ])
    .unwrap();

    let err = client.get("abc", []).await.unwrap_err();
    assert!(matches!(err, PasteError::Timeout { .. }), "got: {err:?}");
}

#[tokio::test]
async fn p0_malformed_base_url_fails_before_dispatch() {
    let client = PasteClient::with_options([RequestOption::base_url("not a url")]).unwrap();
    let err = client.get_languages([]).await.unwrap_err();
    assert!(matches!(err, PasteError::InvalidUrl { .. }));
    assert!(err.is_config());
}
