//! Bearer tokens must not appear in Debug output or error messages.

use pasterun::{PasteClient, RequestOption};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use crate::support::socket_guard::start_mock_server_or_skip;

const TOKEN: &str = "tok-7f3a9c-secret";

#[test]
fn p0_client_debug_does_not_contain_token() {
    let client = PasteClient::with_options([RequestOption::token(TOKEN)]).unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains(TOKEN), "client Debug leaked token: {debug}");
}

#[tokio::test]
async fn p0_fetched_paste_debug_does_not_contain_token() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x"))
        .mount(&server)
        .await;

    let client = PasteClient::with_options([
        RequestOption::base_url(server.uri()),
        RequestOption::token(TOKEN),
    ])
    .unwrap();
    let info = client.get("abc", []).await.unwrap();

    let debug = format!("{info:?}");
    assert!(!debug.contains(TOKEN), "PasteInfo Debug leaked token: {debug}");
}

#[tokio::test]
async fn p0_server_error_does_not_contain_token() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = PasteClient::with_options([
        RequestOption::base_url(server.uri()),
        RequestOption::token(TOKEN),
    ])
    .unwrap();
    let err = client
        .upload(std::io::Cursor::new(b"x".to_vec()), [])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unauthorized");
    assert!(!format!("{err:?}").contains(TOKEN));
}
