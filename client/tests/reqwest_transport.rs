use concierge_client::HttpTransport;
use concierge_client::ReqwestTransport;
use concierge_client::Request;
use concierge_client::TransportError;
use http::Method;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_json;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn post(url: String) -> Request {
    Request::new(Method::POST, url).with_json(&json!({ "message": "hello" }))
}

#[tokio::test]
async fn execute_posts_json_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hi" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(reqwest::Client::new());
    let response = transport
        .execute(post(format!("{}/chat", server.uri())))
        .await
        .expect("request should succeed");

    assert_eq!(response.status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({ "response": "hi" }));
}

#[tokio::test]
async fn non_success_status_is_http_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Internal server error" })),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(reqwest::Client::new());
    let err = transport
        .execute(post(format!("{}/chat", server.uri())))
        .await
        .expect_err("500 should be an error");

    match err {
        TransportError::Http { status, body, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.unwrap_or_default().contains("Internal server error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn request_timeout_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(reqwest::Client::new());
    let err = transport
        .execute(post(format!("{}/chat", server.uri())).with_timeout(Duration::from_millis(50)))
        .await
        .expect_err("delayed response should time out");

    assert!(matches!(err, TransportError::Timeout), "got {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Bind and immediately drop a listener so the port is known to be closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let transport = ReqwestTransport::new(reqwest::Client::new());
    let err = transport
        .execute(post(format!("{uri}/chat")))
        .await
        .expect_err("closed port should fail");

    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
}
