use clap::Parser;
use concierge_cli::Cli;
use concierge_cli::run_main;
use pretty_assertions::assert_eq;
use serde_json::Value;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

#[tokio::test]
async fn one_shot_prompt_posts_once_and_exits() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "response": "Starting from $500k." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::parse_from([
        "concierge",
        "--base-url",
        uri.as_str(),
        "--color",
        "never",
        "--json",
        "What are the prices?",
    ]);
    run_main(cli).await?;

    let received = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&received[0].body)?;
    assert_eq!(body["message"], "What are the prices?");
    assert!(
        body["session_id"]
            .as_str()
            .is_some_and(|id| id.starts_with("session_"))
    );
    Ok(())
}

#[tokio::test]
async fn unreadable_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("concierge.toml");
    let cli = Cli::parse_from([
        "concierge",
        "--config",
        missing.to_str().expect("utf-8 path"),
        "hello",
    ]);

    let err = run_main(cli).await.expect_err("missing config must fail");
    assert!(err.to_string().contains("failed to load config"), "{err:#}");
}
