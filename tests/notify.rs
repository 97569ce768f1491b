// ABOUTME: Tests for the webhook notifier.
// ABOUTME: Covers custom-block loading, payload delivery, and failure isolation.

use mockito::Matcher;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use stevedore::error::Error;
use stevedore::notify::{CustomBlocks, Notifier, RunContext, Settings};

fn context() -> RunContext {
    RunContext {
        repository: "acme/shop".to_string(),
        branch: "refs/heads/main".to_string(),
        event: "push".to_string(),
        commit: "abc123".to_string(),
        run_id: "7".to_string(),
    }
}

/// Give the spawned send a moment to reach the mock server.
async fn until_matched(mock: &mockito::Mock) {
    for _ in 0..200 {
        if mock.matched_async().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn default_blocks_reach_the_webhook() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .match_body(Matcher::PartialJson(json!({"channel": "#deploys"})))
        .with_status(200)
        .create_async()
        .await;

    let settings = Settings {
        webhook_url: Some(format!("{}/hook", server.url())),
        channel: Some("#deploys".to_string()),
        ..Default::default()
    };
    let notifier = Notifier::from_settings(settings, context()).unwrap();
    notifier.deploy_succeeded();

    until_matched(&mock).await;
    mock.assert_async().await;
}

#[tokio::test]
async fn supplying_all_three_documents_selects_the_custom_blocks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .match_body(Matcher::PartialJson(json!({
            "blocks": [{"type": "divider"}]
        })))
        .with_status(200)
        .create_async()
        .await;

    let custom = CustomBlocks {
        waiting: json!([{"type": "divider"}]),
        success: json!([{"type": "divider"}]),
        failure: json!([{"type": "divider"}]),
    };
    let settings = Settings {
        webhook_url: Some(format!("{}/hook", server.url())),
        custom: Some(custom),
        ..Default::default()
    };
    let notifier = Notifier::from_settings(settings, context()).unwrap();
    notifier.deploy_started("http://status");

    until_matched(&mock).await;
    mock.assert_async().await;
}

#[tokio::test]
async fn delivery_failures_are_swallowed() {
    // Nothing listens on this port; the spawned send fails quietly.
    let settings = Settings {
        webhook_url: Some("http://127.0.0.1:1/hook".to_string()),
        ..Default::default()
    };
    let notifier = Notifier::from_settings(settings, context()).unwrap();

    notifier.deploy_started("http://status");
    notifier.deploy_succeeded();
    notifier.deploy_failed();

    // The calls return immediately and nothing propagates.
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[test]
fn custom_blocks_load_from_disk() {
    let mut waiting = tempfile::NamedTempFile::new().unwrap();
    waiting
        .write_all(br#"[{"type": "header"}]"#)
        .unwrap();
    let mut success = tempfile::NamedTempFile::new().unwrap();
    success.write_all(br#"[{"type": "section"}]"#).unwrap();
    let mut failure = tempfile::NamedTempFile::new().unwrap();
    failure.write_all(br#"[{"type": "actions"}]"#).unwrap();

    let blocks = CustomBlocks::load(waiting.path(), success.path(), failure.path()).unwrap();
    assert_eq!(blocks.waiting, json!([{"type": "header"}]));
    assert_eq!(blocks.failure, json!([{"type": "actions"}]));
}

#[test]
fn a_missing_block_document_is_its_own_error() {
    let present = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(present.path(), "[]").unwrap();

    let err = CustomBlocks::load(
        std::path::Path::new("/nonexistent/waiting.json"),
        present.path(),
        present.path(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}

#[test]
fn a_non_json_block_document_is_rejected() {
    let mut bad = tempfile::NamedTempFile::new().unwrap();
    bad.write_all(b"not json at all {").unwrap();

    let err = CustomBlocks::load(bad.path(), bad.path(), bad.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
