// ABOUTME: Tests for the reqwest-backed service clients against a mock HTTP server.
// ABOUTME: Verifies endpoints, payload shapes, and error mapping.

use mockito::Matcher;
use serde_json::json;
use stevedore::api::{
    ApiError, Deployer, DeploymentRequest, DeploymentStatus, HttpDeployer, HttpOrchestration,
    Orchestration,
};
use stevedore::types::{DeploymentId, RevisionArn};

#[tokio::test]
async fn registration_posts_the_definition_and_returns_the_arn() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/task-definitions")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({"family": "web"})))
        .with_status(200)
        .with_body(r#"{"taskDefinitionArn": "arn:svc:task-definition/web:42"}"#)
        .create_async()
        .await;

    let client = HttpOrchestration::new(&server.url()).unwrap();
    let arn = client
        .register_task_definition(&json!({"family": "web"}))
        .await
        .unwrap();

    assert_eq!(arn.as_str(), "arn:svc:task-definition/web:42");
    mock.assert_async().await;
}

#[tokio::test]
async fn rejected_registration_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/task-definitions")
        .with_status(400)
        .with_body("unknown field 'foo'")
        .create_async()
        .await;

    let client = HttpOrchestration::new(&server.url()).unwrap();
    let err = client
        .register_task_definition(&json!({"foo": 1}))
        .await
        .unwrap_err();

    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "unknown field 'foo'");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn describe_parses_failures_and_controllers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/clusters/apps/services/web")
        .with_status(200)
        .with_body(
            r#"{
                "failures": [],
                "services": [
                    {"status": "ACTIVE", "deploymentController": {"type": "CODE_DEPLOY"}}
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = HttpOrchestration::new(&server.url()).unwrap();
    let description = client.describe_service("apps", "web").await.unwrap();

    assert!(description.failures.is_empty());
    assert_eq!(description.services[0].status, "ACTIVE");
    assert_eq!(
        description.services[0]
            .deployment_controller
            .as_ref()
            .unwrap()
            .kind,
        "CODE_DEPLOY"
    );
}

#[tokio::test]
async fn update_puts_the_revision() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/v1/clusters/apps/services/web/task-definition")
        .match_body(Matcher::Json(
            json!({"taskDefinition": "arn:svc:task-definition/web:42"}),
        ))
        .with_status(204)
        .create_async()
        .await;

    let client = HttpOrchestration::new(&server.url()).unwrap();
    client
        .update_service(
            "apps",
            "web",
            &RevisionArn::new("arn:svc:task-definition/web:42".to_string()),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn stability_reads_the_flag() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/clusters/apps/services/web/stability")
        .with_status(200)
        .with_body(r#"{"stable": false}"#)
        .create_async()
        .await;

    let client = HttpOrchestration::new(&server.url()).unwrap();
    assert!(!client.service_stable("apps", "web").await.unwrap());
}

#[tokio::test]
async fn deployment_group_parses_blue_green_times() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/applications/App-apps-web/deployment-groups/Dgp-apps-web")
        .with_status(200)
        .with_body(
            r#"{"blueGreen": {"readyWaitMinutes": 5, "terminationWaitMinutes": 10}}"#,
        )
        .create_async()
        .await;

    let client = HttpDeployer::new(&server.url()).unwrap();
    let group = client
        .deployment_group("App-apps-web", "Dgp-apps-web")
        .await
        .unwrap();

    let times = group.blue_green.unwrap();
    assert_eq!(times.ready_wait_minutes, 5);
    assert_eq!(times.termination_wait_minutes, 10);
}

#[tokio::test]
async fn create_deployment_submits_content_and_digest_together() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/deployments")
        .match_body(Matcher::PartialJson(json!({
            "application": "App-apps-web",
            "deploymentGroup": "Dgp-apps-web",
            "sha256": "abc",
        })))
        .with_status(200)
        .with_body(r#"{"deploymentId": "d-1234567"}"#)
        .create_async()
        .await;

    let client = HttpDeployer::new(&server.url()).unwrap();
    let id = client
        .create_deployment(&DeploymentRequest {
            application: "App-apps-web".to_string(),
            deployment_group: "Dgp-apps-web".to_string(),
            content: "{}".to_string(),
            sha256: "abc".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(id.as_str(), "d-1234567");
    mock.assert_async().await;
}

#[tokio::test]
async fn deployment_status_deserializes() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/deployments/d-1234567")
        .with_status(200)
        .with_body(r#"{"status": "Succeeded"}"#)
        .create_async()
        .await;

    let client = HttpDeployer::new(&server.url()).unwrap();
    let status = client
        .deployment_status(&DeploymentId::new("d-1234567".to_string()))
        .await
        .unwrap();

    assert_eq!(status, DeploymentStatus::Succeeded);
}
