// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gw_repo::test_helpers::ScriptedRunner;
use gw_rest_api_contract::{CommitInfo, CommitsResponse, ResponseStatus, StatusResponse, SyncResponse};
use gw_rest_server::dependencies::DefaultServerDependencies;
use gw_rest_server::{Server, ServerConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with(runner: Arc<ScriptedRunner>) -> Router {
    let config = ServerConfig::default();
    let state = DefaultServerDependencies::with_runner(config.clone(), runner).into_state();
    Server::build_app(state, &config)
}

async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn commits_are_listed_in_log_order() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .succeed("abc123|Alice|2024-01-01|Fix bug\ndef456|Bob|2024-01-02|Add feature"),
    );
    let (status, body) = call(app_with(runner.clone()), "GET", "/api/commits").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: CommitsResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.status, ResponseStatus::Success);
    assert_eq!(
        parsed.commits.unwrap(),
        vec![
            CommitInfo {
                hash: "abc123".into(),
                author: "Alice".into(),
                date: "2024-01-01".into(),
                message: "Fix bug".into(),
            },
            CommitInfo {
                hash: "def456".into(),
                author: "Bob".into(),
                date: "2024-01-02".into(),
                message: "Add feature".into(),
            },
        ]
    );
    assert_eq!(
        runner.calls(),
        vec![vec![
            "log".to_string(),
            "-3".to_string(),
            "--pretty=format:%h|%an|%ad|%s".to_string(),
            "--date=short".to_string(),
        ]]
    );
}

#[tokio::test]
async fn commits_failure_reports_message() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .fail("fatal: your current branch 'main' does not have any commits yet"),
    );
    let (status, body) = call(app_with(runner), "GET", "/api/commits").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "message": "fatal: your current branch 'main' does not have any commits yet"
        })
    );
}

#[tokio::test]
async fn commits_with_malformed_output_is_an_error() {
    let runner = Arc::new(ScriptedRunner::new().succeed("abc123|Alice"));
    let (status, body) = call(app_with(runner), "GET", "/api/commits").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body.get("commits").is_none());
}

#[tokio::test]
async fn push_after_successful_pull() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .succeed("Already up to date.")
            .succeed("Everything up-to-date"),
    );
    let (status, body) = call(app_with(runner.clone()), "POST", "/api/push").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "pull_output": "Already up to date.",
            "push_output": "Everything up-to-date"
        })
    );
    assert_eq!(
        runner.calls(),
        vec![
            vec!["pull".to_string(), "origin".to_string(), "main".to_string()],
            vec!["push".to_string(), "origin".to_string(), "main".to_string()],
        ]
    );
}

#[tokio::test]
async fn failed_pull_never_pushes() {
    let runner = Arc::new(
        ScriptedRunner::new().fail("fatal: 'origin' does not appear to be a git repository"),
    );
    let (status, body) = call(app_with(runner.clone()), "POST", "/api/push").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "message": "fatal: 'origin' does not appear to be a git repository"
        })
    );
    assert_eq!(runner.count("pull"), 1);
    assert_eq!(runner.count("push"), 0);
}

#[tokio::test]
async fn failed_push_keeps_pull_output() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .succeed("Updating 1a2b3c..4d5e6f\nFast-forward")
            .fail("! [rejected]        main -> main (fetch first)"),
    );
    let (status, body) = call(app_with(runner), "POST", "/api/push").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let parsed: SyncResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.status, ResponseStatus::Error);
    assert_eq!(parsed.message, None);
    assert_eq!(
        parsed.pull_output.as_deref(),
        Some("Updating 1a2b3c..4d5e6f\nFast-forward")
    );
    assert_eq!(
        parsed.push_output.as_deref(),
        Some("! [rejected]        main -> main (fetch first)")
    );
}

#[tokio::test]
async fn push_requires_post() {
    let runner = Arc::new(ScriptedRunner::new());
    let response = app_with(runner.clone())
        .oneshot(Request::builder().uri("/api/push").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn status_populates_data_on_success_and_failure() {
    let ok = Arc::new(ScriptedRunner::new().succeed("On branch main\nnothing to commit"));
    let (status, body) = call(app_with(ok), "GET", "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_value::<StatusResponse>(body).unwrap(),
        StatusResponse::success("On branch main\nnothing to commit")
    );

    let failing = Arc::new(ScriptedRunner::new().fail("fatal: not a git repository"));
    let (status, body) = call(app_with(failing), "GET", "/api/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"status": "error", "data": "fatal: not a git repository"})
    );
}

#[tokio::test]
async fn health_does_not_run_git() {
    let runner = Arc::new(ScriptedRunner::new());
    let (status, body) = call(app_with(runner.clone()), "GET", "/api/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn concurrent_synchronizations_do_not_interleave() {
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_delay(Duration::from_millis(20))
            .succeed("pull 1")
            .succeed("push 1")
            .succeed("pull 2")
            .succeed("push 2"),
    );
    let app = app_with(runner.clone());

    let (first, second) = tokio::join!(
        call(app.clone(), "POST", "/api/push"),
        call(app.clone(), "POST", "/api/push")
    );
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);

    let verbs: Vec<String> = runner.calls().into_iter().map(|args| args[0].clone()).collect();
    assert_eq!(verbs, vec!["pull", "push", "pull", "push"]);
}

#[cfg(unix)]
#[tokio::test]
async fn dropped_connection_does_not_stop_synchronization() {
    use std::os::unix::fs::PermissionsExt;
    use tokio::io::AsyncWriteExt;

    let repo = tempfile::tempdir().unwrap();
    std::fs::create_dir(repo.path().join(".git")).unwrap();
    let tools = tempfile::tempdir().unwrap();
    let fake_git = tools.path().join("slow-git");
    std::fs::write(&fake_git, "#!/bin/sh\nsleep 1\necho \"$1\" >> calls.log\n").unwrap();
    std::fs::set_permissions(&fake_git, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut config = ServerConfig::default();
    config.repository.path = repo.path().to_path_buf();
    config.repository.git_binary = fake_git.to_string_lossy().into_owned();
    let server = Server::new(config).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(server.serve(listener));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"POST /api/push HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    drop(stream);

    let log = repo.path().join("calls.log");
    let mut calls = String::new();
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        calls = std::fs::read_to_string(&log).unwrap_or_default();
        if calls.lines().count() >= 2 {
            break;
        }
    }
    assert_eq!(calls.lines().collect::<Vec<_>>(), vec!["pull", "push"]);

    handle.abort();
}
