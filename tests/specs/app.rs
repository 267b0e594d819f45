// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application lifecycle specs: readiness and uninstall polling over HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ae_api::{
    wait_until_ready, wait_until_uninstalled, ApiClient, ApiError, AppScope, PollError, PollPolicy,
};
use ae_core::{AppId, AppState};
use serde_json::json;

const EVENTS_PATH: &str = "/api/v1/orgs/acme/projects/main/apps/app-1/events";
const INSTANCES_PATH: &str = "/api/v1/orgs/acme/projects/main/apps";

/// Millisecond-scale policy so specs run quickly against a real socket.
fn fast_policy() -> PollPolicy {
    PollPolicy::new(Duration::from_millis(10), Duration::from_secs(5))
}

fn scope_for(server: &mockito::ServerGuard) -> AppScope {
    let client = ApiClient::new(server.url().parse().unwrap(), "e2e-bearer-token").unwrap();
    AppScope::new(client, "acme", "main")
}

fn app() -> AppId {
    AppId::from_string("app-1")
}

#[tokio::test]
async fn install_reaches_healthy_after_progressing() {
    let mut server = mockito::Server::new_async().await;
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&polls);
    server
        .mock("GET", EVENTS_PATH)
        .expect_at_least(3)
        .with_body_from_request(move |_req| {
            let state = match counter.fetch_add(1, Ordering::SeqCst) {
                0 => "queued",
                1 => "progressing",
                _ => "healthy",
            };
            json!({"items": [{"state": state}]}).to_string().into_bytes()
        })
        .create_async()
        .await;

    let scope = scope_for(&server);
    let event = wait_until_ready(&scope, &app(), fast_policy()).await.unwrap();

    assert_eq!(event.state, AppState::Healthy);
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn degraded_install_fails_without_spending_the_budget() {
    let mut server = mockito::Server::new_async().await;
    let counter = Arc::new(AtomicUsize::new(0));
    let n = Arc::clone(&counter);
    server
        .mock("GET", EVENTS_PATH)
        .expect_at_least(2)
        .with_body_from_request(move |_req| {
            let body = match n.fetch_add(1, Ordering::SeqCst) {
                0 => json!({"items": [{"state": "progressing"}]}),
                _ => json!({"items": [{"state": "degraded", "message": "image pull failed"}]}),
            };
            body.to_string().into_bytes()
        })
        .create_async()
        .await;

    let scope = scope_for(&server);
    let err = wait_until_ready(&scope, &app(), fast_policy())
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::Degraded { .. }));
    assert!(err.to_string().contains("image pull failed"), "got: {err}");
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unauthorized_poll_propagates_the_status_immediately() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", EVENTS_PATH)
        .with_status(401)
        .with_body("token expired")
        .create_async()
        .await;

    let scope = scope_for(&server);
    let err = wait_until_ready(&scope, &app(), fast_policy())
        .await
        .unwrap_err();

    match err {
        PollError::Api(ApiError::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "token expired");
        }
        other => panic!("expected UnexpectedStatus, got {other}"),
    }
}

#[tokio::test]
async fn uninstall_completes_once_the_state_flips() {
    let mut server = mockito::Server::new_async().await;
    let counter = Arc::new(AtomicUsize::new(0));
    let n = Arc::clone(&counter);
    server
        .mock("GET", INSTANCES_PATH)
        .expect_at_least(2)
        .with_body_from_request(move |_req| {
            let state = match n.fetch_add(1, Ordering::SeqCst) {
                0 => "healthy",
                _ => "Uninstalled",
            };
            json!({"items": [
                {"id": "app-1", "name": "redis", "state": state},
                {"id": "app-2", "state": "healthy"}
            ]})
            .to_string()
            .into_bytes()
        })
        .create_async()
        .await;

    let scope = scope_for(&server);
    let instance = wait_until_uninstalled(&scope, &app(), fast_policy())
        .await
        .unwrap();

    assert_eq!(instance.id, "app-1");
    assert_eq!(instance.state, AppState::Uninstalled);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn uninstall_wait_rejects_a_listing_without_the_target() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", INSTANCES_PATH)
        .with_body(json!({"items": [{"id": "app-2", "state": "healthy"}]}).to_string())
        .create_async()
        .await;

    let scope = scope_for(&server);
    let err = wait_until_uninstalled(&scope, &app(), fast_policy())
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::NotFound { .. }));
}
