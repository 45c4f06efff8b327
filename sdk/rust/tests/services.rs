//! Façade tests against a mock backend.

use httpmock::prelude::*;
use iot_relay_sdk::{Api, ApiClient, ApiResponse, AuthRealm, ClientError, DeviceKind};
use serde_json::json;

fn api(server: &MockServer) -> Api {
    Api::new(ApiClient::new(&server.url("/api/proxy")).unwrap())
}

#[tokio::test]
async fn list_forwards_limit_and_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/api/proxy/end_device/")
                .query_param("limit", "10")
                .header("authorization", "Bearer secret");
            then.status(200).header("content-type", "application/json").json_body(json!([{"id": 1, "end_device_ID": "ED-2025-0001"}]));
        })
        .await;

    let out = api(&server).with_token("secret").end_devices().list(Some(10)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(out.as_json().unwrap()[0]["end_device_ID"], "ED-2025-0001");
}

#[tokio::test]
async fn list_without_limit_uses_default() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/api/proxy/users/")
                .query_param("limit", "10000");
            then.status(200).header("content-type", "application/json").json_body(json!([]));
        })
        .await;

    api(&server).users().list(None).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn create_sends_json_without_authorization() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path("/api/proxy/orders")
                .header("content-type", "application/json")
                .header_missing("authorization")
                .json_body(json!({"client_id": 4, "quantity": 120}));
            then.status(201).header("content-type", "application/json").json_body(json!({"id": 9, "order_id": "ORD-2025-0009"}));
        })
        .await;

    let out = api(&server)
        .orders()
        .create(&json!({"client_id": 4, "quantity": 120}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(out.into_value()["order_id"], "ORD-2025-0009");
}

#[tokio::test]
async fn delete_without_body_is_generic_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::DELETE).path("/api/proxy/gateway/G-2025-0002");
            then.status(204);
        })
        .await;

    let out = api(&server).gateways().delete("G-2025-0002").await.unwrap();

    mock.assert_async().await;
    assert_eq!(out, ApiResponse::Success);
}

#[tokio::test]
async fn backend_detail_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/api/proxy/clients/5");
            then.status(404).header("content-type", "application/json").json_body(json!({"detail": "Client not found"}));
        })
        .await;

    let err = api(&server).clients().get("5").await.unwrap_err();

    match err {
        ClientError::Backend {
            status,
            ref message,
            ref detail,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Client not found");
            assert_eq!(detail.as_ref(), Some(&json!("Client not found")));
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_uses_put() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::PUT)
                .path("/api/proxy/users_implementation/3")
                .json_body(json!({"is_active": false}));
            then.status(200).header("content-type", "application/json").json_body(json!({"id": 3, "is_active": false}));
        })
        .await;

    api(&server)
        .users_implementation()
        .update("3", &json!({"is_active": false}))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn colors_listing_filters_by_category() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/api/proxy/master/colors/")
                .query_param("category", "thread")
                .query_param("is_active", "true");
            then.status(200).header("content-type", "application/json").json_body(json!([{"name": "Navy"}]));
        })
        .await;

    api(&server).colors().list(Some("thread")).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn login_is_anonymous_even_with_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path("/api/proxy/auth_implementation/login")
                .header_missing("authorization")
                .json_body(json!({"username": "ops", "password": "pw"}));
            then.status(200).header("content-type", "application/json").json_body(json!({"access_token": "t", "token_type": "bearer"}));
        })
        .await;

    let out = api(&server)
        .with_token("stale")
        .auth(AuthRealm::Implementation)
        .login("ops", "pw")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(out.into_value()["access_token"], "t");
}

#[tokio::test]
async fn telemetry_list_targets_device_feed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/api/proxy/end_device/12/telemetry");
            then.status(200).header("content-type", "application/json").json_body(json!([]));
        })
        .await;

    api(&server).telemetry(DeviceKind::EndDevice).list("12").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn trailing_slash_base_path_is_normalized() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/api/proxy/reports/dashboard");
            then.status(200).header("content-type", "application/json").json_body(json!({"orders": 3}));
        })
        .await;

    let client = ApiClient::new(&server.url("/api/proxy/")).unwrap();
    Api::new(client).reports().dashboard().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn non_json_failure_reports_status_line() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/api/proxy/reports/export/orders");
            then.status(503).header("content-type", "text/plain").body("down");
        })
        .await;

    let err = api(&server).reports().export("orders").await.unwrap_err();
    assert_eq!(err.to_string(), "API Error: 503 Service Unavailable");
    assert_eq!(err.status(), Some(503));
}
