use axum_test::TestServer;
use http::{HeaderValue, StatusCode, header};
use serde_json::{Value, json};

use dealgate_gateway::router::build_router;
use dealgate_session::Session;

use crate::helpers::{UNREACHABLE, codec, spawn_backend, test_state};

fn session_cookie(email: &str) -> HeaderValue {
    let session = Session {
        email: email.to_owned(),
        user_id: "u-1".to_owned(),
        created_at: 1_700_000_000,
    };
    HeaderValue::from_str(&format!("session={}", codec().encode(&session))).unwrap()
}

async fn server_against_backend() -> TestServer {
    let backend = spawn_backend().await;
    TestServer::new(build_router(test_state(&backend, UNREACHABLE, false))).expect("test server")
}

#[tokio::test]
async fn get_forwards_with_identity_appended_to_the_query() {
    let server = server_against_backend().await;

    let response = server
        .get("/proxy/deals")
        .add_query_param("status", "open")
        .add_header(header::COOKIE, session_cookie("user@x.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["query"], "status=open&user_email=user%40x.com");
}

#[tokio::test]
async fn post_forwards_with_identity_merged_into_the_body() {
    let server = server_against_backend().await;

    let response = server
        .post("/proxy/deals")
        .json(&json!({ "name": "Acme" }))
        .add_header(header::COOKIE, session_cookie("user@x.com"))
        .await;

    // 201 relayed from the backend unchanged.
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(
        body["received"],
        json!({ "name": "Acme", "user_email": "user@x.com" })
    );
}

#[tokio::test]
async fn post_without_a_body_still_carries_the_identity() {
    let server = server_against_backend().await;

    let response = server
        .post("/proxy/deals")
        .add_header(header::COOKIE, session_cookie("user@x.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["received"], json!({ "user_email": "user@x.com" }));
}

#[tokio::test]
async fn anonymous_request_forwards_without_identity() {
    let server = server_against_backend().await;

    let response = server.get("/proxy/deals").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["query"], "");
}

#[tokio::test]
async fn undecodable_session_is_treated_as_anonymous() {
    let server = server_against_backend().await;

    let response = server
        .get("/proxy/deals")
        .add_header(header::COOKIE, HeaderValue::from_static("session=garbage"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["query"], "");
}

#[tokio::test]
async fn backend_status_codes_are_relayed_verbatim() {
    let server = server_against_backend().await;

    let response = server.get("/proxy/missing").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_backend_is_a_502() {
    let server =
        TestServer::new(build_router(test_state(UNREACHABLE, UNREACHABLE, false))).unwrap();

    let response = server
        .get("/proxy/deals")
        .add_header(header::COOKIE, session_cookie("user@x.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UPSTREAM_UNAVAILABLE");
}
