// --- File: crates/esign_common/src/routes_test.rs ---
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::models::{EnvelopeStatus, SignatureEnvelope};
use crate::routes::routes;
use crate::services::{mock::MockEnvelopePort, DynEnvelopePort};

fn test_router() -> Router {
    let port: DynEnvelopePort = Arc::new(MockEnvelopePort::new());
    routes(port)
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(router: &Router, title: &str) -> SignatureEnvelope {
    let (status, body) = send(
        router,
        "POST",
        "/esignature/envelopes",
        Some(json!({ "title": title, "description": "Please sign" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_create_then_get() {
    let router = test_router();
    let created = create(&router, "NDA").await;
    let id = created.id.unwrap();

    let (status, body) = send(&router, "GET", &format!("/esignature/envelopes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "NDA");
    assert_eq!(body["status"], "DRAFT");
    assert_eq!(body["provider"], "DOCUSIGN");
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let router = test_router();
    let (status, body) = send(
        &router,
        "POST",
        "/esignature/envelopes",
        Some(json!({ "title": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn test_unknown_envelope_is_404_with_error_body() {
    let router = test_router();
    let (status, body) = send(
        &router,
        "GET",
        &format!("/esignature/envelopes/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
    assert!(body["error"]["message"].as_str().unwrap().starts_with("Not found"));
}

#[tokio::test]
async fn test_send_void_lifecycle() {
    let router = test_router();
    let id = create(&router, "NDA").await.id.unwrap();
    let actor = Uuid::new_v4();

    let (status, body) = send(
        &router,
        "POST",
        &format!("/esignature/envelopes/{}/send", id),
        Some(json!({ "sent_by": actor })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "SENT");

    let (status, body) = send(
        &router,
        "POST",
        &format!("/esignature/envelopes/{}/void", id),
        Some(json!({ "reason": "superseded", "voided_by": actor })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "VOIDED");

    let (_, body) = send(
        &router,
        "GET",
        "/esignature/envelopes?status=VOIDED&limit=5",
        None,
    )
    .await;
    let listed: Vec<SignatureEnvelope> = serde_json::from_value(body).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, EnvelopeStatus::Voided);
}

#[tokio::test]
async fn test_list_status_query_is_case_insensitive() {
    let router = test_router();
    let id = create(&router, "NDA").await.id.unwrap();

    let (status, body) = send(&router, "GET", "/esignature/envelopes?status=draft", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<SignatureEnvelope> = serde_json::from_value(body).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, Some(id));

    let (status, _) = send(&router, "GET", "/esignature/envelopes?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_changes_title() {
    let router = test_router();
    let id = create(&router, "NDA").await.id.unwrap();

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/esignature/envelopes/{}", id),
        Some(json!({ "title": "NDA v2", "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "NDA v2");
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn test_delete_then_exists_and_external_lookup() {
    let router = test_router();
    let created = create(&router, "NDA").await;
    let id = created.id.unwrap();
    let external_id = created.external_envelope_id.unwrap();

    let exists_uri = format!("/esignature/envelopes/{}/exists", id);
    let (_, body) = send(&router, "GET", &exists_uri, None).await;
    assert_eq!(body["exists"], true);

    let (status, body) = send(
        &router,
        "GET",
        &format!("/esignature/envelopes/external/{}", external_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));

    let (status, _) = send(&router, "DELETE", &format!("/esignature/envelopes/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&router, "GET", &exists_uri, None).await;
    assert_eq!(body["exists"], false);

    let (status, _) = send(
        &router,
        "GET",
        &format!("/esignature/envelopes/external/{}", external_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
