use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::notify::RecordingNotifier;
use service::registry::Registry;
use service::storage::MemorySnapshotStore;
use tower::ServiceExt;

use server::{routes, AppState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct Harness {
    app: Router,
    snapshots: Arc<MemorySnapshotStore>,
    notifier: Arc<RecordingNotifier>,
}

async fn build_app() -> anyhow::Result<Harness> {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let registry = Registry::open(snapshots.clone()).await?;
    let state = AppState::new(registry, notifier.clone());
    Ok(Harness { app: routes::build_router(state, cors()), snapshots, notifier })
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn call_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let (status, bytes) = call(app, method, uri, body).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, body) = call_json(&h.app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn lists_seeded_people_and_vaccines() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, people) = call_json(&h.app, "GET", "/people", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        people,
        json!([
            {"id": 0, "firstName": "Ryan", "lastName": "Anderson", "vaccines": []},
            {"id": 1, "firstName": "Dani", "lastName": "Trugilo", "vaccines": []}
        ])
    );
    let (_, vaccines) = call_json(&h.app, "GET", "/vaccines", None).await?;
    assert_eq!(vaccines, json!([{"id": 0, "name": "Covid"}]));
    Ok(())
}

#[tokio::test]
async fn add_person_then_get() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, created) =
        call_json(&h.app, "POST", "/people", Some(json!({"firstName": "Grace", "lastName": "Hopper"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 2);
    assert_eq!(h.snapshots.save_count(), 2);

    let (status, got) = call_json(&h.app, "GET", "/people/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got, json!({"id": 2, "firstName": "Grace", "lastName": "Hopper", "vaccines": []}));
    Ok(())
}

#[tokio::test]
async fn blank_name_is_bad_request() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, body) = call_json(&h.app, "POST", "/people", Some(json!({"firstName": " ", "lastName": "X"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    let (status, _) = call_json(&h.app, "POST", "/vaccines", Some(json!({"name": ""}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.snapshots.save_count(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_person_is_404_json() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, body) = call_json(&h.app, "GET", "/people/41", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn link_by_name_hit_and_miss() -> anyhow::Result<()> {
    let h = build_app().await?;

    let (status, view) = call_json(&h.app, "POST", "/people/0/vaccines/Covid", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["vaccines"], json!([{"id": 0, "name": "Covid"}]));

    let (status, body) = call_json(&h.app, "POST", "/people/0/vaccines/Flu", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Vaccine Not Found");
    assert_eq!(h.snapshots.save_count(), 2);

    let (_, view) = call_json(&h.app, "GET", "/people/0", None).await?;
    assert_eq!(view["vaccines"], json!([{"id": 0, "name": "Covid"}]));
    Ok(())
}

#[tokio::test]
async fn new_vaccine_can_be_linked() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, flu) = call_json(&h.app, "POST", "/vaccines", Some(json!({"name": "Flu"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(flu, json!({"id": 1, "name": "Flu"}));

    let (status, view) = call_json(&h.app, "POST", "/people/1/vaccines/Flu", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["vaccines"], json!([{"id": 1, "name": "Flu"}]));
    Ok(())
}

#[tokio::test]
async fn greet_and_goodbye_go_through_notifier() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, body) = call(&h.app, "GET", "/greet/0", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body)?, "Hi Ryan");

    let (status, body) = call(&h.app, "GET", "/goodbye/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body)?, "Good Bye Dani");

    let (status, _) = call(&h.app, "GET", "/greet/9", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(h.notifier.messages(), vec!["Hi Ryan", "Good Bye Dani"]);
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_routes() -> anyhow::Result<()> {
    let h = build_app().await?;
    let (status, doc) = call_json(&h.app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/people/{id}/vaccines/{name}"].is_object());
    assert!(doc["paths"]["/greet/{id}"].is_object());
    Ok(())
}
