pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::editing::handlers as editing;
use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route("/api/v1/reports", post(generation::handle_generate))
        // Sessions and editing
        .route("/api/v1/reports/:id", get(editing::handle_get_report))
        .route(
            "/api/v1/reports/:id/edit",
            post(editing::handle_begin_edit).put(editing::handle_change_draft),
        )
        .route("/api/v1/reports/:id/edit/commit", post(editing::handle_commit))
        .route("/api/v1/reports/:id/edit/cancel", post(editing::handle_cancel))
        // Layout and export
        .route("/api/v1/reports/:id/layout", get(export::handle_layout))
        .route("/api/v1/reports/:id/export", get(export::handle_export))
        // History
        .route(
            "/api/v1/history",
            get(history::handle_list_history).delete(history::handle_clear_history),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::editing::registry::SessionRegistry;
    use crate::generation::generator::tests::FakeBackend;
    use crate::generation::generator::ReportBackend;
    use crate::history::store::MemoryStore;
    use crate::history::topics::TopicHistory;
    use crate::layout::{default_typography, PageGeometry};

    fn test_state(backend: impl ReportBackend + 'static) -> AppState {
        AppState {
            config: Config {
                anthropic_api_key: "test".to_string(),
                redis_url: None,
                product_name: "InsightForge".to_string(),
                page_geometry: PageGeometry::a4(),
                session_capacity: 8,
                port: 0,
                rust_log: "info".to_string(),
            },
            backend: Arc::new(backend),
            history: TopicHistory::new(Arc::new(MemoryStore::new())),
            sessions: SessionRegistry::with_capacity(8),
            typography: default_typography(),
        }
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn generate(app: &Router, topic: &str) -> String {
        let (status, body) =
            send_json(app, Method::POST, "/api/v1/reports", Some(json!({ "topic": topic }))).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["report_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(FakeBackend::valid()));
        let (status, body) = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_opens_viewing_session_and_records_history() {
        let app = build_router(test_state(FakeBackend::valid()));
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/reports",
            Some(json!({ "topic": "  Quantum Computing  " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topic"], "Quantum Computing");
        assert_eq!(body["edit"]["state"], "viewing");
        assert_eq!(body["report"]["introduction"], "Generated text for introduction");

        let (_, history) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert_eq!(history["topics"], json!(["Quantum Computing"]));
    }

    #[tokio::test]
    async fn test_short_topic_rejected_before_backend_call() {
        let app = build_router(test_state(FakeBackend::valid()));
        let (status, body) =
            send_json(&app, Method::POST, "/api/v1/reports", Some(json!({ "topic": " ab " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generation_failure_is_reported_and_not_recorded() {
        let app = build_router(test_state(FakeBackend::failing("model overloaded")));
        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/v1/reports",
            Some(json!({ "topic": "Fusion Power" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("model overloaded"));

        let (_, history) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert_eq!(history["topics"], json!([]));
    }

    #[tokio::test]
    async fn test_edit_commit_flow() {
        let app = build_router(test_state(FakeBackend::valid()));
        let id = generate(&app, "Quantum Computing").await;
        let edit = format!("/api/v1/reports/{id}/edit");

        let (status, body) =
            send_json(&app, Method::POST, &edit, Some(json!({ "section": "history" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["edit"]["state"], "editing");
        assert_eq!(body["edit"]["draft"], "Generated text for history");

        let (status, _) =
            send_json(&app, Method::PUT, &edit, Some(json!({ "draft": "A new history." }))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            send_json(&app, Method::POST, &format!("{edit}/commit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["edit"]["state"], "viewing");
        assert_eq!(body["report"]["history"], "A new history.");
        assert_eq!(body["report"]["benefits"], "Generated text for benefits");
    }

    #[tokio::test]
    async fn test_empty_commit_rejected_and_session_stays_editing() {
        let app = build_router(test_state(FakeBackend::valid()));
        let id = generate(&app, "Quantum Computing").await;
        let edit = format!("/api/v1/reports/{id}/edit");

        send_json(&app, Method::POST, &edit, Some(json!({ "section": "benefits" }))).await;
        send_json(&app, Method::PUT, &edit, Some(json!({ "draft": "" }))).await;
        let (status, body) =
            send_json(&app, Method::POST, &format!("{edit}/commit"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_EDIT_REJECTED");

        let (_, body) =
            send_json(&app, Method::GET, &format!("/api/v1/reports/{id}"), None).await;
        assert_eq!(body["edit"]["state"], "editing");
        assert_eq!(body["report"]["benefits"], "Generated text for benefits");
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let app = build_router(test_state(FakeBackend::valid()));
        let id = generate(&app, "Quantum Computing").await;
        let edit = format!("/api/v1/reports/{id}/edit");

        send_json(&app, Method::POST, &edit, Some(json!({ "section": "challenges" }))).await;
        send_json(&app, Method::PUT, &edit, Some(json!({ "draft": "discard me" }))).await;
        let (status, body) =
            send_json(&app, Method::POST, &format!("{edit}/cancel"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["challenges"], "Generated text for challenges");
    }

    #[tokio::test]
    async fn test_second_open_edit_conflicts() {
        let app = build_router(test_state(FakeBackend::valid()));
        let id = generate(&app, "Quantum Computing").await;
        let edit = format!("/api/v1/reports/{id}/edit");

        send_json(&app, Method::POST, &edit, Some(json!({ "section": "history" }))).await;
        let (status, body) =
            send_json(&app, Method::POST, &edit, Some(json!({ "section": "futureScope" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "EDIT_IN_PROGRESS");
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let app = build_router(test_state(FakeBackend::valid()));
        let uri = format!("/api/v1/reports/{}", uuid::Uuid::new_v4());
        let (status, body) = send_json(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_layout_starts_with_title_then_introduction() {
        let app = build_router(test_state(FakeBackend::valid()));
        let id = generate(&app, "Quantum Computing").await;
        let (status, plan) =
            send_json(&app, Method::GET, &format!("/api/v1/reports/{id}/layout"), None).await;
        assert_eq!(status, StatusCode::OK);
        let first = &plan["pages"][0]["placements"];
        assert_eq!(first[0]["tier"], "title");
        assert_eq!(first[0]["text"], "Quantum Computing");
        assert_eq!(first[1]["tier"], "section_heading");
        assert_eq!(first[1]["text"], "Introduction");
    }

    #[tokio::test]
    async fn test_export_returns_named_pdf() {
        let app = build_router(test_state(FakeBackend::valid()));
        let id = generate(&app, "Quantum Computing").await;
        let request = Request::builder()
            .uri(format!("/api/v1/reports/{id}/export"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"InsightForge_Report_Quantum_Computing.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_history_dedupes_and_clears() {
        let app = build_router(test_state(FakeBackend::valid()));
        generate(&app, "B topic").await;
        generate(&app, "A topic").await;
        generate(&app, "B topic").await;

        let (_, history) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert_eq!(history["topics"], json!(["A topic", "B topic"]));

        let (status, _) = send(&app, Method::DELETE, "/api/v1/history", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, history) = send_json(&app, Method::GET, "/api/v1/history", None).await;
        assert_eq!(history["topics"], json!([]));
    }
}
