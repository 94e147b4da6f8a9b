pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::persistence::handlers as draft;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::transfer::handlers as transfer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generative text
        .route("/api/generate", post(generation::handle_generate))
        // Stateless analysis
        .route("/api/v1/resume/progress", post(resume::handle_progress))
        .route("/api/v1/resume/validate", post(resume::handle_validate))
        .route("/api/v1/resume/quality", post(resume::handle_quality))
        .route("/api/v1/normalize", post(resume::handle_normalize))
        // Live draft
        .route(
            "/api/v1/draft",
            get(draft::handle_get_draft)
                .put(draft::handle_put_draft)
                .delete(draft::handle_clear_draft),
        )
        .route("/api/v1/draft/blur", post(draft::handle_blur))
        .route("/api/v1/draft/quality", get(draft::handle_draft_quality))
        .route("/api/v1/draft/experience", post(draft::handle_add_experience))
        .route(
            "/api/v1/draft/experience/:id",
            delete(draft::handle_remove_experience),
        )
        .route("/api/v1/draft/education", post(draft::handle_add_education))
        .route(
            "/api/v1/draft/education/:id",
            delete(draft::handle_remove_education),
        )
        .route("/api/v1/draft/sections", post(draft::handle_add_section))
        .route(
            "/api/v1/draft/sections/:id",
            delete(draft::handle_remove_section),
        )
        .route(
            "/api/v1/draft/sections/:id/items",
            post(draft::handle_add_item),
        )
        .route(
            "/api/v1/draft/sections/:id/items/:index",
            put(draft::handle_update_item).delete(draft::handle_remove_item),
        )
        .route(
            "/api/v1/draft/skills",
            post(draft::handle_add_skills).delete(draft::handle_clear_skills),
        )
        .route(
            "/api/v1/draft/skills/:skill",
            delete(draft::handle_remove_skill),
        )
        .route(
            "/api/v1/draft/generate",
            post(generation::handle_draft_generate),
        )
        // Transfer
        .route("/api/v1/draft/export", get(transfer::handle_export))
        .route("/api/v1/draft/text", get(transfer::handle_plain_text))
        .route("/api/v1/draft/import", post(transfer::handle_import))
        .route("/api/v1/draft/duplicate", post(transfer::handle_duplicate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::generation::canned::{canned_skills, CANNED_SUMMARY};
    use crate::generation::FallbackGenerator;
    use crate::models::resume::ResumeData;
    use crate::persistence::{DraftStore, MemoryStore};
    use crate::transfer::codec::ImportMode;

    fn state_with(config: Config, store: Arc<MemoryStore>) -> AppState {
        let state = AppState::new(
            config,
            store,
            Arc::new(FallbackGenerator::new(Duration::ZERO)),
        );
        state.session.hydrate();
        state
    }

    fn app() -> Router {
        build_router(state_with(Config::default(), Arc::new(MemoryStore::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn named_draft() -> Value {
        json!({
            "personalInfo": {"name": "Ada Lovelace", "title": "Engineer", "email": "ada@example.com"},
            "summary": "",
            "experience": [{"id": "exp-1", "role": "Analyst", "company": "Engines Ltd"}],
            "education": [],
            "skills": ["Rust"],
            "customSections": []
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["draft"], "hydrated");
        assert_eq!(body["generator"], "fallback");
    }

    #[tokio::test]
    async fn test_draft_rejected_before_hydration() {
        let state = AppState::new(
            Config::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(FallbackGenerator::new(Duration::ZERO)),
        );
        let app = build_router(state);
        let (status, body) = send(&app, Method::GET, "/api/v1/draft", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "NOT_HYDRATED");
    }

    #[tokio::test]
    async fn test_put_then_get_draft() {
        let app = app();
        let (status, _) = send(&app, Method::PUT, "/api/v1/draft", Some(named_draft())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/api/v1/draft", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personalInfo"]["name"], "Ada Lovelace");
        assert_eq!(body["experience"][0]["id"], "exp-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_reaches_store() {
        let store = Arc::new(MemoryStore::new());
        let app = build_router(state_with(Config::default(), Arc::clone(&store)));
        send(&app, Method::PUT, "/api/v1/draft", Some(named_draft())).await;
        assert!(store.get("ai-resume-builder-draft").unwrap().is_none());

        tokio::time::sleep(Duration::from_millis(600)).await;
        let saved = store.get("ai-resume-builder-draft").unwrap().unwrap();
        let saved: ResumeData = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved.personal_info.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_clear_draft() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/draft", Some(named_draft())).await;
        let (status, _) = send(&app, Method::DELETE, "/api/v1/draft", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = send(&app, Method::GET, "/api/v1/draft", None).await;
        assert_eq!(body, serde_json::to_value(ResumeData::default()).unwrap());
    }

    #[tokio::test]
    async fn test_stateless_scoring() {
        let app = app();
        let empty = serde_json::to_value(ResumeData::default()).unwrap();
        let (_, body) = send(&app, Method::POST, "/api/v1/resume/progress", Some(empty.clone())).await;
        assert_eq!(body["progress"], 0);

        let (_, body) = send(&app, Method::POST, "/api/v1/resume/validate", Some(empty.clone())).await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"][0], "Name is required");

        let (_, body) = send(&app, Method::POST, "/api/v1/resume/quality", Some(empty)).await;
        assert_eq!(body["score"], 0);
        assert_eq!(body["errors"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_normalize() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/api/v1/normalize",
            Some(json!({"field": "phone", "value": "5551234567"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "(555) 123-4567");
    }

    #[tokio::test]
    async fn test_blur_updates_only_on_change() {
        let app = app();
        let mut draft = named_draft();
        draft["personalInfo"]["github"] = json!("github.com/ada");
        send(&app, Method::PUT, "/api/v1/draft", Some(draft)).await;

        let (_, body) = send(&app, Method::POST, "/api/v1/draft/blur", Some(json!({"field": "github"}))).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["draft"]["personalInfo"]["github"], "https://github.com/ada");

        let (_, body) = send(&app, Method::POST, "/api/v1/draft/blur", Some(json!({"field": "github"}))).await;
        assert_eq!(body["changed"], false);
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/v1/draft/experience", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();
        assert_eq!(body["draft"]["experience"][0]["id"], id.as_str());

        let uri = format!("/api/v1/draft/experience/{id}");
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["experience"], json!([]));

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_section_items() {
        let app = app();
        let (_, body) = send(&app, Method::POST, "/api/v1/draft/sections", None).await;
        let id = body["id"].as_str().unwrap().to_string();

        let items = format!("/api/v1/draft/sections/{id}/items");
        send(&app, Method::POST, &items, None).await;
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("{items}/0"),
            Some(json!({"value": "Gold medal"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["customSections"][0]["items"], json!(["Gold medal"]));

        let (status, _) = send(&app, Method::DELETE, &format!("{items}/3"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_skills() {
        let app = app();
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/draft/skills",
            Some(json!({"text": "Rust, Go\nRust,  "})),
        )
        .await;
        assert_eq!(body["skills"], json!(["Rust", "Go"]));

        let (_, body) = send(&app, Method::DELETE, "/api/v1/draft/skills/Go", None).await;
        assert_eq!(body["skills"], json!(["Rust"]));

        let (_, body) = send(&app, Method::DELETE, "/api/v1/draft/skills", None).await;
        assert_eq!(body["skills"], json!([]));
    }

    #[tokio::test]
    async fn test_import_and_export() {
        let app = app();
        let (status, body) = send_raw(&app, Method::POST, "/api/v1/draft/import", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["message"], "Invalid resume file format");

        let (status, _) =
            send_raw(&app, Method::POST, "/api/v1/draft/import", &named_draft().to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/api/v1/draft/export")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Ada Lovelace-resume.json\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let exported: ResumeData = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(exported.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_import_rejects_non_utf8_file() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/draft/import")
            .body(Body::from(b"{\"personalInfo\": {\"name\": \"\xff\xfe\"}}".to_vec()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "Invalid resume file format");
    }

    #[tokio::test]
    async fn test_strict_import_mode() {
        let config = Config {
            import_mode: ImportMode::Strict,
            ..Config::default()
        };
        let app = build_router(state_with(config, Arc::new(MemoryStore::new())));
        let (status, _) = send_raw(
            &app,
            Method::POST,
            "/api/v1/draft/import",
            r#"{"personalInfo": {"name": "Ada"}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send_raw(&app, Method::POST, "/api/v1/draft/import", &named_draft().to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "experience entries lack fields");
    }

    #[tokio::test]
    async fn test_plain_text() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/draft", Some(named_draft())).await;
        let (status, text) = send_raw(&app, Method::GET, "/api/v1/draft/text", "").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.starts_with("Ada Lovelace\nEngineer\n\nEmail: ada@example.com\n"));
        assert!(text.contains("Analyst at Engines Ltd\n"));
    }

    #[tokio::test]
    async fn test_duplicate_assigns_new_ids() {
        let app = app();
        send(&app, Method::PUT, "/api/v1/draft", Some(named_draft())).await;
        let (status, body) = send(&app, Method::POST, "/api/v1/draft/duplicate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(body["experience"][0]["id"], "exp-1");
        assert_eq!(body["experience"][0]["role"], "Analyst");

        let (_, current) = send(&app, Method::GET, "/api/v1/draft", None).await;
        assert_eq!(current, body);
    }

    #[tokio::test]
    async fn test_generate_contract() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/generate",
            Some(json!({"type": "poem", "data": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid type"}));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/generate",
            Some(json!({"type": "skills", "data": ["Rust"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], json!(canned_skills()));
    }

    #[tokio::test]
    async fn test_draft_generation() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/draft/generate",
            Some(json!({"type": "summary"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please fill in your name and title first");

        send(&app, Method::PUT, "/api/v1/draft", Some(named_draft())).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/draft/generate",
            Some(json!({"type": "summary"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], CANNED_SUMMARY);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/draft/generate",
            Some(json!({"type": "bullets", "experienceId": "missing"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
