pub mod health;

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::editor::edits::Section;
use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::preview::handlers as preview;
use crate::state::AppState;

/// Room for multipart framing around the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// One static path per section keeps `/resume/personal-info` and friends
/// from overlapping a `/resume/:section` wildcard.
fn section_routes(mut router: Router<AppState>) -> Router<AppState> {
    for section in Section::ALL {
        let base = format!("/api/v1/sessions/:id/resume/{section}");
        router = router
            .route(
                &base,
                post(move |state: State<AppState>, path: Path<Uuid>| {
                    editor::handle_add_item(state, path, section)
                }),
            )
            .route(
                &format!("{base}/:item_id"),
                patch(
                    move |state: State<AppState>,
                          path: Path<(Uuid, String)>,
                          Json(body): Json<Value>| {
                        editor::handle_update_item(state, path, section, body)
                    },
                )
                .delete(move |state: State<AppState>, path: Path<(Uuid, String)>| {
                    editor::handle_remove_item(state, path, section)
                }),
            );
    }
    router
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/presets", get(editor::handle_presets))
        // Sessions
        .route("/api/v1/sessions", post(editor::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(editor::handle_get_session).delete(editor::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/career-focus",
            post(editor::handle_set_career_focus),
        )
        .route("/api/v1/sessions/:id/upload", post(editor::handle_upload))
        .route(
            "/api/v1/sessions/:id/start-manually",
            post(editor::handle_start_manually),
        )
        .route(
            "/api/v1/sessions/:id/start-over",
            post(editor::handle_start_over),
        )
        .route(
            "/api/v1/sessions/:id/dismiss-error",
            post(editor::handle_dismiss_error),
        )
        // Resume record
        .route(
            "/api/v1/sessions/:id/resume",
            put(editor::handle_replace_resume),
        )
        .route(
            "/api/v1/sessions/:id/resume/personal-info",
            patch(editor::handle_update_personal_info),
        )
        .route(
            "/api/v1/sessions/:id/resume/certifications",
            put(editor::handle_set_certifications),
        )
        .route(
            "/api/v1/sessions/:id/resume/awards",
            put(editor::handle_set_awards),
        )
        // Style
        .route(
            "/api/v1/sessions/:id/style",
            put(editor::handle_replace_style).patch(editor::handle_update_style),
        )
        // Output
        .route("/api/v1/sessions/:id/preview", get(preview::handle_preview))
        .route("/api/v1/sessions/:id/print", get(preview::handle_print))
        .route(
            "/api/v1/sessions/:id/export.pdf",
            get(export::handle_export_pdf),
        );

    section_routes(router)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::editor::store::SessionStore;
    use crate::extraction::test_support::StubExtractor;

    fn app_with(extractor: Arc<StubExtractor>) -> Router {
        build_router(AppState {
            extractor,
            sessions: SessionStore::new(),
            config: Config::for_tests(),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(StubExtractor::replying(r#"{"personalInfo": {"fullName": "Sam Lee"}}"#)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = send(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["id"].as_str().unwrap().to_string()
    }

    fn multipart(file_name: &str, contents: &str) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {contents}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&app(), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_session_starts_on_upload_with_sample_data() {
        let app = app();
        let id = create_session(&app).await;
        let response = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let session = json_body(response).await;
        assert_eq!(session["view"], "upload");
        assert_eq!(session["data"]["personalInfo"]["fullName"], "Alex Rivera");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404_with_error_body() {
        let uri = format!("/api/v1/sessions/{}", Uuid::new_v4());
        let response = send(&app(), "GET", &uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_section_routes_do_not_shadow_named_fields() {
        let app = app();
        let id = create_session(&app).await;

        let response = send(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/resume/personal-info"),
            Some(json!({ "fullName": "Jordan Park" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["personalInfo"]["fullName"], "Jordan Park");

        let response = send(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/resume/awards"),
            Some(json!({ "text": "Best Paper\n\n  Hackathon Winner " })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["awards"],
            json!(["Best Paper", "Hackathon Winner"])
        );
    }

    #[tokio::test]
    async fn test_add_update_remove_skill() {
        let app = app();
        let id = create_session(&app).await;

        let response = send(&app, "POST", &format!("/api/v1/sessions/{id}/resume/skills"), None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let added = json_body(response).await;
        let item_id = added["itemId"].as_str().unwrap().to_string();
        let count = added["data"]["skills"].as_array().unwrap().len();
        assert_eq!(added["data"]["skills"][count - 1]["id"], item_id.as_str());

        let response = send(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/resume/skills/{item_id}"),
            Some(json!({ "itemsText": "Rust, , Tokio,Axum " })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let data = json_body(response).await;
        assert_eq!(data["skills"][count - 1]["items"], json!(["Rust", "Tokio", "Axum"]));

        let response = send(
            &app,
            "DELETE",
            &format!("/api/v1/sessions/{id}/resume/skills/{item_id}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["skills"].as_array().unwrap().len(), count - 1);
    }

    #[tokio::test]
    async fn test_removing_missing_item_is_404() {
        let app = app();
        let id = create_session(&app).await;
        let response = send(
            &app,
            "DELETE",
            &format!("/api/v1/sessions/{id}/resume/projects/nope"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_accent_is_rejected() {
        let app = app();
        let id = create_session(&app).await;
        let response = send(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/style"),
            Some(json!({ "accentColor": "red; background: url(x)" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_opens_editor_with_extracted_data() {
        let extractor = Arc::new(StubExtractor::replying(
            r#"{"personalInfo": {"fullName": "Sam Lee"}}"#,
        ));
        let app = app_with(extractor.clone());
        let id = create_session(&app).await;

        let mut request = multipart("resume.txt", "Sam Lee\nEngineer");
        *request.uri_mut() = format!("/api/v1/sessions/{id}/upload").parse().unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let session = json_body(response).await;
        assert_eq!(session["view"], "editor");
        assert_eq!(session["data"]["personalInfo"]["fullName"], "Sam Lee");
        assert_eq!(extractor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_upload_never_reaches_extractor() {
        let extractor = Arc::new(StubExtractor::failing());
        let app = app_with(extractor.clone());
        let id = create_session(&app).await;

        let mut request = multipart("photo.png", "not a resume");
        *request.uri_mut() = format!("/api/v1/sessions/{id}/upload").parse().unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "UNSUPPORTED_FILE_TYPE");
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_upload_is_stored_and_dismissible() {
        let app = app_with(Arc::new(StubExtractor::failing()));
        let id = create_session(&app).await;

        let mut request = multipart("resume.pdf", "%PDF-1.4");
        *request.uri_mut() = format!("/api/v1/sessions/{id}/upload").parse().unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let session = json_body(send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await).await;
        assert!(session["error"].is_string(), "error should be stored on the session");
        assert_eq!(session["isProcessing"], false);

        let response = send(&app, "POST", &format!("/api/v1/sessions/{id}/dismiss-error"), None).await;
        assert!(json_body(response).await["error"].is_null());
    }

    #[tokio::test]
    async fn test_preview_is_html() {
        let app = app();
        let id = create_session(&app).await;
        let response = send(&app, "GET", &format!("/api/v1/sessions/{id}/preview"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"), "got {content_type}");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Alex Rivera"));
    }

    #[tokio::test]
    async fn test_export_downloads_named_pdf() {
        let app = app();
        let id = create_session(&app).await;
        let response = send(
            &app,
            "GET",
            &format!("/api/v1/sessions/{id}/export.pdf?pageSize=letter&scale=0.9"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Alex_Rivera_Professional_Resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_rejects_bad_scale() {
        let app = app();
        let id = create_session(&app).await;
        let response = send(
            &app,
            "GET",
            &format!("/api/v1/sessions/{id}/export.pdf?scale=9"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
