use crate::error::ApiError;
use crate::question_payload::QuestionPayload;
use crate::session_response::{Notification, SessionResponse};
use crate::session_store::SessionStore;
use crate::upload::parse_multipart;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use docuquery::document_processor::is_pdf_media_type;
use docuquery::{
    AnswerModel, AskRequest, AskResponse, DocumentProcessor, Effect, ExtractionError,
    QueryService, SessionEvent,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub query_service: Arc<QueryService>,
    pub processor: DocumentProcessor,
}

impl AppState {
    pub fn new(model: Arc<dyn AnswerModel>, processor: DocumentProcessor) -> Self {
        Self {
            sessions: SessionStore::new(),
            query_service: Arc::new(QueryService::new(model)),
            processor,
        }
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/document", post(upload_document))
        .route("/sessions/:id/reset", post(reset_session))
        .route("/sessions/:id/questions", post(ask_question))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.sessions.len().await,
    }))
}

/// Stateless question answering: always one of the two response shapes,
/// even when the body is not a valid request.
async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Json<AskResponse> {
    match payload {
        Ok(Json(request)) => Json(state.query_service.ask(&request).await),
        Err(rejection) => {
            log::warn!("Rejected /ask body: {}", rejection.body_text());
            Json(AskResponse::error(format!(
                "Invalid input: {}",
                rejection.body_text()
            )))
        }
    }
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let view = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionResponse::quiet(view)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    Ok(Json(SessionResponse::quiet(state.sessions.view(id).await?)))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (_, view) = state.sessions.apply(id, SessionEvent::Reset).await?;
    Ok(Json(SessionResponse::quiet(view)))
}

async fn upload_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<SessionResponse>, ApiError> {
    state.sessions.view(id).await?;
    let file = parse_multipart(multipart).await?;

    if !is_pdf_media_type(&file.media_type) {
        log::warn!(
            "Session {}: rejected {} ({:?})",
            id,
            file.filename,
            file.media_type
        );
        return Err(ExtractionError::InvalidFileType {
            media_type: file.media_type,
        }
        .into());
    }

    let (effect, view) = state
        .sessions
        .apply(
            id,
            SessionEvent::UploadStarted {
                filename: file.filename.clone(),
            },
        )
        .await?;
    let Effect::Extract { generation } = effect else {
        return Ok(Json(SessionResponse::quiet(view)));
    };

    let processor = state.processor.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        processor.process_upload(&file.filename, &file.media_type, &file.data)
    })
    .await
    .unwrap_or_else(|e| {
        log::error!("Extraction task for session {} failed: {}", id, e);
        Err(ExtractionError::Failed {
            detail: e.to_string(),
        })
    });

    match outcome {
        Ok(document) => {
            let (effect, view) = state
                .sessions
                .apply(
                    id,
                    SessionEvent::DocumentExtracted {
                        generation,
                        document,
                    },
                )
                .await?;
            if effect == Effect::Stale {
                return Ok(Json(SessionResponse::quiet(view)));
            }
            Ok(Json(SessionResponse::notify(
                view,
                Notification::file_processed(),
            )))
        }
        Err(err) => {
            let (effect, view) = state
                .sessions
                .apply(id, SessionEvent::ExtractionFailed { generation })
                .await?;
            if effect == Effect::Stale {
                return Ok(Json(SessionResponse::quiet(view)));
            }
            Err(err.into())
        }
    }
}

async fn ask_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuestionPayload>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (effect, view) = state
        .sessions
        .apply(
            id,
            SessionEvent::QuestionSubmitted {
                question: payload.question,
            },
        )
        .await?;
    let Effect::Ask {
        generation,
        document,
        question,
    } = effect
    else {
        return Ok(Json(SessionResponse::quiet(view)));
    };

    let response = state
        .query_service
        .ask_about(&document.text, &question)
        .await;

    let notification = match &response {
        AskResponse::Failed { error } => Some(Notification::failure(error)),
        AskResponse::Answered(_) => None,
    };

    let (effect, view) = state
        .sessions
        .apply(id, SessionEvent::from_response(generation, response))
        .await?;

    Ok(Json(match (effect, notification) {
        (Effect::Applied, Some(notification)) => SessionResponse::notify(view, notification),
        _ => SessionResponse::quiet(view),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_response::{NotificationKind, SessionView, View};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use docuquery::{Answer, PageExtractor, GENERIC_ANSWER_ERROR};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Mutex};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    struct TwoPages;

    impl PageExtractor for TwoPages {
        fn pages(&self, _bytes: &[u8]) -> anyhow::Result<Vec<String>> {
            Ok(vec!["Alpha.".to_string(), "Beta.".to_string()])
        }
    }

    struct Unreadable;

    impl PageExtractor for Unreadable {
        fn pages(&self, _bytes: &[u8]) -> anyhow::Result<Vec<String>> {
            Err(anyhow::anyhow!("xref table is corrupt"))
        }
    }

    /// Blocks inside extraction until the test sends on the paired channel, then fails.
    struct GatedUnreadable {
        entered: Notify,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl GatedUnreadable {
        fn new() -> (Arc<Self>, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let extractor = Arc::new(Self {
                entered: Notify::new(),
                release: Mutex::new(rx),
            });
            (extractor, tx)
        }
    }

    impl PageExtractor for GatedUnreadable {
        fn pages(&self, _bytes: &[u8]) -> anyhow::Result<Vec<String>> {
            self.entered.notify_one();
            let _ = self.release.lock().unwrap().recv();
            Err(anyhow::anyhow!("xref table is corrupt"))
        }
    }

    struct MockModel {
        reply: Result<Answer, String>,
        calls: AtomicUsize,
    }

    impl MockModel {
        fn answering(answer: &str, snippet: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(Answer {
                    answer: answer.to_string(),
                    snippet: snippet.map(str::to_string),
                }),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("upstream timed out".to_string()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AnswerModel for MockModel {
        async fn answer(&self, _document_text: &str, _question: &str) -> anyhow::Result<Answer> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(|e| anyhow::anyhow!(e))
        }
    }

    /// Blocks inside the model call until released.
    struct GatedModel {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl AnswerModel for GatedModel {
        async fn answer(&self, _document_text: &str, _question: &str) -> anyhow::Result<Answer> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(Answer {
                answer: "Done.".to_string(),
                snippet: None,
            })
        }
    }

    fn app(model: Arc<dyn AnswerModel>, extractor: Arc<dyn PageExtractor>) -> Router {
        let state = AppState::new(model, DocumentProcessor::with_extractor(extractor));
        router(state, 1024 * 1024)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload_request(id: &str, filename: &str, content_type: &str) -> Request<Body> {
        let boundary = "docuquery-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"%PDF-1.4 test bytes");
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(format!("/sessions/{id}/document"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn question_request(id: &str, question: &str) -> Request<Body> {
        json_request(
            "POST",
            &format!("/sessions/{id}/questions"),
            json!({ "question": question }),
        )
    }

    async fn new_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/sessions", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        body["session"]["id"].as_str().unwrap().to_string()
    }

    async fn loaded_session(app: &Router) -> String {
        let id = new_session(app).await;
        let response = app
            .clone()
            .oneshot(upload_request(&id, "sample.pdf", "application/pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        id
    }

    #[tokio::test]
    async fn upload_extracts_pages_and_switches_to_chat_view() {
        let app = app(MockModel::answering("unused", None), Arc::new(TwoPages));
        let id = new_session(&app).await;

        let response = app
            .clone()
            .oneshot(upload_request(&id, "sample.pdf", "application/pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["session"]["view"], "chat");
        assert_eq!(body["session"]["filename"], "sample.pdf");
        assert_eq!(body["session"]["pageCount"], 2);
        assert_eq!(body["notification"]["title"], "File Processed");
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected_without_state_change() {
        let app = app(MockModel::answering("unused", None), Arc::new(TwoPages));
        let id = new_session(&app).await;

        let response = app
            .clone()
            .oneshot(upload_request(&id, "notes.txt", "text/plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["notification"]["title"], "Invalid File Type");
        assert_eq!(body["notification"]["description"], "Please upload a PDF file.");

        let response = app
            .clone()
            .oneshot(Request::get(format!("/sessions/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["session"]["view"], "upload");
        assert_eq!(body["session"]["filename"], Value::Null);
    }

    #[tokio::test]
    async fn extraction_failure_leaves_session_in_upload_view() {
        let app = app(MockModel::answering("unused", None), Arc::new(Unreadable));
        let id = new_session(&app).await;

        let response = app
            .clone()
            .oneshot(upload_request(&id, "corrupt.pdf", "application/pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["notification"]["title"], "Extraction Failed");
        assert!(!body.to_string().contains("xref"));

        let response = app
            .clone()
            .oneshot(Request::get(format!("/sessions/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["session"]["view"], "upload");
        assert_eq!(body["session"]["error"], "Failed to extract text from the PDF.");
    }

    #[tokio::test]
    async fn answered_question_is_appended_to_transcript() {
        let model = MockModel::answering("It discusses X.", Some("X is discussed here."));
        let app = app(model.clone(), Arc::new(TwoPages));
        let id = loaded_session(&app).await;

        let response = app
            .clone()
            .oneshot(question_request(&id, "Summarize"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["session"]["transcript"],
            json!([{
                "question": "Summarize",
                "answer": "It discusses X.",
                "snippet": "X is discussed here."
            }])
        );
        assert_eq!(body["session"]["pendingQuestion"], Value::Null);
        assert!(body.get("notification").is_none());
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_question_is_not_deduplicated() {
        let app = app(MockModel::answering("It discusses X.", None), Arc::new(TwoPages));
        let id = loaded_session(&app).await;

        for _ in 0..2 {
            app.clone()
                .oneshot(question_request(&id, "Summarize"))
                .await
                .unwrap();
        }

        let response = app
            .clone()
            .oneshot(Request::get(format!("/sessions/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["session"]["transcript"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn model_failure_shows_generic_notification_and_reenables_input() {
        let app = app(MockModel::failing(), Arc::new(TwoPages));
        let id = loaded_session(&app).await;

        let response = app
            .clone()
            .oneshot(question_request(&id, "Summarize"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["session"]["transcript"], json!([]));
        assert_eq!(body["session"]["pendingQuestion"], Value::Null);
        assert_eq!(body["notification"]["kind"], "error");
        assert_eq!(body["notification"]["description"], GENERIC_ANSWER_ERROR);
        assert!(!body.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn question_without_document_is_rejected() {
        let model = MockModel::answering("unused", None);
        let app = app(model.clone(), Arc::new(TwoPages));
        let id = new_session(&app).await;

        let response = app
            .clone()
            .oneshot(question_request(&id, "Summarize"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_question_while_one_is_pending_conflicts() {
        let model = Arc::new(GatedModel {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let app = app(model.clone(), Arc::new(TwoPages));
        let id = loaded_session(&app).await;

        let first = tokio::spawn(app.clone().oneshot(question_request(&id, "Summarize")));
        model.entered.notified().await;

        let second = app
            .clone()
            .oneshot(question_request(&id, "Anything else?"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);

        model.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let body = body_json(first).await;
        assert_eq!(body["session"]["transcript"][0]["answer"], "Done.");
    }

    #[tokio::test]
    async fn answer_arriving_after_reset_is_dropped() {
        let model = Arc::new(GatedModel {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let app = app(model.clone(), Arc::new(TwoPages));
        let id = loaded_session(&app).await;

        let pending = tokio::spawn(app.clone().oneshot(question_request(&id, "Summarize")));
        model.entered.notified().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", &format!("/sessions/{id}/reset"), json!({})))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["session"]["view"], "upload");

        model.release.notify_one();
        let body = body_json(pending.await.unwrap().unwrap()).await;
        assert_eq!(body["session"]["view"], "upload");
        assert_eq!(body["session"]["transcript"], json!([]));
    }

    #[tokio::test]
    async fn stateless_ask_reports_validation_errors() {
        let model = MockModel::answering("unused", None);
        let app = app(model.clone(), Arc::new(TwoPages));

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/ask",
                json!({ "documentText": "", "question": "What is discussed?" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid input: Document text cannot be empty." })
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stateless_ask_returns_answer_shape() {
        let app = app(MockModel::answering("It discusses X.", None), Arc::new(TwoPages));

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/ask",
                json!({ "documentText": "X.", "question": "Summarize" }),
            ))
            .await
            .unwrap();

        assert_eq!(body_json(response).await, json!({ "answer": "It discusses X." }));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let app = app(MockModel::answering("unused", None), Arc::new(TwoPages));

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/sessions/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["notification"]["kind"], "error");
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let app = app(MockModel::answering("unused", None), Arc::new(TwoPages));
        let id = new_session(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(Request::get(format!("/sessions/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn session_view_reports_upload_view_for_new_sessions() {
        let view = SessionView::new(Uuid::nil(), &docuquery::Session::new());
        assert_eq!(view.view, View::Upload);
        assert!(!view.extracting);
        assert_eq!(Notification::file_processed().kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn failed_extraction_after_reset_returns_quiet_view() {
        let (extractor, release) = GatedUnreadable::new();
        let app = app(MockModel::answering("unused", None), extractor.clone());
        let id = new_session(&app).await;

        let upload = tokio::spawn(
            app.clone()
                .oneshot(upload_request(&id, "corrupt.pdf", "application/pdf")),
        );
        extractor.entered.notified().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", &format!("/sessions/{id}/reset"), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        release.send(()).unwrap();
        let response = upload.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["session"]["view"], "upload");
        assert_eq!(body["session"]["error"], Value::Null);
        assert!(body.get("notification").is_none());
    }

    #[tokio::test]
    async fn upload_while_question_pending_conflicts() {
        let model = Arc::new(GatedModel {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let app = app(model.clone(), Arc::new(TwoPages));
        let id = loaded_session(&app).await;

        let pending = tokio::spawn(app.clone().oneshot(question_request(&id, "Summarize")));
        model.entered.notified().await;

        let response = app
            .clone()
            .oneshot(upload_request(&id, "other.pdf", "application/pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "A question is already being answered.");

        model.release.notify_one();
        let body = body_json(pending.await.unwrap().unwrap()).await;
        assert_eq!(body["session"]["filename"], "sample.pdf");
        assert_eq!(body["session"]["transcript"][0]["answer"], "Done.");
    }

    #[tokio::test]
    async fn upload_in_chat_view_conflicts_and_keeps_document() {
        let model = MockModel::answering("It discusses X.", None);
        let app = app(model.clone(), Arc::new(TwoPages));
        let id = loaded_session(&app).await;
        app.clone()
            .oneshot(question_request(&id, "Summarize"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(upload_request(&id, "other.pdf", "application/pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(Request::get(format!("/sessions/{id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["session"]["view"], "chat");
        assert_eq!(body["session"]["filename"], "sample.pdf");
        assert_eq!(body["session"]["transcript"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stateless_ask_maps_malformed_body_to_error_shape() {
        let model = MockModel::answering("unused", None);
        let app = app(model.clone(), Arc::new(TwoPages));

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/ask",
                json!({ "documentText": 5, "question": "q" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Invalid input: "), "{}", error);
        assert_eq!(body.as_object().unwrap().len(), 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let state = AppState::new(
            MockModel::answering("unused", None),
            DocumentProcessor::with_extractor(Arc::new(TwoPages)),
        );
        let app = router(state, 16);
        let id = new_session(&app).await;

        let response = app
            .clone()
            .oneshot(upload_request(&id, "sample.pdf", "application/pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
