//! `HttpClient` against a live axum server on an ephemeral port.

mod common;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use common::ToyCodec;
use parking_lot::Mutex;
use source_editor::client::{ClientConfig, HttpClient};
use source_editor::editor::{EditorConfig, MemorySurface, RenderSurface, SourceEditor};
use source_editor::protocol::if_match_satisfied;
use source_editor::{
    EditorError, EditorEvent, EditorState, PersistenceController, SessionContext,
};
use std::sync::Arc;

#[derive(Debug)]
struct Document {
    body: String,
    version: u64,
    writable: bool,
}

impl Document {
    fn etag(&self) -> String {
        format!("\"v{}\"", self.version)
    }
}

type SharedDocument = Arc<Mutex<Document>>;

async fn read_document(State(doc): State<SharedDocument>) -> Response {
    let doc = doc.lock();
    let allow = if doc.writable {
        "GET, HEAD, PUT"
    } else {
        "GET, HEAD"
    };
    (
        [
            (header::CONTENT_TYPE, "text/turtle".to_string()),
            (header::ETAG, doc.etag()),
            (header::ALLOW, allow.to_string()),
        ],
        doc.body.clone(),
    )
        .into_response()
}

async fn write_document(
    State(doc): State<SharedDocument>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let mut doc = doc.lock();
    if !doc.writable {
        return StatusCode::METHOD_NOT_ALLOWED;
    }
    if let Some(if_match) = headers.get(header::IF_MATCH).and_then(|v| v.to_str().ok()) {
        if !if_match_satisfied(if_match, &doc.etag()) {
            return StatusCode::PRECONDITION_FAILED;
        }
    }
    doc.body = body;
    doc.version += 1;
    StatusCode::NO_CONTENT
}

async fn spawn_server(body: &str, writable: bool) -> (String, SharedDocument) {
    let doc = Arc::new(Mutex::new(Document {
        body: body.to_string(),
        version: 1,
        writable,
    }));
    let app = Router::new()
        .route("/card.ttl", get(read_document).put(write_document))
        .with_state(doc.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/card.ttl", addr), doc)
}

fn client() -> Arc<HttpClient> {
    Arc::new(
        HttpClient::with_config(ClientConfig {
            max_retries: 0,
            request_timeout_ms: 5000,
            ..Default::default()
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn load_reads_headers() {
    let (uri, _doc) = spawn_server("<> a \"test\".", true).await;
    let controller = PersistenceController::new(client(), SessionContext::new());

    let loaded = controller.load(&uri).await.unwrap();

    assert_eq!(loaded.body, "<> a \"test\".");
    assert_eq!(loaded.metadata.content_type.as_deref(), Some("text/turtle"));
    assert_eq!(loaded.metadata.entity_tag.as_deref(), Some("\"v1\""));
    assert!(loaded.metadata.writable());
    assert!(controller.session().is_requested(&uri));
}

#[tokio::test]
async fn save_sends_if_match_and_refreshes() {
    let (uri, doc) = spawn_server("<> a \"test\".", true).await;
    let controller = PersistenceController::new(client(), SessionContext::new());

    let metadata = controller
        .save(&uri, "<> a \"new\".", Some("text/turtle"), Some("\"v1\""))
        .await
        .unwrap();

    assert_eq!(metadata.entity_tag.as_deref(), Some("\"v2\""));
    assert_eq!(doc.lock().body, "<> a \"new\".");
}

#[tokio::test]
async fn stale_tag_is_a_conflict() {
    let (uri, doc) = spawn_server("<> a \"test\".", true).await;
    doc.lock().version = 7;
    let controller = PersistenceController::new(client(), SessionContext::new());

    let err = controller
        .save(&uri, "<> a \"mine\".", Some("text/turtle"), Some("\"v1\""))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "Error: File changed by someone else");
    assert_eq!(doc.lock().body, "<> a \"test\".");
}

#[tokio::test]
async fn missing_resource_is_status_error() {
    let (uri, _doc) = spawn_server("<> a \"test\".", true).await;
    let missing = uri.replace("card.ttl", "nothing.ttl");
    let controller = PersistenceController::new(client(), SessionContext::new());

    let err = controller.load(&missing).await.unwrap_err();

    assert!(matches!(err, EditorError::Status { status: 404, .. }));
    assert!(err.is_load_failure());
}

#[tokio::test]
async fn editor_session_over_http() {
    let (uri, doc) = spawn_server("<> a \"test\".", true).await;
    let mut editor = SourceEditor::new(
        &uri,
        MemorySurface::new(),
        client(),
        ToyCodec::shared(),
        SessionContext::new(),
        EditorConfig::default(),
    )
    .unwrap();
    editor.open().await.unwrap();
    assert_eq!(editor.state(), EditorState::Unedited);

    editor.handle_event(EditorEvent::EditClicked).await.unwrap();
    let text_area = editor.elements().text_area;
    editor
        .surface_mut()
        .set_value(text_area, "<> a \"test\".\n<> <#name> \"Card\" .");
    editor.handle_event(EditorEvent::KeyUp).await.unwrap();
    editor.handle_event(EditorEvent::SaveClicked).await.unwrap();

    assert_eq!(editor.state(), EditorState::Unedited);
    assert_eq!(editor.metadata().entity_tag.as_deref(), Some("\"v2\""));
    assert!(doc.lock().body.contains("Card"));
}

#[tokio::test]
async fn read_only_resource_cannot_be_edited() {
    let (uri, _doc) = spawn_server("<> a \"test\".", false).await;
    let mut editor = SourceEditor::new(
        &uri,
        MemorySurface::new(),
        client(),
        ToyCodec::shared(),
        SessionContext::new(),
        EditorConfig::default(),
    )
    .unwrap();
    editor.open().await.unwrap();

    assert!(!editor.metadata().writable());
    assert!(!editor.surface().is_visible(editor.elements().edit));
}

#[tokio::test]
async fn overlapping_saves_are_single_flight() {
    let (uri, doc) = spawn_server("<> a \"test\".", true).await;
    let session = SessionContext::new();
    let first = PersistenceController::new(client(), session.clone());
    let second = PersistenceController::new(client(), session.clone());

    let (a, b) = futures::join!(
        first.save(&uri, "<> a \"first\".", Some("text/turtle"), Some("\"v1\"")),
        second.save(&uri, "<> a \"second\".", Some("text/turtle"), Some("\"v1\"")),
    );

    assert!(a.is_ok());
    assert!(matches!(b, Err(EditorError::SaveInFlight(_))));
    assert_eq!(doc.lock().body, "<> a \"first\".");
    assert!(!session.save_in_flight(&uri));
}
