//! File server to point the source editor at.
//!
//! Serves every file under a directory with `Content-Type`, `ETag` and
//! `Allow`, and accepts `PUT` guarded by `If-Match`.
//!
//! Run with: cargo run --example source_server -- ./public

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use source_editor::protocol::{format_allow, if_match_satisfied};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Component, PathBuf};
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    root: Arc<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    anyhow::ensure!(root.is_dir(), "{} is not a directory", root.display());

    let state = AppState {
        root: Arc::new(root.canonicalize()?),
    };
    let app = Router::new()
        .route("/{*path}", get(read_file).put(write_file))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!(
        "Serving {} on http://{}",
        state.root.display(),
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn read_file(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let Some(file) = resolve(&state, &path) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    match tokio::fs::read(&file).await {
        Ok(contents) => {
            tracing::debug!("GET {} ({} bytes)", file.display(), contents.len());
            (
                [
                    (header::CONTENT_TYPE, content_type_for(&path).to_string()),
                    (header::ETAG, entity_tag(&contents)),
                    (header::ALLOW, allow_header()),
                ],
                contents,
            )
                .into_response()
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to read {}: {}", file.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn write_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(file) = resolve(&state, &path) else {
        return StatusCode::BAD_REQUEST;
    };

    let current = tokio::fs::read(&file).await.ok();
    if let Some(if_match) = headers.get(header::IF_MATCH).and_then(|v| v.to_str().ok()) {
        let satisfied = current
            .as_deref()
            .map(|contents| if_match_satisfied(if_match, &entity_tag(contents)))
            .unwrap_or(false);
        if !satisfied {
            tracing::info!("PUT {} rejected: stale If-Match {}", file.display(), if_match);
            return StatusCode::PRECONDITION_FAILED;
        }
    }

    match tokio::fs::write(&file, &body).await {
        Ok(()) => {
            tracing::info!("PUT {} ({} bytes)", file.display(), body.len());
            if current.is_some() {
                StatusCode::NO_CONTENT
            } else {
                StatusCode::CREATED
            }
        }
        Err(e) => {
            tracing::error!("Failed to write {}: {}", file.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Map a request path below the root, refusing anything that climbs out of it.
fn resolve(state: &AppState, path: &str) -> Option<PathBuf> {
    let relative = std::path::Path::new(path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(state.root.join(relative))
}

fn entity_tag(contents: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    contents.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

fn allow_header() -> String {
    format_allow(&[
        http::Method::GET,
        http::Method::HEAD,
        http::Method::PUT,
    ])
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or_default() {
        "ttl" => "text/turtle",
        "n3" => "text/n3",
        "jsonld" => "application/ld+json",
        "json" => "application/json",
        "rdf" => "application/rdf+xml",
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
