//! HTTP surface: router, handlers, and error-to-status mapping.
//!
//! Three core operations: list the catalog (`GET /`), accept an upload
//! (`POST /`), and render a document (`GET /md/{name}`). The widget script,
//! stylesheet, and raw document bytes are served alongside them.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{error, info, warn};

use markdrop_render::{pages, render_markdown};
use markdrop_shared::{DocumentName, MarkdropError};
use markdrop_store::DocumentStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<DocumentStore>,
}

/// Build the application router.
pub(crate) fn router(store: DocumentStore) -> Router {
    let state = AppState {
        store: Arc::new(store),
    };

    Router::new()
        .route("/", get(index).post(upload))
        .route("/md/{name}", get(render_document))
        .route("/raw/{name}", get(raw_document))
        .route("/assets/widget.js", get(widget_js))
        .route("/assets/style.css", get(style_css))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /`: the catalog page with the capture widget.
async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let entries = state.store.list().await?;
    Ok(Html(pages::index_page(&entries)))
}

/// `POST /`: multipart upload carrying a `name` field and a `file` field.
///
/// The acknowledgment is sent only after the store has renamed the document
/// into place, so a 200 means the write is durable.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, PageError> {
    let mut name: Option<DocumentName> = None;
    let mut bytes: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MarkdropError::malformed(e.to_string()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| MarkdropError::malformed(e.to_string()))?;
                name = Some(value.parse()?);
            }
            Some("file") => {
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| MarkdropError::malformed(e.to_string()))?,
                );
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let name = name.ok_or_else(|| MarkdropError::malformed("missing 'name' field"))?;
    let bytes = bytes.ok_or_else(|| MarkdropError::malformed("missing 'file' field"))?;

    state.store.write(&name, &bytes).await?;
    info!(name = %name, bytes = bytes.len(), "document uploaded");

    Ok((StatusCode::OK, "upload complete\n").into_response())
}

/// `GET /md/{name}`: render a stored document as HTML.
async fn render_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, PageError> {
    let name: DocumentName = name.parse()?;
    let source = state.store.read(&name).await?;
    let body = render_markdown(&source);
    Ok(Html(pages::document_page(name.as_str(), &body)))
}

/// `GET /raw/{name}`: the stored markdown bytes, unconverted.
async fn raw_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, PageError> {
    let name: DocumentName = name.parse()?;
    let content = state.store.read(&name).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        content,
    )
        .into_response())
}

/// `GET /assets/widget.js`: the capture widget, embedded at compile time.
async fn widget_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_str!("../assets/widget.js"),
    )
}

/// `GET /assets/style.css`: page styling, embedded at compile time.
async fn style_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../assets/style.css"),
    )
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Wrapper that turns [`MarkdropError`] into a user-facing HTTP response.
///
/// Client mistakes map to 4xx with a message naming the problem; storage
/// failures map to 500 with a generic message. Internal details (paths,
/// io::Error sources) are logged, never sent to the client.
#[derive(Debug)]
pub(crate) struct PageError(MarkdropError);

impl From<MarkdropError> for PageError {
    fn from(err: MarkdropError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            MarkdropError::DocumentNotFound { name } => (
                StatusCode::NOT_FOUND,
                format!("no document named '{name}'"),
            ),
            MarkdropError::InvalidName { .. } => (
                StatusCode::BAD_REQUEST,
                "invalid document name".to_string(),
            ),
            MarkdropError::MalformedUpload { message } => (
                StatusCode::BAD_REQUEST,
                format!("malformed upload: {message}"),
            ),
            MarkdropError::Io { .. } | MarkdropError::Config { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage error".to_string())
            }
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "request rejected");
        }

        (status, Html(pages::error_page(status.as_u16(), &message))).into_response()
    }
}
