// src/ports/http.rs
use crate::application::{KeyValueStore, NoteService, PadService};
use crate::domain::id::{generate_pad_id, is_servable_pad_id};
use crate::domain::{DomainError, Note, NoteDraft, NotePatch};
use crate::infrastructure::Config;
use crate::ports::html::{HtmlPresenter, NOTES_SCRIPT, PAD_SCRIPT};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION},
        Method, StatusCode, Uri,
    },
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

pub type SharedStore = Arc<dyn KeyValueStore>;

pub struct AppState {
    pads: PadService<SharedStore>,
    notes: NoteService<SharedStore>,
    presenter: HtmlPresenter,
}

impl AppState {
    pub fn new(store: SharedStore, config: &Config) -> Self {
        let limit = config.limits.max_content_bytes;
        Self {
            pads: PadService::with_limit(Arc::clone(&store), limit),
            notes: NoteService::with_limit(store, limit),
            presenter: HtmlPresenter::with_editor_config(config.editor.clone()),
        }
    }
}

/// Error returned by JSON endpoints as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Body could not be read or decoded
    Request(StatusCode, String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Wrong field types and missing fields are malformed bodies too.
        let status = match &rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            other => other.status(),
        };
        Self::Request(status, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Request(status, message) => (status, message),
            ApiError::Domain(DomainError::NoteNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Note not found".to_string())
            }
            ApiError::Domain(DomainError::PayloadTooLarge { size, limit }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Content too large ({size} bytes, limit {limit}); remove some images"),
            ),
            ApiError::Domain(e @ DomainError::InvalidId(_)) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Domain(e) => {
                error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn create_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    let notes_api = Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE]),
        );

    Router::new()
        .route("/", get(redirect_to_new_pad))
        .route("/index.html", get(redirect_to_new_pad))
        .route("/api/save", post(save_pad))
        .route("/notes", get(notes_app))
        .route("/assets/pad.js", get(pad_script))
        .route("/assets/notes.js", get(notes_script))
        .merge(notes_api)
        .fallback(show_pad)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!(%addr, "EdgePad listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn redirect_to_new_pad() -> Response {
    let id = generate_pad_id();
    debug!(pad_id = %id, "Redirecting to new pad");
    (
        StatusCode::FOUND,
        [(LOCATION, format!("/{id}")), (CACHE_CONTROL, "no-store".to_string())],
    )
        .into_response()
}

/// Run a store-backed operation off the async workers.
async fn blocking<T, F>(state: &Arc<AppState>, op: F) -> Result<T, DomainError>
where
    F: FnOnce(&AppState) -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(&state))
        .await
        .map_err(|e| DomainError::Storage(format!("store task failed: {e}")))?
}

/// Every path no other route claims is a pad id. The dot check runs on the
/// raw path; a segment that does not decode to UTF-8 is used as is.
async fn show_pad(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let raw = uri.path().strip_prefix('/').unwrap_or(uri.path());
    if !is_servable_pad_id(raw) {
        return (StatusCode::NOT_FOUND, "404").into_response();
    }
    let id = urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    let lookup = id.clone();
    match blocking(&state, move |s| s.pads.load(&lookup)).await {
        Ok(pad) => (
            [
                (CONTENT_TYPE, "text/html;charset=UTF-8"),
                (CACHE_CONTROL, "no-store"),
            ],
            state.presenter.render_pad(&pad),
        )
            .into_response(),
        Err(e) => {
            error!(pad_id = %id, error = %e, "Failed to load pad");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {e}")).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SaveRequest {
    id: String,
    #[serde(default)]
    content: Option<String>,
}

async fn save_pad(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(request) = payload?;
    blocking(&state, move |s| {
        s.pads
            .save(&request.id, request.content.as_deref().unwrap_or_default())
    })
    .await?;
    Ok(Json(json!({ "success": true })))
}

async fn notes_app(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.presenter.render_notes_app())
}

async fn pad_script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript; charset=utf-8")], PAD_SCRIPT)
}

async fn notes_script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript; charset=utf-8")], NOTES_SCRIPT)
}

async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(blocking(&state, |s| s.notes.list()).await?))
}

async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(draft) = payload?;
    let note = blocking(&state, move |s| s.notes.create(draft)).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(blocking(&state, move |s| s.notes.get(&id)).await?))
}

async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<NotePatch>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(blocking(&state, move |s| s.notes.update(&id, patch)).await?))
}

async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    blocking(&state, move |s| s.notes.delete(&id)).await?;
    Ok(Json(json!({ "success": true })))
}
