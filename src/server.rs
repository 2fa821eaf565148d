//! HTTP form surface.
//!
//! The browser-facing equivalent of the text menu: the same four operations
//! over a small JSON API, plus a single-page form served at `/` with an
//! operation dropdown. Semantics are identical to the menu shell — every
//! request is one fetch → transform → push against the remote store, with no
//! coordination between concurrent callers (last push wins).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Form page (view / remove / add) |
//! | `GET`  | `/pairs` | List all turn pairs |
//! | `POST` | `/pairs/remove` | Remove pairs by index/range tokens |
//! | `POST` | `/pairs/add` | Add pairs from parallel user/assistant lists |
//! | `POST` | `/pairs/import` | Bulk-append role/content entries |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "invalid_range", "message": "invalid range: 6-3" } }
//! ```
//!
//! Error codes: `parse_error`, `invalid_index`, `invalid_range`,
//! `shape_mismatch`, `invalid_import`, `bad_pairing` (all 400),
//! `remote_store` (502), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the form page and
//! external clients can call the API from anywhere.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::CurateError;
use crate::models::TurnPair;
use crate::session::Session;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    session: Arc<Session>,
}

/// Start the HTTP surface on the configured bind address.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config, session: Session) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState {
        session: Arc::new(session),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(handle_index))
        .route("/pairs", get(handle_view))
        .route("/pairs/remove", post(handle_remove))
        .route("/pairs/add", post(handle_add))
        .route("/pairs/import", post(handle_import))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("Curation server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g. `"invalid_range"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Map a session-layer failure to a status code and error code by the
/// [`CurateError`] kind buried in the anyhow chain.
fn classify_error(err: anyhow::Error) -> AppError {
    let message = format!("{:#}", err);

    let (status, code) = match err.downcast_ref::<CurateError>() {
        Some(CurateError::Token(_)) => (StatusCode::BAD_REQUEST, "parse_error"),
        Some(CurateError::InvalidIndex(_)) => (StatusCode::BAD_REQUEST, "invalid_index"),
        Some(CurateError::InvalidRange(_, _)) => (StatusCode::BAD_REQUEST, "invalid_range"),
        Some(CurateError::ShapeMismatch { .. }) => (StatusCode::BAD_REQUEST, "shape_mismatch"),
        Some(CurateError::InvalidImportSchema(_)) => (StatusCode::BAD_REQUEST, "invalid_import"),
        Some(CurateError::OddRecordCount(_)) | Some(CurateError::RolePairing(_)) => {
            (StatusCode::BAD_REQUEST, "bad_pairing")
        }
        Some(CurateError::RemoteStore(_)) => (StatusCode::BAD_GATEWAY, "remote_store"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    AppError {
        status,
        code: code.to_string(),
        message,
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET / ============

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ============ GET /pairs ============

#[derive(Serialize)]
struct PairsResponse {
    pairs: Vec<TurnPair>,
}

async fn handle_view(State(state): State<AppState>) -> Result<Json<PairsResponse>, AppError> {
    let pairs = state.session.view().await.map_err(classify_error)?;
    Ok(Json(PairsResponse { pairs }))
}

// ============ POST /pairs/remove ============

#[derive(Deserialize)]
struct RemoveRequest {
    /// Index/range tokens exactly as typed in the menu, e.g. `"1 3 5-7"`.
    tokens: String,
}

#[derive(Serialize)]
struct RemoveResponse {
    removed: usize,
    remaining: usize,
}

async fn handle_remove(
    State(state): State<AppState>,
    Json(req): Json<RemoveRequest>,
) -> Result<Json<RemoveResponse>, AppError> {
    let outcome = state
        .session
        .remove(&req.tokens)
        .await
        .map_err(classify_error)?;
    Ok(Json(RemoveResponse {
        removed: outcome.removed,
        remaining: outcome.remaining,
    }))
}

// ============ POST /pairs/add ============

/// Parallel lists of user and assistant values, zipped into pairs.
/// Counts must match (`shape_mismatch` otherwise).
#[derive(Deserialize)]
struct AddRequest {
    user: Vec<String>,
    assistant: Vec<String>,
}

#[derive(Serialize)]
struct AddResponse {
    added: usize,
}

async fn handle_add(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<AddResponse>, AppError> {
    let added = state
        .session
        .add_many(&req.user, &req.assistant)
        .await
        .map_err(classify_error)?;
    Ok(Json(AddResponse { added }))
}

// ============ POST /pairs/import ============

#[derive(Deserialize)]
struct ImportRequest {
    /// Raw entries; validated against the role/content schema.
    entries: serde_json::Value,
}

async fn handle_import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<AddResponse>, AppError> {
    let added = state
        .session
        .import_json(req.entries)
        .await
        .map_err(classify_error)?;
    Ok(Json(AddResponse { added }))
}

/// Single-page form surface: an operation dropdown plus text inputs, talking
/// to the JSON endpoints above.
const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>turndeck</title>
<style>
  body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; }
  textarea, input[type=text] { width: 100%; margin: 0.25rem 0 0.75rem; }
  .pair { border-bottom: 1px solid #ccc; padding: 0.5rem 0; }
  .err { color: #b00; }
</style>
</head>
<body>
<h1>turndeck</h1>
<select id="op" onchange="switchOp()">
  <option value="view">View data</option>
  <option value="remove">Remove pairs</option>
  <option value="add">Add pairs</option>
</select>

<div id="panel-remove" hidden>
  <label>Indices to remove (e.g., 1 3 5-7)</label>
  <input type="text" id="tokens">
  <button onclick="removePairs()">Remove</button>
</div>

<div id="panel-add" hidden>
  <label>User values (one per line)</label>
  <textarea id="user" rows="4"></textarea>
  <label>Assistant values (one per line)</label>
  <textarea id="assistant" rows="4"></textarea>
  <button onclick="addPairs()">Add</button>
</div>

<p id="status"></p>
<div id="pairs"></div>

<script>
function lines(id) {
  return document.getElementById(id).value.split("\n").map(s => s.trim()).filter(s => s);
}
function status(msg, isErr) {
  const el = document.getElementById("status");
  el.textContent = msg;
  el.className = isErr ? "err" : "";
}
async function call(path, body) {
  const opts = body === undefined ? {} :
    { method: "POST", headers: {"Content-Type": "application/json"}, body: JSON.stringify(body) };
  const resp = await fetch(path, opts);
  const data = await resp.json();
  if (!resp.ok) throw new Error(data.error.message);
  return data;
}
async function viewPairs() {
  const data = await call("/pairs");
  const el = document.getElementById("pairs");
  el.innerHTML = "";
  for (const p of data.pairs) {
    const div = document.createElement("div");
    div.className = "pair";
    div.textContent = "Index " + (p.index + 1) + ": User: " + p.user + " | Assistant: " + p.assistant;
    el.appendChild(div);
  }
  if (!data.pairs.length) status("Dataset is empty.");
}
function switchOp() {
  const op = document.getElementById("op").value;
  document.getElementById("panel-remove").hidden = op !== "remove";
  document.getElementById("panel-add").hidden = op !== "add";
  status("");
  refresh();
}
async function refresh() {
  try { await viewPairs(); } catch (e) { status(e.message, true); }
}
async function removePairs() {
  try {
    const data = await call("/pairs/remove", { tokens: document.getElementById("tokens").value });
    status("Removed " + data.removed + " pair(s); " + data.remaining + " remain.");
    await viewPairs();
  } catch (e) { status(e.message, true); }
}
async function addPairs() {
  try {
    const data = await call("/pairs/add", { user: lines("user"), assistant: lines("assistant") });
    status("Added " + data.added + " pair(s).");
    await viewPairs();
  } catch (e) { status(e.message, true); }
}
refresh();
</script>
</body>
</html>
"#;
