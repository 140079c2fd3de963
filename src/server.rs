//! JSON HTTP server for cut-up generation.
//!
//! Exposes the generator to the static frontend (or any HTTP client) as a
//! small JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/generate` | Generate cut-up phrases |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "count must be non-negative, got -3" } }
//! ```
//!
//! Error codes: `bad_request` (400), `corpus_unavailable` (500),
//! `insufficient_corpus` (500). Errors never carry partial results.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a statically hosted
//! frontend can call the API from any host.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::corpus;
use crate::error::CutupError;
use crate::generator::generate_cutups;
use crate::models::CutupPhrase;

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Starts the HTTP server.
///
/// Binds to the address configured in `[server].bind` and registers all
/// route handlers. The server runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/generate", post(handle_generate))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("Cutup server listening on http://{}", bind_addr);

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

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
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

impl From<CutupError> for AppError {
    fn from(err: CutupError) -> Self {
        let (status, code) = match &err {
            CutupError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            CutupError::CorpusUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "corpus_unavailable")
            }
            CutupError::InsufficientCorpus { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "insufficient_corpus")
            }
        };
        AppError {
            status,
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/generate ============

/// JSON request body for `POST /api/generate`.
#[derive(Debug, Default, Deserialize)]
struct GenerateRequest {
    /// Number of phrases to generate. Missing → configured default.
    count: Option<i64>,
}

/// JSON response body for `POST /api/generate`.
#[derive(Serialize)]
struct GenerateResponse {
    phrases: Vec<CutupPhrase>,
    /// Echo of how many phrases were actually returned.
    count: usize,
}

/// Handler for `POST /api/generate`.
///
/// Count policy lives at this boundary: missing → config default, above the
/// configured maximum → clamped, negative → 400. The corpus is reloaded per
/// request, so a rebuilt phrase bank is picked up without a restart.
async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let count = state.config.generate.resolve_count(request.count)?;
    let corpus = corpus::open_corpus(&state.config).await?;

    let mut rng = rand::rng();
    let phrases = generate_cutups(&corpus, count, &mut rng)?;

    let count = phrases.len();
    Ok(Json(GenerateResponse { phrases, count }))
}
