//! Web router using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use smboard_core::{load_report, CoreError, DashboardConfig, Report};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tracing::{error, info};

use crate::render;

/// Read-only settings shared by every request
///
/// Holds paths, never data: each request loads its own dataset copy.
#[derive(Debug, Clone)]
pub struct AppState {
    pub title: String,
    pub data_path: PathBuf,
    pub banner: Option<PathBuf>,
}

impl AppState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            data_path: config.data_path.clone(),
            banner: config.banner.clone(),
        }
    }
}

/// Create the web router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/report", get(report_handler))
        .route("/api/health", get(health_handler))
        .route("/banner", get(banner_handler))
        .layer(cors)
        .with_state(state)
}

/// Failure to produce a report for one request
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    /// The blocking build task panicked or was cancelled
    Task(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) if e.is_data_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Core(e) => e.kind(),
            ApiError::Task(_) => "internal",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Core(e) => e.to_string(),
            ApiError::Task(msg) => format!("Report build task failed: {}", msg),
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            ApiError::Core(e) => e.suggestion(),
            ApiError::Task(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({
                "error": self.message(),
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}

/// Load and build on a blocking task; the core is synchronous
async fn build_report(state: &AppState) -> Result<Report, ApiError> {
    let path = state.data_path.clone();
    let title = state.title.clone();

    let result = tokio::task::spawn_blocking(move || load_report(&path, &title))
        .await
        .map_err(|e| ApiError::Task(e.to_string()))?;

    match result {
        Ok(report) => {
            info!(
                records = report.record_count,
                widgets = report.widgets.len(),
                "Built report"
            );
            Ok(report)
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Report build failed");
            Err(ApiError::Core(e))
        }
    }
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    match build_report(&state).await {
        Ok(report) => Html(render::render_page(&report, state.banner.is_some())).into_response(),
        Err(err) => (
            err.status(),
            Html(render::render_error_page(
                &state.title,
                &err.message(),
                err.suggestion().as_deref(),
            )),
        )
            .into_response(),
    }
}

async fn report_handler(State(state): State<Arc<AppState>>) -> Result<Json<Report>, ApiError> {
    build_report(&state).await.map(Json)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn banner_handler(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let Some(path) = &state.banner else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
