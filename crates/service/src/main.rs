use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::task;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use anne_core::{AnneError, Annotator, PageData, Progress, Submission};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Clone)]
struct AppState {
    annotator: Annotator,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();
    let annotator = Annotator::default();
    info!("config" = %annotator.config_path().display());
    let state = Arc::new(AppState { annotator });
    let addr: SocketAddr = resolve_bind_addr(&load_service_config()).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening" = %addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/page", get(handle_page))
        .route("/api/progress", get(handle_progress))
        .route("/api/save", post(handle_save))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SaveForm {
    #[serde(default)]
    index: String,
    #[serde(default)]
    annotation: String,
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    success: bool,
    #[serde(flatten)]
    submission: Submission,
}

async fn handle_page(State(state): State<Arc<AppState>>) -> Result<Json<PageData>, AppError> {
    let annotator = state.annotator.clone();
    let page = task::spawn_blocking(move || annotator.load_page())
        .await
        .map_err(AppError::internal)??;
    Ok(Json(page))
}

async fn handle_progress(State(state): State<Arc<AppState>>) -> Result<Json<Progress>, AppError> {
    let annotator = state.annotator.clone();
    let progress = task::spawn_blocking(move || annotator.progress())
        .await
        .map_err(AppError::internal)??;
    Ok(Json(progress))
}

async fn handle_save(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveForm>,
) -> Result<Json<SaveResponse>, AppError> {
    let annotator = state.annotator.clone();
    let submission = task::spawn_blocking(move || annotator.submit(&form.index, &form.annotation))
        .await
        .map_err(AppError::internal)??;
    Ok(Json(SaveResponse {
        success: true,
        submission,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct ServiceConfig {
    #[serde(default)]
    server: ServerConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ServerConfig {
    bind: Option<String>,
}

fn load_service_config() -> ServiceConfig {
    let config_path =
        std::env::var("ANNE_SERVICE_CONFIG").unwrap_or_else(|_| "anne.toml".to_string());
    let path = Path::new(&config_path);
    if !path.exists() {
        return ServiceConfig::default();
    }
    match fs::read_to_string(path) {
        Ok(contents) => parse_service_config(&contents, path),
        Err(err) => {
            warn!("service_config" = %path.display(), "error" = %err, "unreadable, using defaults");
            ServiceConfig::default()
        }
    }
}

fn parse_service_config(contents: &str, path: &Path) -> ServiceConfig {
    toml::from_str::<ServiceConfig>(contents).unwrap_or_else(|err| {
        warn!("service_config" = %path.display(), "error" = %err, "invalid, using defaults");
        ServiceConfig::default()
    })
}

fn resolve_bind_addr(config: &ServiceConfig) -> String {
    std::env::var("BIND_ADDR")
        .ok()
        .or_else(|| config.server.bind.clone())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Annotation(#[from] AnneError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn internal<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::Internal(err.into())
    }
}

fn status_for(err: &AnneError) -> StatusCode {
    match err {
        AnneError::InvalidIndex { .. } => StatusCode::BAD_REQUEST,
        AnneError::StoreNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Annotation(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!("annotation_error" = %err);
                }
                let body = json!({ "error": err.kind(), "message": err.to_string() });
                (status, Json(body)).into_response()
            }
            AppError::Internal(err) => {
                error!("internal_error" = %err);
                let body = json!({ "error": "internal", "message": "internal error" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
