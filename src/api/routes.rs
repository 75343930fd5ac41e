//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get},
    Router,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::export;
use crate::llm::OpenAiClient;
use crate::processor::{ProcessError, TaskProcessor, MAX_BATCH_SIZE};
use crate::samples;
use crate::session::{SessionStore, SharedSessionStore};

use super::types::*;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Present only when a provider credential is configured.
    pub processor: Option<TaskProcessor>,
    /// In-memory task list and results for the session.
    pub session: SharedSessionStore,
}

impl AppState {
    /// Build state from configuration, wiring up the real client when
    /// a credential is available.
    pub fn new(config: Config) -> Self {
        let processor = config.api_key.clone().map(|key| {
            TaskProcessor::new(Arc::new(OpenAiClient::new(key)), config.model.clone())
        });
        Self::with_processor(config, processor)
    }

    /// Build state with an explicit (possibly absent) processor.
    pub fn with_processor(config: Config, processor: Option<TaskProcessor>) -> Self {
        Self {
            config,
            processor,
            session: Arc::new(SessionStore::new()),
        }
    }
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.clone()));
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/process-tasks", get(readiness).post(process_tasks))
        .route(
            "/api/tasks",
            get(list_tasks).post(add_task).delete(clear_tasks),
        )
        .route("/api/tasks/samples", axum::routing::post(load_samples))
        .route("/api/results", delete(clear_results))
        .route("/api/export/csv", get(export_csv))
        .route("/api/export/json", get(export_json))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Static readiness payload for `GET /api/process-tasks`.
async fn readiness(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    Json(ReadinessResponse {
        message: "Task processing API endpoint. Use POST to submit tasks for processing."
            .to_string(),
        status: "ready".to_string(),
        has_api_key: state.processor.is_some(),
    })
}

/// Process a batch of raw tasks through the language model.
async fn process_tasks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProcessTasksRequest>, JsonRejection>,
) -> Result<Json<ProcessTasksResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected malformed process-tasks payload: {}", rejection);
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Invalid tasks data. Please provide an array of tasks.",
        )
    })?;

    // Boundary validation runs before the processor so bad batches
    // never reach the provider, configured or not.
    if request.tasks.is_empty() {
        return Err(ApiError::from(&ProcessError::EmptyBatch));
    }
    if request.tasks.len() > MAX_BATCH_SIZE {
        return Err(ApiError::from(&ProcessError::BatchTooLarge(
            request.tasks.len(),
        )));
    }

    let processor = state
        .processor
        .as_ref()
        .ok_or_else(|| ApiError::from(&ProcessError::MissingApiKey))?;

    match processor.process_batch(&request.tasks).await {
        Ok(processed) => {
            // Keep the results around for the export endpoints.
            state.session.set_processed(processed.clone()).await;
            Ok(Json(ProcessTasksResponse::ok(processed)))
        }
        Err(err) => {
            tracing::error!("Task processing failed: {}", err);
            Err(ApiError::from(&err))
        }
    }
}

/// List the session's raw tasks.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Json<TaskListResponse> {
    Json(TaskListResponse {
        tasks: state.session.tasks().await,
    })
}

/// Add a raw task to the session.
async fn add_task(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<crate::processor::RawTask>), ApiError> {
    let task = state.session.add_task(request.description).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Replace the session's task list with the built-in samples.
async fn load_samples(State(state): State<Arc<AppState>>) -> Json<TaskListResponse> {
    state.session.set_tasks(samples::sample_tasks()).await;
    Json(TaskListResponse {
        tasks: state.session.tasks().await,
    })
}

/// Clear the session's raw tasks.
async fn clear_tasks(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.session.clear_tasks().await;
    Json(serde_json::json!({
        "success": true,
        "message": "Tasks cleared"
    }))
}

/// Clear the session's processed results.
async fn clear_results(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.session.clear_results().await;
    Json(serde_json::json!({
        "success": true,
        "message": "Results cleared"
    }))
}

/// Download the processed results as CSV.
async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let tasks = state.session.processed().await;
    if tasks.is_empty() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "No processed tasks to export.",
        ));
    }

    let body = export::csv_document(&tasks);
    Ok(download_response(body, "text/csv; charset=utf-8", "csv"))
}

/// Download the processed results as JSON.
async fn export_json(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let tasks = state.session.processed().await;
    if tasks.is_empty() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "No processed tasks to export.",
        ));
    }

    let document = export::json_document(tasks);
    let body = serde_json::to_string_pretty(&document).map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize export: {}", e),
        )
    })?;
    Ok(download_response(body, "application/json", "json"))
}

/// Wrap an export body as a file download named with the current date.
fn download_response(body: String, content_type: &str, extension: &str) -> Response {
    let filename = export::export_filename(extension, Utc::now().date_naive());
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
