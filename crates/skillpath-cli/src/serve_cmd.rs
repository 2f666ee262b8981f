use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use skillpath_core::plan::checked_day_number;
use skillpath_core::{CurationError, Curator, DetailedDayPlan, Plan};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<CurationError> for AppError {
    fn from(err: CurationError) -> Self {
        if err.is_request_error() {
            Self::bad_request(err.to_string())
        } else {
            tracing::warn!(error = %err, "request failed");
            Self::internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailedDayRequest {
    pub topic: String,
    pub day_topic: String,
    /// Signed so out-of-range values reach validation instead of failing
    /// deserialization.
    pub day_number: i64,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(curator: Arc<Curator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate_plan", post(generate_plan))
        .route("/get_detailed_day", post(get_detailed_day))
        .layer(CorsLayer::permissive())
        .with_state(curator)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(curator: Curator, bind: &str, port: u16) -> Result<()> {
    let app = build_router(Arc::new(curator));
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("skillpath serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("skillpath serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> &'static str {
    "ok"
}

async fn generate_plan(
    State(curator): State<Arc<Curator>>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<Plan>, AppError> {
    let Json(req) = payload?;
    let plan = curator.build_overview_plan(&req.topic).await?;
    Ok(Json(plan))
}

async fn get_detailed_day(
    State(curator): State<Arc<Curator>>,
    payload: Result<Json<DetailedDayRequest>, JsonRejection>,
) -> Result<Json<DetailedDayPlan>, AppError> {
    let Json(req) = payload?;
    let day_number =
        checked_day_number(req.day_number).map_err(|e| AppError::from(CurationError::from(e)))?;
    let detailed = curator
        .build_detailed_plan(&req.topic, &req.day_topic, day_number)
        .await?;
    Ok(Json(detailed))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
