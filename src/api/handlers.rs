use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::pipeline::{AlertFilter, ParsePolicy, PipelineError};
use crate::report::{process_document, Report};

// ============================================================================
// Health Check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================================
// Process
// ============================================================================

#[derive(Deserialize)]
pub struct ProcessRequest {
    /// The alert envelope: `{ "alerts": [ ... ] }`.
    pub document: serde_json::Value,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// Abort on unparseable record timestamps instead of skipping them.
    #[serde(default)]
    pub strict: bool,
}

pub async fn process(Json(request): Json<ProcessRequest>) -> Result<Json<Report>, ApiError> {
    let filter = AlertFilter::from_args(
        request.severity.as_deref(),
        request.service.as_deref(),
        request.start.as_deref(),
        request.end.as_deref(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let policy = if request.strict {
        ParsePolicy::Abort
    } else {
        ParsePolicy::Skip
    };

    let report = process_document(request.document, &filter, policy).map_err(|e| match e {
        PipelineError::Format => ApiError::BadRequest(e.to_string()),
        PipelineError::Bound { .. } => ApiError::BadRequest(e.to_string()),
        PipelineError::Timestamp(_) => ApiError::Unprocessable(e.to_string()),
    })?;

    Ok(Json(report))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
