//! API route handlers.
//!
//! All API endpoints return JSON. State is shared via `Arc<ServerState>`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::engine::RiskService;
use crate::types::{Coordinate, FetchError, Locale, RiskVerdict};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct ServerState {
    pub service: RiskService,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(service: RiskService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}

pub type AppState = Arc<ServerState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: i64,
}

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

/// Extract `{latitude, longitude}` from a JSON body.
///
/// Numbers and numeric strings are accepted; anything else, including a
/// body that is not JSON at all, yields `None`.
pub fn parse_coordinates(body: &[u8]) -> Option<Coordinate> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let latitude = numeric(value.get("latitude")?)?;
    let longitude = numeric(value.get("longitude")?)?;
    Some(Coordinate::new(latitude, longitude))
}

fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}

/// HTTP status for a failed upstream fetch.
pub fn fetch_error_status(err: &FetchError) -> StatusCode {
    match err {
        FetchError::Network { .. } => StatusCode::SERVICE_UNAVAILABLE,
        FetchError::InvalidData { .. } => StatusCode::BAD_GATEWAY,
        FetchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/cyclone-risk
pub async fn cyclone_risk(State(state): State<AppState>, body: Bytes) -> Response {
    let locale = state.service.locale();

    let Some(coordinate) = parse_coordinates(&body) else {
        warn!(body = %String::from_utf8_lossy(&body), "Invalid request received");
        let message = match locale {
            Locale::En => "Invalid input. Numeric \"latitude\" and \"longitude\" are required.",
            Locale::Fr => {
                "Données d'entrée invalides. \"latitude\" et \"longitude\" numériques sont requis."
            }
        };
        return error_json(StatusCode::BAD_REQUEST, message);
    };

    let span = info_span!("cyclone_risk", request_id = %Uuid::new_v4());
    async move {
        info!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "New risk analysis request"
        );

        match state.service.assess(coordinate).await {
            Ok(verdict) => (StatusCode::OK, Json(verdict)).into_response(),
            Err(e) => {
                let status = fetch_error_status(&e);
                let verdict = RiskVerdict::from_fetch_error(&e, locale);
                (status, Json(verdict)).into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// Any method other than POST on /api/cyclone-risk.
pub async fn method_not_allowed(State(state): State<AppState>) -> Response {
    let message = match state.service.locale() {
        Locale::En => "Method not allowed",
        Locale::Fr => "Méthode non autorisée",
    };
    error_json(StatusCode::METHOD_NOT_ALLOWED, message)
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds();
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: uptime,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
