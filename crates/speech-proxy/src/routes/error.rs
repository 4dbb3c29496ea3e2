use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::{ResponseTimer, Route, timestamp};
use crate::credentials::CredentialsError;

/// Body of every failed response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
    /// Milliseconds spent handling the request.
    pub response_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingField {
    AudioData,
    Text,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProxyError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("missing required field: {0:?}")]
    MissingField(MissingField),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Upstream(#[from] station_indigenius::Error),
}

impl ProxyError {
    pub(crate) fn into_envelope(self, route: Route, timer: &ResponseTimer) -> Response {
        let (status, error, code, message) = match self {
            Self::InvalidJson(e) => {
                tracing::warn!(route = %route, error = %e, "invalid_json_body");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid JSON in request body".to_string(),
                    "INVALID_JSON",
                    Some(e.to_string()),
                )
            }
            Self::MissingField(field) => {
                tracing::warn!(route = %route, field = ?field, "missing_required_field");
                let (error, code) = match field {
                    MissingField::AudioData => ("audioData is required", "MISSING_AUDIO_DATA"),
                    MissingField::Text => {
                        ("text is required and cannot be empty", "MISSING_TEXT")
                    }
                };
                (StatusCode::BAD_REQUEST, error.to_string(), code, None)
            }
            Self::Credentials(e) => {
                let msg = e.to_string();
                tracing::error!(route = %route, error = %msg, "credentials_not_configured");
                capture(route, None, &msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    route.failure_summary().to_string(),
                    route.error_code(),
                    Some(msg),
                )
            }
            Self::Upstream(e) => {
                let upstream_status = e.status();
                tracing::error!(
                    route = %route,
                    error = %e,
                    upstream_status = ?upstream_status,
                    "upstream_request_failed"
                );
                let msg = e.to_string();
                let tag = upstream_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "transport".to_string());
                capture(route, Some(tag), &msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    route.failure_summary().to_string(),
                    route.error_code(),
                    Some(msg),
                )
            }
        };

        let body = Json(ErrorBody {
            error,
            code: code.to_string(),
            message,
            timestamp: timestamp(),
            response_time: timer.elapsed_ms(),
        });

        (status, body).into_response()
    }
}

// Tags apply to this event only; worker-thread hubs are shared across requests.
fn capture(route: Route, upstream_status: Option<String>, msg: &str) {
    sentry::with_scope(
        |scope| {
            scope.set_tag("speech.route", route);
            if let Some(status) = upstream_status {
                scope.set_tag("upstream.status", status);
            }
        },
        || sentry::capture_message(msg, sentry::Level::Error),
    );
}
