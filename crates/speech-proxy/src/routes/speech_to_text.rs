use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use station_indigenius as upstream;

use super::health::HealthResponse;
use super::{
    AppState, ErrorBody, MissingField, ProxyError, ResponseTimer, Route, parse_body, timestamp,
};

pub(crate) const DEFAULT_LANGUAGE: &str = "en-US";

// FIXME: always reported as webm regardless of what the client recorded.
// Existing clients depend on this until the request carries its own format.
const UPSTREAM_FORMAT: upstream::AudioFormat = upstream::AudioFormat::Webm;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeRequest {
    /// Base64-encoded audio.
    #[serde(default)]
    pub audio_data: Option<String>,
    #[serde(default)]
    #[schema(example = "en-US")]
    pub language: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub transcript: String,
    pub confidence: f64,
    pub language: String,
    /// Seconds of audio transcribed.
    pub duration: f64,
    pub response_time: u64,
    pub timestamp: String,
}

impl TranscribeResponse {
    fn normalize(
        result: upstream::TranscribeResponse,
        requested_language: String,
        timer: &ResponseTimer,
    ) -> Self {
        Self {
            transcript: result.transcript.unwrap_or_default(),
            confidence: result.confidence.unwrap_or(0.0),
            language: result.language.unwrap_or(requested_language),
            duration: result.duration.unwrap_or(0.0),
            response_time: timer.elapsed_ms(),
            timestamp: timestamp(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/speech-to-text",
    operation_id = "speech_to_text",
    request_body = TranscribeRequest,
    responses(
        (status = 200, description = "Transcription result", body = TranscribeResponse),
        (status = 400, description = "Invalid JSON or missing audioData", body = ErrorBody),
        (status = 500, description = "Configuration or upstream failure", body = ErrorBody),
    ),
    tag = "speech",
)]
pub async fn handler(State(state): State<AppState>, body: Bytes) -> Response {
    let timer = ResponseTimer::start();
    let route = Route::SpeechToText;

    match transcribe(&state, &body, &timer).await {
        Ok(response) => {
            tracing::info!(
                route = %route,
                response_time_ms = response.response_time,
                transcript_chars = response.transcript.chars().count(),
                confidence = response.confidence,
                "speech_to_text_completed"
            );
            Json(response).into_response()
        }
        Err(e) => e.into_envelope(route, &timer),
    }
}

async fn transcribe(
    state: &AppState,
    body: &[u8],
    timer: &ResponseTimer,
) -> Result<TranscribeResponse, ProxyError> {
    let credentials = state.config.credentials.credentials()?;

    let request: TranscribeRequest = parse_body(body)?;

    let audio = request
        .audio_data
        .filter(|a| !a.is_empty())
        .ok_or(ProxyError::MissingField(MissingField::AudioData))?;
    let language = request
        .language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    tracing::info!(
        route = %Route::SpeechToText,
        language = %language,
        audio_b64_len = audio.len(),
        has_context = request.context.is_some(),
        "speech_to_text_request_received"
    );

    let upstream_request = upstream::TranscribeRequest {
        audio,
        format: UPSTREAM_FORMAT,
        language: language.clone(),
        context: request.context,
    };

    let result = state
        .upstream(&credentials)?
        .transcribe(&upstream_request)
        .await?;

    Ok(TranscribeResponse::normalize(result, language, timer))
}

#[utoipa::path(
    get,
    path = "/speech-to-text",
    operation_id = "speech_to_text_health",
    responses(
        (status = 200, description = "Configuration status", body = HealthResponse),
    ),
    tag = "speech",
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(super::health::report(&state, Route::SpeechToText))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_substitutes_defaults() {
        let resp = TranscribeResponse::normalize(
            upstream::TranscribeResponse::default(),
            "fr-FR".into(),
            &ResponseTimer::start(),
        );

        assert_eq!(resp.transcript, "");
        assert_eq!(resp.confidence, 0.0);
        assert_eq!(resp.language, "fr-FR");
        assert_eq!(resp.duration, 0.0);
    }

    #[test]
    fn test_normalize_prefers_upstream_language() {
        let resp = TranscribeResponse::normalize(
            upstream::TranscribeResponse {
                transcript: Some("diesel".into()),
                confidence: Some(0.5),
                language: Some("es-MX".into()),
                duration: Some(0.8),
            },
            "en-US".into(),
            &ResponseTimer::start(),
        );

        assert_eq!(resp.transcript, "diesel");
        assert_eq!(resp.language, "es-MX");
        assert_eq!(resp.duration, 0.8);
    }

    #[test]
    fn test_request_accepts_null_optionals() {
        let req: TranscribeRequest = serde_json::from_str(
            r#"{"audioData":"AAAA","language":null,"context":null}"#,
        )
        .unwrap();
        assert_eq!(req.audio_data.as_deref(), Some("AAAA"));
        assert!(req.language.is_none());
        assert!(req.context.is_none());
    }
}
