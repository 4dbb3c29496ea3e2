use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use station_indigenius as upstream;

use super::health::HealthResponse;
use super::speech_to_text::DEFAULT_LANGUAGE;
use super::{
    AppState, ErrorBody, MissingField, ProxyError, ResponseTimer, Route, parse_body, timestamp,
};

pub const MAX_TEXT_CHARS: usize = 1000;
pub(crate) const DEFAULT_VOICE: &str = "en-US-neural-female";
const DEFAULT_SPEED: f64 = 1.0;
const UPSTREAM_FORMAT: upstream::AudioFormat = upstream::AudioFormat::Mp3;

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    #[schema(example = "en-US-neural-female")]
    pub voice: Option<String>,
    #[serde(default)]
    #[schema(example = "en-US")]
    pub language: Option<String>,
    #[serde(default)]
    #[schema(example = 1.0)]
    pub speed: Option<f64>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResponse {
    /// Base64-encoded audio.
    pub audio_data: String,
    pub format: String,
    /// Seconds of synthesized audio.
    pub duration: f64,
    pub voice: String,
    pub response_time: u64,
    pub timestamp: String,
}

impl SynthesizeResponse {
    fn normalize(
        result: upstream::SynthesizeResponse,
        requested_voice: String,
        timer: &ResponseTimer,
    ) -> Self {
        Self {
            audio_data: result.audio.unwrap_or_default(),
            format: result
                .format
                .unwrap_or_else(|| UPSTREAM_FORMAT.as_str().to_string()),
            duration: result.duration.unwrap_or(0.0),
            voice: result.voice.unwrap_or(requested_voice),
            response_time: timer.elapsed_ms(),
            timestamp: timestamp(),
        }
    }
}

/// Cuts `text` to at most `max` characters, never splitting a character.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[utoipa::path(
    post,
    path = "/text-to-speech",
    operation_id = "text_to_speech",
    request_body = SynthesizeRequest,
    responses(
        (status = 200, description = "Synthesized audio", body = SynthesizeResponse),
        (status = 400, description = "Invalid JSON or missing text", body = ErrorBody),
        (status = 500, description = "Configuration or upstream failure", body = ErrorBody),
    ),
    tag = "speech",
)]
pub async fn handler(State(state): State<AppState>, body: Bytes) -> Response {
    let timer = ResponseTimer::start();
    let route = Route::TextToSpeech;

    match synthesize(&state, &body, &timer).await {
        Ok(response) => {
            tracing::info!(
                route = %route,
                response_time_ms = response.response_time,
                audio_b64_len = response.audio_data.len(),
                duration = response.duration,
                "text_to_speech_completed"
            );
            Json(response).into_response()
        }
        Err(e) => e.into_envelope(route, &timer),
    }
}

async fn synthesize(
    state: &AppState,
    body: &[u8],
    timer: &ResponseTimer,
) -> Result<SynthesizeResponse, ProxyError> {
    let credentials = state.config.credentials.credentials()?;

    let request: SynthesizeRequest = parse_body(body)?;

    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProxyError::MissingField(MissingField::Text))?;
    let voice = request.voice.unwrap_or_else(|| DEFAULT_VOICE.to_string());
    let language = request
        .language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let speed = request.speed.unwrap_or(DEFAULT_SPEED);

    let truncated = truncate_chars(&text, MAX_TEXT_CHARS);
    let text_truncated = truncated.len() < text.len();

    tracing::info!(
        route = %Route::TextToSpeech,
        voice = %voice,
        language = %language,
        speed = speed,
        text_chars = truncated.chars().count(),
        text_truncated = text_truncated,
        "text_to_speech_request_received"
    );

    let upstream_request = upstream::SynthesizeRequest {
        text: truncated.to_string(),
        voice: voice.clone(),
        language,
        speed,
        format: UPSTREAM_FORMAT,
        context: request.context,
    };

    let result = state
        .upstream(&credentials)?
        .synthesize(&upstream_request)
        .await?;

    Ok(SynthesizeResponse::normalize(result, voice, timer))
}

#[utoipa::path(
    get,
    path = "/text-to-speech",
    operation_id = "text_to_speech_health",
    responses(
        (status = 200, description = "Configuration status", body = HealthResponse),
    ),
    tag = "speech",
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(super::health::report(&state, Route::TextToSpeech))
}
