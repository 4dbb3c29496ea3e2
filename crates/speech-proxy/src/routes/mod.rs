mod error;
pub(crate) mod health;
pub(crate) mod speech_to_text;
pub(crate) mod text_to_speech;

pub use error::ErrorBody;
pub(crate) use error::{MissingField, ProxyError};

use std::time::Instant;

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use reqwest::Client;
use serde::de::DeserializeOwned;
use station_indigenius::IndigeniusClient;

use crate::config::SpeechProxyConfig;
use crate::credentials::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Route {
    SpeechToText,
    TextToSpeech,
}

impl Route {
    pub(crate) fn error_code(&self) -> &'static str {
        match self {
            Self::SpeechToText => "SPEECH_TO_TEXT_ERROR",
            Self::TextToSpeech => "TEXT_TO_SPEECH_ERROR",
        }
    }

    pub(crate) fn failure_summary(&self) -> &'static str {
        match self {
            Self::SpeechToText => "Speech-to-text request failed",
            Self::TextToSpeech => "Text-to-speech request failed",
        }
    }
}

pub(crate) struct ResponseTimer(Instant);

impl ResponseTimer {
    pub(crate) fn start() -> Self {
        Self(Instant::now())
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.0.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Decodes a request body. Valid JSON that is not an object carries none of
/// the request fields, so it decodes to the empty request.
pub(crate) fn parse_body<T>(body: &[u8]) -> Result<T, ProxyError>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice::<serde_json::Value>(body)? {
        value @ serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(T::default()),
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: SpeechProxyConfig,
    pub(crate) client: Client,
}

impl AppState {
    pub(crate) fn upstream(&self, credentials: &Credentials) -> Result<IndigeniusClient, ProxyError> {
        let client = IndigeniusClient::new(
            self.client.clone(),
            &self.config.api_base,
            &credentials.api_key,
            &credentials.org_id,
        )?;
        Ok(client.with_timeout(self.config.timeout))
    }
}

pub fn router(config: SpeechProxyConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = AppState {
        config,
        client: Client::new(),
    };

    Router::new()
        .route(
            "/speech-to-text",
            post(speech_to_text::handler).get(speech_to_text::health),
        )
        .route(
            "/text-to-speech",
            post(text_to_speech::handler).get(text_to_speech::health),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names() {
        assert_eq!(Route::SpeechToText.to_string(), "speech-to-text");
        assert_eq!(Route::TextToSpeech.to_string(), "text-to-speech");
        assert_eq!(Route::SpeechToText.error_code(), "SPEECH_TO_TEXT_ERROR");
        assert_eq!(Route::TextToSpeech.error_code(), "TEXT_TO_SPEECH_ERROR");
    }

    #[derive(Debug, Default, serde::Deserialize)]
    struct PumpRequest {
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_parse_body_ignores_non_objects() {
        for body in [r#"["pump"]"#, "\"pump\"", "42", "null"] {
            let parsed: PumpRequest = parse_body(body.as_bytes()).unwrap();
            assert!(parsed.name.is_none(), "{body} should decode as empty");
        }

        let parsed: PumpRequest = parse_body(br#"{"name":"pump"}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("pump"));

        assert!(matches!(
            parse_body::<PumpRequest>(b"{"),
            Err(ProxyError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let ts = timestamp();
        let parsed = chrono::DateTime::parse_from_rfc3339(&ts).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(ts.ends_with('Z'));
    }
}
