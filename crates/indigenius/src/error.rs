use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Invalid Indigenius API credentials")]
    InvalidCredentials,

    #[error("Indigenius API rate limit exceeded")]
    RateLimited,

    #[error("Bad request to Indigenius API: {0}")]
    BadRequest(String),

    #[error("Indigenius API error {status}: {body}")]
    Api { status: u16, body: String },
}

impl Error {
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::InvalidCredentials,
            429 => Self::RateLimited,
            400 => Self::BadRequest(error_message(&body)),
            _ => Self::Api { status, body },
        }
    }

    /// Upstream HTTP status, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidBaseUrl(_) => None,
            Self::InvalidCredentials => Some(401),
            Self::RateLimited => Some(429),
            Self::BadRequest(_) => Some(400),
            Self::Api { status, .. } => Some(*status),
        }
    }
}

// The upstream reports 400s as `{"message": ..}` or `{"error": ..}`; fall
// back to the raw body for anything else.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}
