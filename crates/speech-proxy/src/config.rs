use std::sync::Arc;
use std::time::Duration;

use crate::credentials::{CredentialSource, EnvCredentials};

// Upper bound for base64 audio bodies. axum defaults to 2 MiB.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct SpeechProxyConfig {
    pub api_base: String,
    pub credentials: Arc<dyn CredentialSource>,
    /// Upstream request timeout. `None` leaves it to the hosting platform.
    pub timeout: Option<Duration>,
    pub max_body_bytes: usize,
}

impl Default for SpeechProxyConfig {
    fn default() -> Self {
        Self::new(EnvCredentials)
    }
}

impl SpeechProxyConfig {
    pub fn new(credentials: impl CredentialSource + 'static) -> Self {
        Self {
            api_base: station_indigenius::DEFAULT_API_BASE.to_string(),
            credentials: Arc::new(credentials),
            timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
