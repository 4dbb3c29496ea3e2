use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::error::Error;
use crate::types::{SynthesizeRequest, SynthesizeResponse, TranscribeRequest, TranscribeResponse};

pub const DEFAULT_API_BASE: &str = "https://api.indigenius.ai";
pub const ORGANIZATION_HEADER: &str = "X-Organization-Id";

const TRANSCRIBE_PATH: &str = "v1/speech/transcribe";
const SYNTHESIZE_PATH: &str = "v1/speech/synthesize";

/// Client for a single set of credentials.
///
/// Cheap to build: the connection pool lives in the shared `reqwest::Client`,
/// so callers may construct one per request.
#[derive(Clone)]
pub struct IndigeniusClient {
    http: reqwest::Client,
    api_base: Url,
    api_key: String,
    org_id: String,
    timeout: Option<Duration>,
}

impl IndigeniusClient {
    pub fn new(
        http: reqwest::Client,
        api_base: &str,
        api_key: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Result<Self, Error> {
        // `Url::join` drops the last path segment unless the base ends in a slash.
        let api_base = Url::parse(&format!("{}/", api_base.trim_end_matches('/')))?;

        Ok(Self {
            http,
            api_base,
            api_key: api_key.into(),
            org_id: org_id.into(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn transcribe(&self, req: &TranscribeRequest) -> Result<TranscribeResponse, Error> {
        self.post(TRANSCRIBE_PATH, req).await
    }

    pub async fn synthesize(&self, req: &SynthesizeRequest) -> Result<SynthesizeResponse, Error> {
        self.post(SYNTHESIZE_PATH, req).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut builder = self
            .http
            .post(self.api_base.join(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ORGANIZATION_HEADER, &self.org_id)
            .json(body);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::from_status(status, body));
        }

        Ok(resp.json::<R>().await?)
    }
}
