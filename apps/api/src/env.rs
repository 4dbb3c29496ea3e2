use serde::Deserialize;
use station_api_env::{IndigeniusEnv, SentryEnv};

const DEFAULT_PORT: u16 = 3000;

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Deserialize)]
pub struct ServerEnv {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub rate_limit_per_minute: Option<u32>,
    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,
}

pub struct Env {
    pub server: ServerEnv,
    pub sentry: SentryEnv,
    pub indigenius: IndigeniusEnv,
}

impl Env {
    // Loaded as separate structs: `envy` cannot parse numbers through `#[serde(flatten)]`.
    pub fn from_env() -> Result<Self, envy::Error> {
        Ok(Self {
            server: envy::from_env()?,
            sentry: envy::from_env()?,
            indigenius: envy::from_env()?,
        })
    }

    pub fn log_indigenius_status(&self) {
        let has_api_key = self.indigenius.indigenius_api_key.is_some();
        let has_org_id = self.indigenius.indigenius_org_id.is_some();
        if has_api_key && has_org_id {
            tracing::info!("indigenius_credentials_configured");
        } else {
            tracing::warn!(
                has_api_key = has_api_key,
                has_org_id = has_org_id,
                "indigenius_credentials_missing"
            );
        }
    }
}
