use std::fmt;

use station_api_env::IndigeniusEnv;

pub const API_KEY_VAR: &str = "INDIGENIUS_API_KEY";
pub const ORG_ID_VAR: &str = "INDIGENIUS_ORG_ID";

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("INDIGENIUS_API_KEY is not configured")]
    MissingApiKey,
    #[error("INDIGENIUS_ORG_ID is not configured")]
    MissingOrgId,
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),
}

#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub org_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("org_id", &self.org_id)
            .finish()
    }
}

impl Credentials {
    pub fn validate(
        api_key: Option<&str>,
        org_id: Option<&str>,
    ) -> Result<Self, CredentialsError> {
        let api_key = api_key
            .filter(|s| !s.trim().is_empty())
            .ok_or(CredentialsError::MissingApiKey)?;
        let org_id = org_id
            .filter(|s| !s.trim().is_empty())
            .ok_or(CredentialsError::MissingOrgId)?;

        Ok(Self {
            api_key: api_key.to_string(),
            org_id: org_id.to_string(),
        })
    }
}

/// Where the proxy gets upstream credentials from on each request.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Result<Credentials, CredentialsError>;
}

/// Reads the process environment on every call, so rotated keys are picked up
/// without a restart.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, CredentialsError> {
        let env: IndigeniusEnv = envy::from_env()?;
        Credentials::validate(
            env.indigenius_api_key.as_deref(),
            env.indigenius_org_id.as_deref(),
        )
    }
}

#[derive(Default, Clone)]
pub struct StaticCredentials {
    api_key: Option<String>,
    org_id: Option<String>,
}

impl StaticCredentials {
    pub fn new(api_key: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            org_id: Some(org_id.into()),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, CredentialsError> {
        Credentials::validate(self.api_key.as_deref(), self.org_id.as_deref())
    }
}
