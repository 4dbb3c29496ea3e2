mod config;
mod credentials;
mod openapi;
mod routes;

pub use config::SpeechProxyConfig;
pub use credentials::{
    API_KEY_VAR, CredentialSource, Credentials, CredentialsError, EnvCredentials, ORG_ID_VAR,
    StaticCredentials,
};
pub use openapi::openapi;
pub use routes::ErrorBody;
pub use routes::health::{HealthResponse, HealthStatus};
pub use routes::speech_to_text::{TranscribeRequest, TranscribeResponse};
pub use routes::text_to_speech::{MAX_TEXT_CHARS, SynthesizeRequest, SynthesizeResponse};
pub use routes::router;
