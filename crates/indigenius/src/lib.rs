mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_BASE, IndigeniusClient, ORGANIZATION_HEADER};
pub use error::Error;
pub use types::{
    AudioFormat, SynthesizeRequest, SynthesizeResponse, TranscribeRequest, TranscribeResponse,
};
