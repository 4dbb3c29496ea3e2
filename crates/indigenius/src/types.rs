use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Webm,
    Mp3,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp3 => "mp3",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscribeRequest {
    /// Base64-encoded audio.
    pub audio: String,
    pub format: AudioFormat,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscribeResponse {
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: String,
    pub language: String,
    pub speed: f64,
    pub format: AudioFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawSynthesizeResponse")]
pub struct SynthesizeResponse {
    /// Base64-encoded audio.
    pub audio: Option<String>,
    pub format: Option<String>,
    pub duration: Option<f64>,
    pub voice: Option<String>,
}

// The upstream may name the audio field `audio`, `audioData` or `audio_data`,
// sometimes more than one at once.
#[derive(Deserialize)]
struct RawSynthesizeResponse {
    #[serde(default)]
    audio: Option<String>,
    #[serde(default, rename = "audioData")]
    audio_data_camel: Option<String>,
    #[serde(default, rename = "audio_data")]
    audio_data_snake: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    voice: Option<String>,
}

impl From<RawSynthesizeResponse> for SynthesizeResponse {
    fn from(raw: RawSynthesizeResponse) -> Self {
        Self {
            audio: raw
                .audio
                .or(raw.audio_data_camel)
                .or(raw.audio_data_snake),
            format: raw.format,
            duration: raw.duration,
            voice: raw.voice,
        }
    }
}
