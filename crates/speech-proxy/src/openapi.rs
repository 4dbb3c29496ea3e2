use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::speech_to_text::handler,
        crate::routes::speech_to_text::health,
        crate::routes::text_to_speech::handler,
        crate::routes::text_to_speech::health,
    ),
    components(schemas(
        crate::routes::speech_to_text::TranscribeRequest,
        crate::routes::speech_to_text::TranscribeResponse,
        crate::routes::text_to_speech::SynthesizeRequest,
        crate::routes::text_to_speech::SynthesizeResponse,
        crate::routes::health::HealthResponse,
        crate::routes::health::HealthStatus,
        crate::routes::ErrorBody,
    )),
    tags((name = "speech", description = "Indigenius speech-to-text and text-to-speech proxy"))
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
