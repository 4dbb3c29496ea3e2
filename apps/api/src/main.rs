mod env;
mod rate_limit;

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use axum::{Json, Router, http::Method, http::header::CONTENT_TYPE, middleware, routing::get};
use station_speech_proxy::SpeechProxyConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use crate::env::Env;
use crate::rate_limit::RateLimitState;

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(OpenApi)]
#[openapi(info(title = "Station API", description = "Fuel station back-end services"))]
struct ApiDoc;

fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi().nest("/api", station_speech_proxy::openapi())
}

fn app(env: &Env) -> Router {
    let mut config = SpeechProxyConfig::default();
    if let Some(api_base) = &env.indigenius.indigenius_api_base {
        config = config.with_api_base(api_base);
    }
    if let Some(secs) = env.server.upstream_timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let mut api = station_speech_proxy::router(config);
    if let Some(limit) = env.server.rate_limit_per_minute.and_then(NonZeroU32::new) {
        let limiter = RateLimitState::per_minute(limit);
        limiter.spawn_pruner(RATE_LIMIT_PRUNE_INTERVAL);
        api = api.layer(middleware::from_fn_with_state(limiter, rate_limit::rate_limit));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/openapi.json", get(|| async { Json(openapi()) }))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry::integrations::tracing::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed_to_listen_for_shutdown_signal");
    }
    tracing::info!("shutdown_signal_received");
}

async fn serve(env: Env) -> anyhow::Result<()> {
    env.log_indigenius_status();

    let addr = SocketAddr::from(([0, 0, 0, 0], env.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "api_server_listening");

    axum::serve(
        listener,
        app(&env).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let env = Env::from_env()?;

    // The Sentry client must exist before the runtime starts so worker threads inherit it.
    let _sentry = env.sentry.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                send_default_pii: false,
                ..Default::default()
            },
        ))
    });

    init_tracing();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use station_api_env::{IndigeniusEnv, SentryEnv};
    use tower::ServiceExt;

    fn test_env() -> Env {
        Env {
            server: env::ServerEnv {
                port: 0,
                rate_limit_per_minute: Some(60),
                upstream_timeout_secs: Some(5),
            },
            sentry: SentryEnv::default(),
            indigenius: IndigeniusEnv::default(),
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = get(app(&test_env()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_openapi_paths_are_nested() {
        let (status, body) = get(app(&test_env()), "/openapi.json").await;
        assert_eq!(status, StatusCode::OK);

        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/api/speech-to-text"].is_object());
        assert!(doc["paths"]["/api/text-to-speech"].is_object());
    }

    #[tokio::test]
    async fn test_speech_routes_are_mounted_under_api() {
        let (status, body) = get(app(&test_env()), "/api/text-to-speech").await;
        assert_eq!(status, StatusCode::OK);

        let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(report["service"], "text-to-speech");
    }
}
