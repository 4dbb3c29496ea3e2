use serde::Serialize;

use super::{AppState, ResponseTimer, Route, timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    ConfigurationRequired,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub has_credentials: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
    pub response_time: u64,
}

pub(crate) fn report(state: &AppState, route: Route) -> HealthResponse {
    let timer = ResponseTimer::start();

    let (status, error) = match state.config.credentials.credentials() {
        Ok(_) => (HealthStatus::Healthy, None),
        Err(e) => {
            tracing::warn!(route = %route, error = %e, "health_check_configuration_required");
            (HealthStatus::ConfigurationRequired, Some(e.to_string()))
        }
    };

    HealthResponse {
        status,
        service: route.to_string(),
        has_credentials: status == HealthStatus::Healthy,
        error,
        timestamp: timestamp(),
        response_time: timer.elapsed_ms(),
    }
}
