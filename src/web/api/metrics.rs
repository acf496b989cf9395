use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::metrics::{
    calculate_pace_with_floor, format_duration, summarize_with, GeoSample, RunSummary,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::{require_permission, AppState, AuthenticatedUser};
use crate::web::config::Permission;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummaryRequest {
    pub samples: Vec<GeoSample>,
    #[serde(default)]
    pub duration_seconds: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DurationQuery {
    pub seconds: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DurationResponse {
    pub duration: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaceQuery {
    pub distance_km: f64,
    pub duration_seconds: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaceResponse {
    pub pace: String,
}

#[utoipa::path(
    post,
    path = "/api/metrics/summary",
    request_body = SummaryRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Distance, duration and pace", body = RunSummary),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "metrics"
)]
pub async fn summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SummaryRequest>,
) -> ApiResult<Json<RunSummary>> {
    require_permission(&user, Permission::ReadMetrics)?;

    let options = state.config.metrics.options();
    let summary = summarize_with(&options, &request.samples, request.duration_seconds)?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/metrics/duration",
    params(
        ("seconds" = i64, Query, description = "Elapsed seconds")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Formatted duration", body = DurationResponse),
        (status = 400, description = "Negative duration", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "metrics"
)]
pub async fn duration(
    _state: State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DurationQuery>,
) -> ApiResult<Json<DurationResponse>> {
    require_permission(&user, Permission::ReadMetrics)?;
    let duration = format_duration(query.seconds)?;
    Ok(Json(DurationResponse { duration }))
}

#[utoipa::path(
    get,
    path = "/api/metrics/pace",
    params(
        ("distance_km" = f64, Query, description = "Distance covered in kilometres"),
        ("duration_seconds" = u64, Query, description = "Elapsed seconds")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Pace per kilometre", body = PaceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "metrics"
)]
pub async fn pace(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PaceQuery>,
) -> ApiResult<Json<PaceResponse>> {
    require_permission(&user, Permission::ReadMetrics)?;
    let floor = state.config.metrics.min_pace_distance_km;
    let pace = calculate_pace_with_floor(query.distance_km, query.duration_seconds, floor);
    Ok(Json(PaceResponse { pace }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::error::ApiError;
    use crate::web::auth::tests::{test_state, user};

    #[tokio::test]
    async fn summary_of_posted_samples() {
        let request = SummaryRequest {
            samples: vec![GeoSample::new(0.0, 0.0, 0), GeoSample::new(0.0, 0.045, 1_500_000)],
            duration_seconds: 1500,
        };
        let Json(summary) = summary(
            State(test_state()),
            user(&[Permission::ReadMetrics]),
            Json(request),
        )
        .await
        .unwrap();
        assert_eq!(summary.duration, "25:00");
        assert_eq!(summary.pace, "4:59");
    }

    #[tokio::test]
    async fn duration_formats_and_rejects_negative() {
        let Json(ok) = duration(
            State(test_state()),
            user(&[Permission::ReadMetrics]),
            Query(DurationQuery { seconds: 3661 }),
        )
        .await
        .unwrap();
        assert_eq!(ok.duration, "1:01:01");

        let err = duration(
            State(test_state()),
            user(&[Permission::ReadMetrics]),
            Query(DurationQuery { seconds: -1 }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn pace_placeholder_for_zero_distance() {
        let Json(response) = pace(
            State(test_state()),
            user(&[Permission::ReadMetrics]),
            Query(PaceQuery {
                distance_km: 0.0,
                duration_seconds: 300,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.pace, "--:--");
    }

    #[tokio::test]
    async fn metrics_need_read_permission() {
        let err = pace(
            State(test_state()),
            user(&[]),
            Query(PaceQuery {
                distance_km: 5.0,
                duration_seconds: 1500,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Permission(_)));
    }
}
