use axum::{extract::State, Json};

use crate::metrics::{GeoSample, RunSummary};
use crate::session::{RunMode, RunStatus};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::{require_permission, AppState, AuthenticatedUser};
use crate::web::config::Permission;

#[utoipa::path(
    post,
    path = "/api/session/start",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Recording started", body = RunMode),
        (status = 409, description = "A run is already being recorded", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "session"
)]
pub async fn start(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<RunMode>> {
    require_permission(&user, Permission::RecordRun)?;

    let mut recorder = state.recorder.lock().await;
    let mode = recorder.start()?;
    log::info!("{} started a run", user.name);
    Ok(Json(mode))
}

#[utoipa::path(
    post,
    path = "/api/session/samples",
    request_body = GeoSample,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Sample recorded", body = RunSummary),
        (status = 400, description = "Invalid or out-of-order sample", body = ErrorResponse),
        (status = 409, description = "No run is being recorded", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "session"
)]
pub async fn record_sample(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(sample): Json<GeoSample>,
) -> ApiResult<Json<RunSummary>> {
    require_permission(&user, Permission::RecordRun)?;

    let recorder = state.recorder.lock().await;
    Ok(Json(recorder.record(sample)?))
}

#[utoipa::path(
    post,
    path = "/api/session/stop",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Recording stopped", body = RunSummary),
        (status = 409, description = "No run is being recorded", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "session"
)]
pub async fn stop(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<RunSummary>> {
    require_permission(&user, Permission::RecordRun)?;

    let mut recorder = state.recorder.lock().await;
    Ok(Json(recorder.stop().await?))
}

#[utoipa::path(
    get,
    path = "/api/session/status",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Current session", body = RunStatus),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "session"
)]
pub async fn status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<Json<RunStatus>> {
    let recorder = state.recorder.lock().await;
    Ok(Json(recorder.status()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::error::ApiError;
    use crate::web::auth::tests::{test_state, user};

    fn runner() -> AuthenticatedUser {
        user(&[Permission::ReadMetrics, Permission::RecordRun])
    }

    #[tokio::test]
    async fn full_recording_cycle() {
        let state = test_state();

        let Json(mode) = start(State(state.clone()), runner()).await.unwrap();
        assert!(matches!(mode, RunMode::Recording { .. }));

        record_sample(
            State(state.clone()),
            runner(),
            Json(GeoSample::new(0.0, 0.0, 0)),
        )
        .await
        .unwrap();
        let Json(live) = record_sample(
            State(state.clone()),
            runner(),
            Json(GeoSample::new(0.0, 1.0, 60_000)),
        )
        .await
        .unwrap();
        assert!((live.distance_km - 111.19).abs() < 0.01);

        let Json(status_now) = status(State(state.clone()), runner()).await.unwrap();
        assert_eq!(status_now.samples.len(), 2);

        let Json(summary) = stop(State(state.clone()), runner()).await.unwrap();
        assert_eq!(summary.distance_km, live.distance_km);

        let Json(after) = status(State(state), runner()).await.unwrap();
        assert_eq!(after.mode, RunMode::Idle);
    }

    #[tokio::test]
    async fn conflicts_and_validation() {
        let state = test_state();

        let err = stop(State(state.clone()), runner()).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict("no_active_run")));

        start(State(state.clone()), runner()).await.unwrap();
        let err = start(State(state.clone()), runner()).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict("run_in_progress")));

        record_sample(
            State(state.clone()),
            runner(),
            Json(GeoSample::new(0.0, 0.0, 5_000)),
        )
        .await
        .unwrap();
        let err = record_sample(
            State(state.clone()),
            runner(),
            Json(GeoSample::new(0.0, 0.0, 1_000)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        stop(State(state), runner()).await.unwrap();
    }

    #[tokio::test]
    async fn recording_needs_permission() {
        let err = start(State(test_state()), user(&[Permission::ReadMetrics]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Permission(_)));
    }
}
