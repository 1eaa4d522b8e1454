use axum::{
    body::Bytes,
    extract::{Json, Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, error};

use app_api::AppContext;
use telemetry_app::WindowParams;

use crate::{errors::HttpError, state::HttpState};

/// Runs storage work on the blocking pool, bounded by the request timeout.
///
/// A timed-out task is detached, not cancelled: a write may still commit
/// after the caller got a 500. Writes are latest-wins, so a client retry
/// converges on the same state.
async fn run_blocking<T, F>(state: &HttpState, task: F) -> Result<T, HttpError>
where
    F: FnOnce(&AppContext) -> telemetry_app::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let context = state.context.clone();
    let handle = tokio::task::spawn_blocking(move || task(&context));
    match tokio::time::timeout(state.request_timeout, handle).await {
        Ok(Ok(result)) => result.map_err(HttpError::from),
        Ok(Err(err)) => {
            error!(error = %err, "storage task aborted");
            Err(HttpError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
        Err(_) => {
            error!(timeout = ?state.request_timeout, "storage task timed out");
            Err(HttpError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Request timed out",
            ))
        }
    }
}

pub async fn record_statistics(
    State(state): State<HttpState>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(&state, move |ctx| app_api::record_statistics(ctx, &body)).await?;
    Ok(Json(response))
}

pub async fn statistics(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(&state, app_api::statistics).await?;
    Ok(Json(response))
}

pub async fn statistics_overview(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(&state, app_api::statistics_overview).await?;
    Ok(Json(response))
}

pub async fn device_statistics(
    State(state): State<HttpState>,
    Path(device_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response =
        run_blocking(&state, move |ctx| app_api::device_statistics(ctx, &device_id)).await?;
    Ok(Json(response))
}

pub async fn daily_stats(
    State(state): State<HttpState>,
    query: Result<Query<WindowParams>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Query(params) = query.map_err(|rejection| {
        debug!(error = %rejection, "rejected daily-stats query");
        HttpError::new(StatusCode::BAD_REQUEST, "Invalid query string")
    })?;
    let response = run_blocking(&state, move |ctx| app_api::daily_stats(ctx, &params)).await?;
    Ok(Json(response))
}

pub async fn health(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let response = run_blocking(&state, app_api::health).await?;
    Ok(Json(response))
}

pub async fn api_not_found() -> HttpError {
    HttpError::not_found("Not found")
}
