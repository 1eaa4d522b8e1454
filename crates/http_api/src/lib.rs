mod assets;
mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router,
    routing::get,
};

pub use errors::HttpError;
pub use state::{DEFAULT_REQUEST_TIMEOUT, HttpState};

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/statistics",
            get(handlers::statistics).post(handlers::record_statistics),
        )
        .route("/statistics/overview", get(handlers::statistics_overview))
        .route(
            "/statistics/device/:device_id",
            get(handlers::device_statistics),
        )
        .route("/daily-stats", get(handlers::daily_stats))
        .fallback(handlers::api_not_found);

    let static_files = assets::static_files(&state.static_dir);
    let router = Router::new()
        .nest("/api", api)
        .fallback_service(static_files)
        .with_state(state);
    middleware::apply(router)
}
