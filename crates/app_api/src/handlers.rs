use telemetry_app::{Result, WindowParams};
use telemetry_core::{DailyRollup, DeviceStatisticsRecord, StatisticsOverview};

use crate::{
    AppContext, HealthResponse, LegacyStatisticsEntry, SaveResponse,
    legacy_statistics,
};

pub fn record_statistics(ctx: &AppContext, body: &[u8]) -> Result<SaveResponse> {
    ctx.app_state.services.statistics.ingest_body(body)?;
    Ok(SaveResponse {
        success: true,
        message: "Statistics saved successfully".to_string(),
    })
}

pub fn statistics(ctx: &AppContext) -> Result<Vec<LegacyStatisticsEntry>> {
    let overview = ctx.app_state.services.statistics.overview()?;
    Ok(legacy_statistics(overview))
}

pub fn statistics_overview(ctx: &AppContext) -> Result<StatisticsOverview> {
    ctx.app_state.services.statistics.overview()
}

pub fn device_statistics(ctx: &AppContext, device_id: &str) -> Result<DeviceStatisticsRecord> {
    ctx.app_state.services.statistics.device(device_id)
}

pub fn daily_stats(ctx: &AppContext, params: &WindowParams) -> Result<Vec<DailyRollup>> {
    let days = telemetry_app::resolve_window(params)?;
    ctx.app_state.services.statistics.daily_rollup(days)
}

pub fn health(ctx: &AppContext) -> Result<HealthResponse> {
    let db = ctx.app_state.config.open_db()?;
    Ok(HealthResponse {
        status: "ok",
        schema_version: db.schema_version()?,
    })
}
