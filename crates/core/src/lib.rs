use serde::{Deserialize, Serialize};

/// Device id used when a report carries no usable identity.
pub const DEFAULT_DEVICE_ID: &str = "default-device";

/// Device id tagging the aggregate entry of the legacy statistics listing.
pub const AGGREGATE_DEVICE_ID: &str = "__global__";

/// Canonical statistics report produced from a client payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub device_id: String,
    pub total_recording_time: f64,
    pub daily_recording_time: f64,
    pub app_usage_time: f64,
    pub total_sessions: i64,
    pub daily_sessions: i64,
    pub total_photos: i64,
    pub daily_photos: i64,
    pub total_devices: i64,
    pub device_model: String,
    pub device_name: String,
}

impl Default for StatisticsReport {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID.to_string(),
            total_recording_time: 0.0,
            daily_recording_time: 0.0,
            app_usage_time: 0.0,
            total_sessions: 0,
            daily_sessions: 0,
            total_photos: 0,
            daily_photos: 0,
            total_devices: 1,
            device_model: String::new(),
            device_name: String::new(),
        }
    }
}

/// Latest stored state for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatisticsRecord {
    pub id: i64,
    pub device_id: String,
    pub total_recording_time: f64,
    pub total_sessions: i64,
    pub daily_recording_time: f64,
    pub daily_sessions: i64,
    pub app_usage_time: f64,
    pub total_photos: i64,
    pub daily_photos: i64,
    pub total_devices: i64,
    pub device_model: String,
    pub device_name: String,
    pub last_updated: String,
    pub date: String,
}

/// One device's reported figures for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatEntry {
    pub device_id: String,
    pub date: String,
    pub recording_time: f64,
    pub sessions: i64,
    pub app_usage_time: f64,
    pub photos: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalAggregate {
    pub device_count: u64,
    pub total_recording_time: f64,
    pub total_photos: i64,
    pub last_updated: Option<String>,
}

/// Cross-device totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRollup {
    pub date: String,
    pub total_recording_time: f64,
    pub total_sessions: i64,
    pub total_app_usage: f64,
    pub total_photos: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsOverview {
    pub aggregate: GlobalAggregate,
    pub devices: Vec<DeviceStatisticsRecord>,
}

impl StatisticsOverview {
    pub fn device(&self, device_id: &str) -> Option<&DeviceStatisticsRecord> {
        self.devices
            .iter()
            .find(|record| record.device_id == device_id)
    }
}
