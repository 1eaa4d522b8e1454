use serde::Serialize;
use telemetry_core::{
    AGGREGATE_DEVICE_ID, DeviceStatisticsRecord, GlobalAggregate, StatisticsOverview,
};

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub schema_version: u32,
}

/// Aggregate entry that heads the legacy statistics listing.
#[derive(Debug, Serialize)]
pub struct LegacyAggregateEntry {
    pub device_id: &'static str,
    pub device_count: u64,
    /// Older dashboards read the device count from this field.
    pub total_devices: u64,
    pub total_recording_time: f64,
    pub total_photos: i64,
    pub last_updated: Option<String>,
}

impl From<GlobalAggregate> for LegacyAggregateEntry {
    fn from(aggregate: GlobalAggregate) -> Self {
        Self {
            device_id: AGGREGATE_DEVICE_ID,
            device_count: aggregate.device_count,
            total_devices: aggregate.device_count,
            total_recording_time: aggregate.total_recording_time,
            total_photos: aggregate.total_photos,
            last_updated: aggregate.last_updated,
        }
    }
}

/// One element of the flat `[aggregate, ...devices]` listing.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LegacyStatisticsEntry {
    Aggregate(LegacyAggregateEntry),
    Device(DeviceStatisticsRecord),
}

pub fn legacy_statistics(overview: StatisticsOverview) -> Vec<LegacyStatisticsEntry> {
    let mut entries = Vec::with_capacity(overview.devices.len() + 1);
    entries.push(LegacyStatisticsEntry::Aggregate(overview.aggregate.into()));
    entries.extend(
        overview
            .devices
            .into_iter()
            .map(LegacyStatisticsEntry::Device),
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(device_id: &str, last_updated: &str) -> DeviceStatisticsRecord {
        DeviceStatisticsRecord {
            id: 1,
            device_id: device_id.to_string(),
            total_recording_time: 100.0,
            total_sessions: 3,
            daily_recording_time: 10.0,
            daily_sessions: 1,
            app_usage_time: 20.0,
            total_photos: 5,
            daily_photos: 1,
            total_devices: 1,
            device_model: String::new(),
            device_name: String::new(),
            last_updated: last_updated.to_string(),
            date: "2025-03-10".to_string(),
        }
    }

    #[test]
    fn legacy_listing_prepends_tagged_aggregate() {
        let overview = StatisticsOverview {
            aggregate: GlobalAggregate {
                device_count: 1,
                total_recording_time: 100.0,
                total_photos: 5,
                last_updated: Some("2025-03-10T09:00:00.000Z".to_string()),
            },
            devices: vec![device("phone", "2025-03-10T09:00:00.000Z")],
        };

        let value = serde_json::to_value(legacy_statistics(overview)).expect("serialize");

        let entries = value.as_array().expect("array");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["device_id"], AGGREGATE_DEVICE_ID);
        assert_eq!(entries[0]["device_count"], 1);
        assert_eq!(entries[0]["total_devices"], 1);
        assert_eq!(entries[0]["total_recording_time"], 100.0);
        assert_eq!(entries[1]["device_id"], "phone");
        assert_eq!(entries[1]["total_sessions"], 3);
    }

    #[test]
    fn empty_store_still_yields_aggregate_entry() {
        let value =
            serde_json::to_value(legacy_statistics(StatisticsOverview::default())).expect("serialize");

        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["device_count"], 0);
    }
}
