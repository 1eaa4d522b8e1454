/// Accepted spellings of one report field, camelCase first.
#[derive(Debug, Clone, Copy)]
pub struct FieldKeys {
    pub camel: &'static str,
    pub snake: &'static str,
}

impl FieldKeys {
    const fn new(camel: &'static str, snake: &'static str) -> Self {
        Self { camel, snake }
    }

    pub fn lookup_order(&self) -> [&'static str; 2] {
        [self.camel, self.snake]
    }
}

pub const DEVICE_ID: FieldKeys = FieldKeys::new("deviceId", "device_id");
pub const TOTAL_RECORDING_TIME: FieldKeys =
    FieldKeys::new("totalRecordingTime", "total_recording_time");
pub const DAILY_RECORDING_TIME: FieldKeys =
    FieldKeys::new("dailyRecordingTime", "daily_recording_time");
pub const APP_USAGE_TIME: FieldKeys = FieldKeys::new("appUsageTime", "app_usage_time");
pub const TOTAL_SESSIONS: FieldKeys = FieldKeys::new("totalSessions", "total_sessions");
pub const DAILY_SESSIONS: FieldKeys = FieldKeys::new("dailySessions", "daily_sessions");
pub const TOTAL_PHOTOS: FieldKeys = FieldKeys::new("totalPhotos", "total_photos");
pub const DAILY_PHOTOS: FieldKeys = FieldKeys::new("dailyPhotos", "daily_photos");
pub const TOTAL_DEVICES: FieldKeys = FieldKeys::new("totalDevices", "total_devices");
pub const DEVICE_MODEL: FieldKeys = FieldKeys::new("deviceModel", "device_model");
pub const DEVICE_NAME: FieldKeys = FieldKeys::new("deviceName", "device_name");
