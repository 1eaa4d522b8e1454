use ingest::normalize_body;
use telemetry_core::StatisticsReport;

#[test]
fn normalizes_mobile_client_report() {
    let body = br#"{
        "deviceId": "test-device-123",
        "totalRecordingTime": 3661.5,
        "totalSessions": 42,
        "dailyRecordingTime": 180.5,
        "dailySessions": 5,
        "appUsageTime": 240.0,
        "totalPhotos": 12,
        "dailyPhotos": 2,
        "totalDevices": 2,
        "deviceModel": "Pixel 8",
        "deviceName": "Field unit"
    }"#;

    let report = normalize_body(body);

    assert_eq!(
        report,
        StatisticsReport {
            device_id: "test-device-123".to_string(),
            total_recording_time: 3661.5,
            daily_recording_time: 180.5,
            app_usage_time: 240.0,
            total_sessions: 42,
            daily_sessions: 5,
            total_photos: 12,
            daily_photos: 2,
            total_devices: 2,
            device_model: "Pixel 8".to_string(),
            device_name: "Field unit".to_string(),
        }
    );
}

#[test]
fn normalizes_legacy_snake_case_report() {
    let body = br#"{
        "device_id": "legacy-7",
        "total_recording_time": "90",
        "total_sessions": "3",
        "daily_recording_time": 30,
        "daily_sessions": 1,
        "app_usage_time": null
    }"#;

    let report = normalize_body(body);

    assert_eq!(report.device_id, "legacy-7");
    assert_eq!(report.total_recording_time, 90.0);
    assert_eq!(report.total_sessions, 3);
    assert_eq!(report.daily_recording_time, 30.0);
    assert_eq!(report.daily_sessions, 1);
    assert_eq!(report.app_usage_time, 0.0);
    assert_eq!(report.total_devices, 1);
}
