use serde_json::{Map, Value};
use telemetry_core::{DEFAULT_DEVICE_ID, StatisticsReport};

use crate::keys::{self, FieldKeys};

/// Maps a client payload onto a fully populated report.
///
/// Never fails: every field that is missing or unusable falls back to its
/// default. When both spellings of a field are usable the camelCase one wins.
pub fn normalize_payload(payload: &Value) -> StatisticsReport {
    let defaults = StatisticsReport::default();
    let Some(obj) = payload.as_object() else {
        return defaults;
    };
    let field = |keys: FieldKeys| candidates(obj, keys);

    StatisticsReport {
        device_id: field(keys::DEVICE_ID)
            .find_map(non_blank_string)
            .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
        total_recording_time: field(keys::TOTAL_RECORDING_TIME)
            .find_map(finite_number)
            .unwrap_or(defaults.total_recording_time),
        daily_recording_time: field(keys::DAILY_RECORDING_TIME)
            .find_map(finite_number)
            .unwrap_or(defaults.daily_recording_time),
        app_usage_time: field(keys::APP_USAGE_TIME)
            .find_map(finite_number)
            .unwrap_or(defaults.app_usage_time),
        total_sessions: field(keys::TOTAL_SESSIONS)
            .find_map(integer)
            .unwrap_or(defaults.total_sessions),
        daily_sessions: field(keys::DAILY_SESSIONS)
            .find_map(integer)
            .unwrap_or(defaults.daily_sessions),
        total_photos: field(keys::TOTAL_PHOTOS)
            .find_map(integer)
            .unwrap_or(defaults.total_photos),
        daily_photos: field(keys::DAILY_PHOTOS)
            .find_map(integer)
            .unwrap_or(defaults.daily_photos),
        total_devices: field(keys::TOTAL_DEVICES)
            .find_map(integer)
            .unwrap_or(defaults.total_devices),
        device_model: field(keys::DEVICE_MODEL)
            .find_map(label)
            .unwrap_or(defaults.device_model),
        device_name: field(keys::DEVICE_NAME)
            .find_map(label)
            .unwrap_or(defaults.device_name),
    }
}

/// Normalizes a raw request body. Bodies that are not JSON count as empty.
pub fn normalize_body(body: &[u8]) -> StatisticsReport {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => normalize_payload(&value),
        Err(_) => StatisticsReport::default(),
    }
}

fn candidates(obj: &Map<String, Value>, keys: FieldKeys) -> impl Iterator<Item = &Value> {
    keys.lookup_order()
        .into_iter()
        .filter_map(move |key| obj.get(key))
}

fn finite_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

fn integer(value: &Value) -> Option<i64> {
    if let Some(exact) = value.as_i64() {
        return Some(exact);
    }
    // Saturating cast; fractional counters truncate toward zero.
    finite_number(value).map(|parsed| parsed.trunc() as i64)
}

fn label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_blank_string(value: &Value) -> Option<String> {
    let text = label(value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
