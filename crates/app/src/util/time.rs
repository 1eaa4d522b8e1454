use chrono::{NaiveDate, Utc};

use crate::config::WindowParams;
use crate::error::{AppError, Result};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Validates a caller-supplied window length. Only plain positive integers up
/// to [`MAX_WINDOW_DAYS`] are accepted; a missing value means the default.
pub fn resolve_window(params: &WindowParams) -> Result<u32> {
    let Some(raw) = params.days.as_deref() else {
        return Ok(DEFAULT_WINDOW_DAYS);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_WINDOW_DAYS);
    }
    if !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AppError::InvalidInput(format!(
            "days must be a positive integer, got {:?}",
            raw
        )));
    }
    let days = trimmed
        .parse::<u32>()
        .map_err(|_| AppError::InvalidInput(format!("days out of range: {}", trimmed)))?;
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(AppError::InvalidInput(format!(
            "days must be between 1 and {}",
            MAX_WINDOW_DAYS
        )));
    }
    Ok(days)
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(days: Option<&str>) -> WindowParams {
        WindowParams {
            days: days.map(str::to_string),
        }
    }

    #[test]
    fn missing_days_defaults_to_thirty() {
        assert_eq!(resolve_window(&params(None)).expect("window"), 30);
        assert_eq!(resolve_window(&params(Some(""))).expect("window"), 30);
    }

    #[test]
    fn accepts_plain_integers() {
        assert_eq!(resolve_window(&params(Some("7"))).expect("window"), 7);
        assert_eq!(resolve_window(&params(Some(" 90 "))).expect("window"), 90);
    }

    #[test]
    fn rejects_injection_shaped_values() {
        let err = resolve_window(&params(Some("30); DROP TABLE statistics;--")))
            .expect_err("rejected");
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn rejects_zero_negative_and_oversized_windows() {
        for raw in ["0", "-5", "3651", "99999999999", "1.5", "+3"] {
            assert!(
                resolve_window(&params(Some(raw))).is_err(),
                "{raw} should be rejected"
            );
        }
    }
}
