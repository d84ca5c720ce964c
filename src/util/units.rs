//! Formatting helpers for exercise timers and counters

use std::time::Duration;

/// Format whole seconds as a `MM:SS` clock
///
/// # Examples
/// ```
/// use explore_keys::util::units::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(61), "01:01");
/// ```
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a duration for humans, e.g. `1m 30s`
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use explore_keys::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    // Sub-second precision is noise on an exercise clock
    let whole = Duration::from_secs(duration.as_secs());
    if whole.is_zero() {
        return "0s".to_string();
    }
    humantime::format_duration(whole).to_string()
}

/// Fraction of a limit used so far, clamped to `0.0..=1.0`
pub fn limit_ratio(value: u32, limit: u32) -> f64 {
    if limit == 0 {
        return 1.0;
    }
    (value as f64 / limit as f64).clamp(0.0, 1.0)
}

/// `value / limit` label used by the progress gauges
pub fn format_progress(value: u32, limit: u32) -> String {
    format!("{} / {}", value, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1s");
        assert_eq!(format_duration(Duration::from_secs(61)), "1m 1s");
        assert_eq!(format_duration(Duration::from_secs(3660)), "1h 1m");
    }

    #[test]
    fn test_limit_ratio() {
        assert_eq!(limit_ratio(0, 60), 0.0);
        assert_eq!(limit_ratio(30, 60), 0.5);
        assert_eq!(limit_ratio(90, 60), 1.0);
        assert_eq!(limit_ratio(5, 0), 1.0);
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(12, 50), "12 / 50");
    }
}
