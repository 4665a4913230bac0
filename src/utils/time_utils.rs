use chrono::{DateTime, Local};
use std::time::Duration;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_MIN * 5;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_MIN * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const CLOCK_FORMAT: &str = "%H:%M:%S";
}

/// Wall-clock time of day, for "last run at" readouts.
pub fn local_clock(at: DateTime<Local>) -> String {
    at.format(TimeUtils::CLOCK_FORMAT).to_string()
}

/// Compact human duration: `850ms`, `2.4s`, `1.5m`, `3.0h`.
pub fn format_duration_short(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }

    let millis = duration.as_millis();
    if millis < 1_000 {
        return format!("{}ms", millis);
    }

    let seconds = duration.as_secs_f64();
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3_600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.1}h", seconds / 3_600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_durations_pick_the_right_unit() {
        assert_eq!(format_duration_short(Duration::ZERO), "0s");
        assert_eq!(format_duration_short(Duration::from_millis(850)), "850ms");
        assert_eq!(format_duration_short(Duration::from_millis(2_400)), "2.4s");
        assert_eq!(format_duration_short(Duration::from_secs(90)), "1.5m");
        assert_eq!(format_duration_short(Duration::from_secs(3 * 3_600)), "3.0h");
    }

    #[test]
    fn clock_shows_hours_minutes_seconds() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 1, 9, 5, 7)
            .single()
            .expect("unambiguous local time");
        assert_eq!(local_clock(at), "09:05:07");
    }
}
