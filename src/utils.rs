/// Utility helpers for the album player

/// Render a playback position the way the control bar shows it.
/// Positions past ten minutes get an hour field (`HH:MM:SS`), shorter ones
/// render as `MM:SS`. Fractional seconds are dropped.
pub fn fmt_time(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if seconds > 600.0 {
        format!("{hours:02}:{mins:02}:{secs:02}")
    } else {
        format!("{:02}:{secs:02}", total / 60)
    }
}

/// Progress bar value on a 0-100 scale.
pub fn progress_percent(elapsed: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !elapsed.is_finite() {
        return 0.0;
    }
    (elapsed / duration * 100.0).clamp(0.0, 100.0)
}

/// Usable duration of a media element, `None` while it is still unknown.
pub fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_positions_use_minutes_and_seconds() {
        assert_eq!(fmt_time(0.0), "00:00");
        assert_eq!(fmt_time(59.0), "00:59");
        assert_eq!(fmt_time(59.9), "00:59");
        assert_eq!(fmt_time(600.0), "10:00");
    }

    #[test]
    fn long_positions_gain_an_hour_field() {
        assert_eq!(fmt_time(601.0), "00:10:01");
        assert_eq!(fmt_time(3725.0), "01:02:05");
        assert_eq!(fmt_time(90_000.0), "25:00:00");
    }

    #[test]
    fn garbage_positions_render_as_zero() {
        assert_eq!(fmt_time(-4.0), "00:00");
        assert_eq!(fmt_time(f64::NAN), "00:00");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(130.0, 120.0), 100.0);
        assert_eq!(progress_percent(10.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn unknown_durations() {
        assert_eq!(known_duration(f64::NAN), None);
        assert_eq!(known_duration(f64::INFINITY), None);
        assert_eq!(known_duration(0.0), None);
        assert_eq!(known_duration(42.0), Some(42.0));
    }
}
