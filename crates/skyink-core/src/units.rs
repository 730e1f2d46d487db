//! Unit formatting utilities
//!
//! Renders durations and distances for log output and mission summaries.

/// Format a duration in seconds as `"{m}m {s}s"`, or `"{s}s"` under a minute.
///
/// Seconds are truncated, not rounded. Negative or non-finite input is
/// treated as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let minutes = (total / 60.0).floor() as u64;
    let secs = (total % 60.0).floor() as u64;
    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format a distance in meters with one decimal, e.g. `"61.2m"`.
pub fn format_distance(meters: f64) -> String {
    format!("{:.1}m", meters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(59.99), "59s");
        assert_eq!(format_duration(60.0), "1m 0s");
        assert_eq!(format_duration(3725.4), "62m 5s");
        assert_eq!(format_duration(-3.0), "0s");
        assert_eq!(format_duration(f64::NAN), "0s");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(78.2842), "78.3m");
        assert_eq!(format_distance(0.0), "0.0m");
    }
}
