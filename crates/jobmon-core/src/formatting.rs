use chrono::TimeDelta;

/// Format a signed time span as a human-readable duration.
///
/// Zero components are dropped except when the whole span is zero; a
/// negative span keeps its sign in front of the rendered quantity.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use jobmon_core::formatting::format_duration;
///
/// assert_eq!(format_duration(TimeDelta::seconds(426)),  "7m 6s");
/// assert_eq!(format_duration(TimeDelta::seconds(45)),   "45s");
/// assert_eq!(format_duration(TimeDelta::seconds(3600)), "1h");
/// assert_eq!(format_duration(TimeDelta::seconds(0)),    "0s");
/// assert_eq!(format_duration(TimeDelta::seconds(-125)), "-2m 5s");
/// ```
pub fn format_duration(duration: TimeDelta) -> String {
    let total_secs = duration.num_seconds();
    let negative = total_secs < 0;
    let secs = total_secs.abs();

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let rem = secs % 60;

    let mut parts: Vec<String> = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 {
        parts.push(format!("{}m", mins));
    }
    if rem > 0 || parts.is_empty() {
        parts.push(format!("{}s", rem));
    }

    let body = parts.join(" ");
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}
