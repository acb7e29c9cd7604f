//! Date and duration formatting shared by the markdown renderers.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

const DATE_FORMAT: &str = "%b %-d, %Y, %-I:%M %p %Z";

/// Time zone used for human-readable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Fixed zone when an offset is configured, host-local otherwise.
    /// Out-of-range offsets fall back to local time.
    pub fn from_offset_minutes(offset: Option<i32>) -> Self {
        offset
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .map(DisplayZone::Fixed)
            .unwrap_or(DisplayZone::Local)
    }

    pub fn utc() -> Self {
        DisplayZone::Fixed(Utc.fix())
    }

    /// Format an RFC 3339 timestamp as `Jan 15, 2026, 2:00 PM UTC`.
    ///
    /// Unparsable input is returned unchanged.
    pub fn format(&self, timestamp: &str) -> String {
        let Some(instant) = parse_instant(timestamp) else {
            return timestamp.to_string();
        };
        match self {
            DisplayZone::Fixed(offset) if offset.local_minus_utc() == 0 => {
                instant.format(DATE_FORMAT).to_string()
            }
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).format(DATE_FORMAT).to_string(),
            DisplayZone::Local => instant.with_timezone(&Local).format(DATE_FORMAT).to_string(),
        }
    }
}

fn parse_instant(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whole minutes between two RFC 3339 instants, rounded to nearest.
///
/// `None` when either side is missing or unparsable.
pub fn duration_minutes(start: Option<&str>, end: Option<&str>) -> Option<i64> {
    let start = parse_instant(start?)?;
    let end = parse_instant(end?)?;
    let millis = (end - start).num_milliseconds();
    Some((millis as f64 / 60_000.0).round() as i64)
}

/// `45 min` under an hour, `1h 30m` otherwise.
pub fn format_duration(minutes: i64) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}
