use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time in the log dialect's timestamp format
/// (`2026-08-06T10:00:00Z`, second resolution).
pub fn iso_timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}
