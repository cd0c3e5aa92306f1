//! Lenient parsing for the tracker's timestamp strings.
//!
//! Jira emits `2026-02-11T09:00:00.000+0900` (no colon in the offset),
//! which is not strict RFC 3339, so parsing tries both shapes.

use chrono::{DateTime, Utc};

/// Parse a tracker timestamp, returning `None` on anything unreadable.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.3f%z")
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Whether an active sprint has run past its end date.
#[must_use]
pub fn is_overdue(end_date: Option<&str>, now: DateTime<Utc>) -> bool {
    end_date
        .and_then(parse_timestamp)
        .is_some_and(|end| end < now)
}
