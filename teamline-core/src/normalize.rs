//! Normalization boundary: tolerant conversion of raw records into the model.
//!
//! Policy (the only place it lives):
//! - timestamps: resolve the closed shape union in a fixed order; anything
//!   unresolvable becomes "now" rather than an error
//! - duration: absent, non-numeric or negative -> 1 day
//! - progress: clamped to 0..=100
//! - status/priority: unknown spellings degrade to safe defaults
//!
//! A layout engine that throws on bad data takes a whole view down with it,
//! so nothing here returns an error; callers that must detect fallback use
//! the strict `parse_instant` directly.

use anyhow::{Context, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::record::{RawTask, RawTimestamp};
use crate::task::{Priority, Status, Task};

/// Strict text parse, for callers that need to distinguish failure from the
/// tolerant fallback. Accepts RFC3339, `YYYY-MM-DDTHH:MM:SS[.f]`,
/// `YYYY-MM-DD HH:MM:SS`, bare `YYYY-MM-DD` (midnight), and integer epoch
/// milliseconds.
pub fn parse_instant(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(anyhow!("empty date string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Ok(dt.naive_utc());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(token, fmt) {
            return Ok(ndt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("failed to construct midnight for {token}"));
    }

    if let Ok(ms) = token.parse::<i64>() {
        return instant_from_millis(ms)
            .with_context(|| format!("epoch milliseconds out of range: {ms}"));
    }

    Err(anyhow!("unrecognized date string: {raw}"))
}

fn instant_from_millis(ms: i64) -> Option<NaiveDateTime> {
    // Epoch values are taken as UTC wall time; zone conversion is out of
    // scope for the engine.
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

/// Resolve a raw timestamp to an instant, falling back to `now` when the
/// value is absent or unusable.
pub fn normalize_instant(raw: Option<&RawTimestamp>, now: NaiveDateTime) -> NaiveDateTime {
    let Some(raw) = raw else {
        return now;
    };

    let resolved = match raw {
        RawTimestamp::Epoch { seconds, .. } => seconds
            .checked_mul(1000)
            .and_then(instant_from_millis),
        RawTimestamp::Millis(ms) => instant_from_millis(*ms),
        RawTimestamp::Text(s) => parse_instant(s).ok(),
        // Legacy writers occasionally emit fractional epoch milliseconds.
        RawTimestamp::Other(value) => value
            .as_f64()
            .filter(|f| f.is_finite())
            .and_then(|f| instant_from_millis(f.round() as i64)),
    };

    match resolved {
        Some(instant) => instant,
        None => {
            warn!(raw = ?raw, "unusable timestamp; falling back to now");
            now
        }
    }
}

/// Normalize one raw record into a `Task`, applying every default. Never
/// fails; records should be `validate()`d for a usable id before this.
pub fn normalize_task(raw: &RawTask, now: NaiveDateTime) -> Task {
    let start = normalize_instant(raw.start_date.as_ref(), now);

    let duration_days = raw
        .duration
        .as_ref()
        .and_then(json_to_days)
        .unwrap_or(1);

    let progress = raw
        .progress
        .as_ref()
        .and_then(json_to_i64)
        .unwrap_or(0)
        .clamp(0, 100) as u8;

    let status = match raw.status.as_deref() {
        None => Status::NotStarted,
        Some(s) => Status::parse(s).unwrap_or_else(|| {
            warn!(task = %raw.id, value = %s, "unknown status; defaulting to notStarted");
            Status::NotStarted
        }),
    };

    let priority = match raw.priority.as_deref() {
        None => Priority::Medium,
        Some(p) => Priority::parse(p).unwrap_or_else(|| {
            warn!(task = %raw.id, value = %p, "unknown priority; defaulting to medium");
            Priority::Medium
        }),
    };

    let assignees = dedup_keep_order(raw.assignees.as_deref().unwrap_or_default());

    Task {
        id: raw.id.clone(),
        title: raw.title.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
        start,
        duration_days,
        status,
        priority,
        progress,
        assignees,
        team_id: raw.team_id.clone(),
        team_name: raw.team_name.clone(),
        color: raw.color.clone(),
    }
}

/// Normalize a batch, skipping records without a usable id.
pub fn normalize_all(raws: &[RawTask], now: NaiveDateTime) -> Vec<Task> {
    raws.iter()
        .filter(|raw| match raw.validate() {
            Ok(()) => true,
            Err(reason) => {
                warn!(%reason, "skipping unusable task record");
                false
            }
        })
        .map(|raw| normalize_task(raw, now))
        .collect()
}

/// First occurrence wins; later duplicates are dropped.
pub(crate) fn dedup_keep_order(names: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        if !seen.iter().any(|kept| kept == name) {
            seen.push(name.clone());
        }
    }
    seen
}

fn json_to_days(value: &serde_json::Value) -> Option<i64> {
    let days = json_to_i64(value)?;
    // Negative day counts are malformed, not "short"; the caller defaults.
    if days < 0 { None } else { Some(days) }
}

fn json_to_i64(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(f) = value.as_f64() {
        if f.is_finite() {
            return Some(f.round() as i64);
        }
        return None;
    }
    value.as_str().and_then(|s| s.trim().parse::<i64>().ok())
}
