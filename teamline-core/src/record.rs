//! Raw task-record contracts as exported by the upstream document store.
//!
//! Upstream records are produced by several historically inconsistent
//! writers, so every field here is optional and loosely typed; the closed
//! set of timestamp shapes is modeled as one untagged union instead of
//! ad-hoc type inspection at call sites. Interpretation (and every default)
//! happens in `normalize` — this module only names the shapes.

use serde::{Deserialize, Serialize};

/// The timestamp encodings observed in stored documents.
///
/// Variant order matters for untagged deserialization: object, integer,
/// string, then anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Epoch-seconds object (`{"seconds": .., "nanoseconds": ..}`).
    Epoch {
        seconds: i64,
        #[serde(default)]
        nanoseconds: Option<i64>,
    },
    /// Native date serialized as integer epoch milliseconds.
    Millis(i64),
    /// ISO-8601 or other date-parseable text.
    Text(String),
    /// Anything else a legacy writer produced; resolved (or defaulted)
    /// during normalization.
    Other(serde_json::Value),
}

/// A task document as stored, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub start_date: Option<RawTimestamp>,

    /// Day count; may be a number, a numeric string, or junk.
    #[serde(default)]
    pub duration: Option<serde_json::Value>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    /// 0-100; same loose typing as `duration`.
    #[serde(default)]
    pub progress: Option<serde_json::Value>,

    #[serde(default)]
    pub assignees: Option<Vec<String>>,

    #[serde(default)]
    pub team_id: Option<String>,

    #[serde(default)]
    pub team_name: Option<String>,

    #[serde(default)]
    pub color: Option<String>,
}

impl RawTask {
    /// Minimal invariant for a record to be usable at all: layout, drag and
    /// edit all key on the task id.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must be non-empty".to_string());
        }
        Ok(())
    }
}
