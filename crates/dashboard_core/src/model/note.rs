//! Note record.
//!
//! Notes are immutable once created; the only lifecycle step after creation
//! is deletion.

use super::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One saved note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default = "Uuid::new_v4")]
    pub id: ItemId,
    pub text: String,
    /// Creation time, serialized as RFC 3339 (ISO-8601) in UTC.
    pub timestamp: DateTime<Utc>,
}

impl Note {
    /// Creates a note stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self::created_at(text, Utc::now())
    }

    /// Creates a note with an explicit creation time.
    pub fn created_at(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp,
        }
    }
}
