//! Calendar event record and date parsing.
//!
//! # Invariants
//! - `title` is never blank.
//! - `date` carries only (year, month, day); time-of-day is dropped on input.
//! - Dates serialize as `YYYY-MM-DD`; unpadded `YYYY-M-D` input is accepted.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EVENT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})-(\d{1,2})-(\d{1,2})(?:[T ].*)?$").expect("valid event date regex")
});

/// Validation failure for event creation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEvent {
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("event date cannot be empty")]
    EmptyDate,
    #[error("unparseable event date `{0}`")]
    UnparseableDate(String),
}

/// One calendar entry. Created once, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    #[serde(with = "event_date_format")]
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

/// Unvalidated event input as submitted by the event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    /// `YYYY-M-D` or `YYYY-MM-DD`, optionally followed by a time part.
    pub date: String,
    pub description: String,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            description: description.into(),
        }
    }
}

impl TryFrom<EventDraft> for Event {
    type Error = InvalidEvent;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(InvalidEvent::EmptyTitle);
        }

        let raw_date = draft.date.trim();
        if raw_date.is_empty() {
            return Err(InvalidEvent::EmptyDate);
        }
        let date = parse_event_date(raw_date)
            .ok_or_else(|| InvalidEvent::UnparseableDate(raw_date.to_string()))?;

        Ok(Self {
            title: title.to_string(),
            date,
            description: draft.description.trim().to_string(),
        })
    }
}

/// Parses `YYYY-M-D` style dates, ignoring any trailing time-of-day.
///
/// Returns `None` for malformed text or impossible dates (`2023-2-30`).
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let caps = EVENT_DATE_RE.captures(raw.trim())?;
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

mod event_date_format {
    use super::parse_event_date;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_event_date(raw.as_str())
            .ok_or_else(|| de::Error::custom(format!("invalid event date `{raw}`")))
    }
}
