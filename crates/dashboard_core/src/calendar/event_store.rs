use super::month::{MonthView, YearMonth};
use crate::model::event::{Event, EventDraft, InvalidEvent};
use chrono::NaiveDate;

/// Append-only calendar event collection.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously persisted events in their stored order.
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Validates `draft` and appends the resulting event.
    ///
    /// # Errors
    /// Returns [`InvalidEvent`] for a blank title or an empty/unparseable date.
    pub fn add(&mut self, draft: EventDraft) -> Result<Event, InvalidEvent> {
        let event = Event::try_from(draft)?;
        self.events.push(event.clone());
        Ok(event)
    }

    /// Events on `date`, in insertion order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| event.date == date)
            .collect()
    }

    /// Events in the given month, date ascending; ties keep insertion order.
    ///
    /// An invalid `month` yields an empty result.
    pub fn events_in_month(&self, year: i32, month: u32) -> Vec<&Event> {
        let Some(year_month) = YearMonth::new(year, month) else {
            return Vec::new();
        };

        let mut matching = self
            .events
            .iter()
            .filter(|event| year_month.contains(event.date))
            .collect::<Vec<_>>();
        // Stable sort keeps same-date events in insertion order.
        matching.sort_by_key(|event| event.date);
        matching
    }

    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        self.events.iter().any(|event| event.date == date)
    }

    pub fn month_view(&self, year_month: YearMonth) -> MonthView {
        MonthView::build(year_month, |date| self.has_events_on(date))
    }
}
