//! Calendar event collection and month arithmetic.
//!
//! # Responsibility
//! - Own the event list and answer per-day and per-month queries.
//! - Compute month grids (leading blanks, day cells) for calendar views.
//!
//! # Invariants
//! - Events are append-only.
//! - Month queries return date-ascending results; same-date events keep
//!   insertion order.

mod event_store;
mod month;

pub use event_store::EventStore;
pub use month::{DayCell, MonthView, YearMonth};
