//! Domain records owned by the dashboard stores.
//!
//! # Responsibility
//! - Define the persisted shapes of todos, notes and calendar events.
//! - Keep wire naming compatible with previously stored dashboard data.
//!
//! # Invariants
//! - Todos and notes carry a stable `ItemId` assigned at creation.
//! - Records loaded without an id (older stored shape) receive a fresh one.

pub mod event;
pub mod note;
pub mod todo;

use uuid::Uuid;

/// Stable identifier for todos and notes.
///
/// Identity never depends on list position, so deletions do not shift it.
pub type ItemId = Uuid;
